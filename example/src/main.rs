//! Runs the service provider's side of the attestation key agreement.
//!
//! ```bash
//! # play both sides locally
//! sgx_ecdh_example sp_identity.pem
//!
//! # answer an enclave's G_a, given as base64 of gx || gy (little-endian)
//! sgx_ecdh_example sp_identity.pem "<base64>"
//!
//! # see the library's logs
//! RUST_LOG=sgx_ecdh=debug sgx_ecdh_example sp_identity.pem
//! ```

use std::process::ExitCode;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand_core::OsRng;
use sgx_ecdh::{
    derive_static_shared_secret, load_private_key, Ec256PublicKey, EphemeralKeyPair, ErrorState,
    PeerPublicKey,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: sgx_ecdh_example <identity.pem> [peer-public-key-base64]";

/// Unwraps a tracked key operation, or prints its report and exits.
macro_rules! try_or_report {
    ($state:expr, $prefix:literal, $op:expr) => {
        match $state.track($op) {
            Ok(value) => value,
            Err(_) => {
                // nothing else to tell the user if stderr is gone
                let _ = $state.report_stderr($prefix);
                return ExitCode::FAILURE;
            }
        }
    };
}

fn encode_wire(key: &Ec256PublicKey) -> String {
    STANDARD.encode(key.to_bytes())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(key_path) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut state = ErrorState::new();

    let identity = try_or_report!(state, "key_load_file", load_private_key(&key_path));
    let identity_public = try_or_report!(state, "identity key", identity.public_key());
    println!("identity public key: {}", encode_wire(&identity_public.to_wire()));

    // with no peer on the command line we play the enclave ourselves
    let (peer, enclave) = match args.next() {
        Some(encoded) => {
            let Ok(bytes) = STANDARD.decode(encoded.trim()) else {
                eprintln!("peer public key is not valid base64\n{USAGE}");
                return ExitCode::FAILURE;
            };
            let wire = try_or_report!(
                state,
                "peer public key",
                Ec256PublicKey::try_from(bytes.as_slice())
            );
            let peer = try_or_report!(state, "peer public key", PeerPublicKey::try_from(&wire));
            (peer, None)
        }
        None => {
            let enclave = EphemeralKeyPair::generate(&mut OsRng);
            let g_a = enclave.public_key();
            let peer = try_or_report!(state, "simulated G_a", PeerPublicKey::try_from(&g_a));
            println!("simulated G_a: {}", encode_wire(&g_a));
            (peer, Some(enclave))
        }
    };

    let ours = EphemeralKeyPair::generate(&mut OsRng);
    let g_b = ours.public_key();
    let secret = try_or_report!(state, "key_shared_secret", ours.agree(&peer));
    println!("G_b: {}", encode_wire(&g_b));
    println!("ephemeral shared secret: {} bytes", secret.len());

    if let Some(enclave) = enclave {
        let g_b = try_or_report!(state, "G_b", PeerPublicKey::try_from(&g_b));
        let theirs = try_or_report!(state, "enclave shared secret", enclave.agree(&g_b));
        println!("enclave derived the same secret: {}", theirs == secret);
    }

    let static_secret = try_or_report!(
        state,
        "static shared secret",
        derive_static_shared_secret(&identity, &peer)
    );
    println!("static shared secret: {} bytes", static_secret.len());

    ExitCode::SUCCESS
}

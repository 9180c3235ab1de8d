//! Elliptic-curve key handling for an SGX-style remote attestation key
//! exchange.
//!
//! <div class="warning">
//! Security notice: this crate has not been independently audited or
//! reviewed. The curve arithmetic itself is provided by the RustCrypto
//! [p256] crate. </div>
//!
//! The crate does three things, all on curve P-256:
//!
//! 1. [load_private_key] reads a long-term private key from an unencrypted
//!    PEM file into a [PrivateKey]. The loaded key keeps whatever curve the
//!    file encodes; it must pass through [PrivateKey::to_p256] (which every
//!    derivation entry point calls for you) before it can be used in ECDH.
//! 2. [PeerPublicKey::from_coordinates] rebuilds the peer's public key from
//!    the two 32-byte **little-endian** coordinates carried in the
//!    attestation messages (the `sgx_ec256_public_t` layout, see
//!    [Ec256PublicKey]). The point is checked against the curve equation.
//! 3. [derive_shared_secret] generates a fresh ephemeral key pair for every
//!    call and performs ECDH against the peer key, returning a
//!    [SharedSecret] that zeroizes itself on drop.
//!
//! Every operation returns an explicit [Result]. If you want
//! "last error" diagnostics, keep an [ErrorState] next to your calls and
//! [track](ErrorState::track) them; it renders a one-line report on demand.
//!
//! # Example
//! ```
//! use rand_core::OsRng;
//! use sgx_ecdh::{EphemeralKeyPair, PeerPublicKey};
//!
//! // the enclave sends us its public key G_a as two little-endian coordinates
//! let enclave = EphemeralKeyPair::generate(&mut OsRng);
//! let g_a = enclave.public_key();
//!
//! let peer = PeerPublicKey::from_coordinates(&g_a.gx, &g_a.gy).unwrap();
//! let ours = EphemeralKeyPair::generate(&mut OsRng);
//! let g_b = ours.public_key();
//! let secret = ours.agree(&peer).unwrap();
//!
//! // the enclave does the same with G_b and both sides hold the same secret
//! let peer_b = PeerPublicKey::try_from(&g_b).unwrap();
//! assert_eq!(enclave.agree(&peer_b).unwrap(), secret);
//! assert_eq!(secret.len(), sgx_ecdh::FIELD_SIZE);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use elliptic_curve;
pub use hkdf;
pub use p256;

#[macro_use]
mod macros;

mod curve;
mod error;
mod exchange;
mod loader;
mod peer;
mod report;
mod utils;
mod wire;

pub use curve::{Curve, FIELD_SIZE, P256_OID};
pub use error::{CryptoError, ErrorKind, KeyError};
pub use exchange::{
    derive_shared_secret, derive_shared_secret_with_rng, derive_static_shared_secret,
    EphemeralKeyPair, SharedSecret,
};
pub use loader::{load_private_key, load_private_key_pem, PrivateKey};
pub use peer::PeerPublicKey;
pub use report::{format_report, ErrorState};
pub use wire::Ec256PublicKey;

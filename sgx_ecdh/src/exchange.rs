//! Elliptic Curve Diffie-Hellman on P-256.
//!
//! Every call to [derive_shared_secret] generates a brand new ephemeral
//! key pair, so two derivations against the same peer key give different
//! secrets. The ephemeral private scalar never leaves this module: it lives
//! in an [EphemeralKeyPair], which [agree](EphemeralKeyPair::agree)
//! consumes, and it is zeroized when that value is dropped.

use hkdf::{
    hmac::{
        digest::{core_api::BlockSizeUser, Digest},
        SimpleHmac,
    },
    Hkdf,
};
use p256::ecdh::EphemeralSecret;
use rand_core::{CryptoRngCore, OsRng};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::{error::CryptoError, Ec256PublicKey, KeyError, PeerPublicKey, PrivateKey};

/// The output of an ECDH key agreement: the affine `x` coordinate of the
/// shared point, big-endian, exactly as RustCrypto and OpenSSL produce it.
///
/// Its length comes from the key agreement, not from the caller. Read it
/// with [len](Self::len) alongside [as_bytes](Self::as_bytes). The bytes are
/// zeroized on drop, and comparisons run in constant time.
pub struct SharedSecret {
    secret: Zeroizing<Vec<u8>>,
}

impl SharedSecret {
    fn from_raw(raw: &[u8]) -> Result<Self, KeyError> {
        if raw.is_empty() {
            error_log!("key agreement produced an empty secret");
            return Err(CryptoError::EmptySecret.into());
        }
        Ok(Self {
            secret: Zeroizing::new(raw.to_vec()),
        })
    }

    /// The number of bytes in the secret.
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// Always `false`; an empty secret is never handed out.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// The raw secret bytes.
    ///
    /// These are not uniformly random and should not be used as a key
    /// directly. Feed them into a KDF first, e.g. with
    /// [extract](Self::extract).
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Uses HKDF-Extract to turn the raw secret into a pseudorandom key,
    /// returning an [Hkdf] ready for `expand`.
    pub fn extract<D>(&self, salt: Option<&[u8]>) -> Hkdf<D, SimpleHmac<D>>
    where
        D: BlockSizeUser + Clone + Digest,
    {
        Hkdf::new(salt, &self.secret)
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret.as_slice().ct_eq(other.secret.as_slice())
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A single-use ephemeral key pair on P-256.
///
/// Send [public_key](Self::public_key) to the peer, then call
/// [agree](Self::agree) once with the peer's key. `agree` takes `self`, so
/// an ephemeral key cannot be reused for a second exchange.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
}

impl EphemeralKeyPair {
    /// Generates a fresh key pair.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            secret: EphemeralSecret::random(rng),
        }
    }

    /// The public half, in little-endian wire coordinates.
    pub fn public_key(&self) -> Ec256PublicKey {
        PeerPublicKey::from(self.secret.public_key()).to_wire()
    }

    /// Performs ECDH with the peer's key and destroys the ephemeral secret.
    pub fn agree(self, peer: &PeerPublicKey) -> Result<SharedSecret, KeyError> {
        let shared = self.secret.diffie_hellman(peer.as_public_key());
        let secret = SharedSecret::from_raw(shared.raw_secret_bytes())?;
        debug_log!("derived a {} byte ephemeral shared secret", secret.len());
        Ok(secret)
    }
}

impl core::fmt::Debug for EphemeralKeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Derives a shared secret with `peer` using a fresh ephemeral key pair
/// drawn from the operating system's RNG.
///
/// The ephemeral key is discarded before this returns. If the peer also
/// needs your ephemeral public key (as in the attestation handshake), use
/// [EphemeralKeyPair] directly.
///
/// # Errors
///
/// Returns a [cryptographic](crate::ErrorKind::Cryptographic) error if the
/// agreement produced no output. No partial secret is ever returned.
pub fn derive_shared_secret(peer: &PeerPublicKey) -> Result<SharedSecret, KeyError> {
    derive_shared_secret_with_rng(peer, &mut OsRng)
}

/// Same as [derive_shared_secret], with a caller-supplied RNG for the
/// ephemeral key.
pub fn derive_shared_secret_with_rng(
    peer: &PeerPublicKey,
    rng: &mut impl CryptoRngCore,
) -> Result<SharedSecret, KeyError> {
    EphemeralKeyPair::generate(rng).agree(peer)
}

/// Derives a shared secret between a long-term key loaded from disk and
/// `peer`.
///
/// # Errors
///
/// Returns a [cryptographic](crate::ErrorKind::Cryptographic) error if
/// `local` is not a valid P-256 key; see [PrivateKey::to_p256].
pub fn derive_static_shared_secret(
    local: &PrivateKey,
    peer: &PeerPublicKey,
) -> Result<SharedSecret, KeyError> {
    let local = local.to_p256()?;
    let shared = elliptic_curve::ecdh::diffie_hellman(
        local.to_nonzero_scalar(),
        peer.as_public_key().as_affine(),
    );
    let secret = SharedSecret::from_raw(shared.raw_secret_bytes())?;
    debug_log!("derived a {} byte static shared secret", secret.len());
    Ok(secret)
}

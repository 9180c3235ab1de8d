//! The public key as it travels in attestation messages.

use crate::{error::CryptoError, KeyError, FIELD_SIZE};

/// A P-256 public key in the `sgx_ec256_public_t` layout: the affine `x`
/// and `y` coordinates, each a 32-byte **little-endian** unsigned integer.
///
/// This type only holds bytes. Nothing here checks that the coordinates are
/// a point on the curve; convert it into a
/// [PeerPublicKey](crate::PeerPublicKey) for that.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Ec256PublicKey {
    /// Affine `x`, little-endian.
    pub gx: [u8; FIELD_SIZE],
    /// Affine `y`, little-endian.
    pub gy: [u8; FIELD_SIZE],
}

impl Ec256PublicKey {
    /// Length of the encoded structure: `gx || gy`.
    pub const LEN: usize = 2 * FIELD_SIZE;

    /// Splits `gx || gy` into the two coordinates.
    pub fn from_bytes(bytes: &[u8; Self::LEN]) -> Self {
        let mut key = Self::default();
        key.gx.copy_from_slice(&bytes[..FIELD_SIZE]);
        key.gy.copy_from_slice(&bytes[FIELD_SIZE..]);
        key
    }

    /// Encodes the key as `gx || gy`.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[..FIELD_SIZE].copy_from_slice(&self.gx);
        bytes[FIELD_SIZE..].copy_from_slice(&self.gy);
        bytes
    }
}

impl TryFrom<&[u8]> for Ec256PublicKey {
    type Error = KeyError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: &[u8; Self::LEN] = value
            .try_into()
            .map_err(|_| CryptoError::InvalidWireLength(value.len()))?;
        Ok(Self::from_bytes(bytes))
    }
}

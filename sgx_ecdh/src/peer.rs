//! Rebuilding the peer's public key from its wire coordinates.

use p256::{
    elliptic_curve::sec1::{Coordinates, FromEncodedPoint, ToEncodedPoint},
    EncodedPoint, PublicKey,
};

use crate::{
    error::CryptoError,
    utils::{field_bytes_to_le_coordinate, le_coordinate_to_field_bytes},
    Ec256PublicKey, KeyError, FIELD_SIZE,
};

/// A public key that is known to be a valid, non-identity point on P-256.
///
/// The only ways to get one are [from_coordinates](Self::from_coordinates)
/// (which checks the curve equation), a [p256::PublicKey] (already
/// validated), or [PrivateKey::public_key](crate::PrivateKey::public_key)
/// (which checks the key's curve). That makes it the curve gate for every
/// derivation in this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeerPublicKey {
    inner: PublicKey,
}

impl PeerPublicKey {
    /// Builds a public key from two 32-byte **little-endian** affine
    /// coordinates, the encoding used by `sgx_ec256_public_t`.
    ///
    /// Do not pass big-endian (SEC1-style) coordinates here. They decode to
    /// a different point, which is then rejected as off-curve.
    ///
    /// # Errors
    ///
    /// Returns a [cryptographic](crate::ErrorKind::Cryptographic) error,
    /// [CryptoError::PointNotOnCurve], when either coordinate is not a
    /// reduced field element or the point does not satisfy the P-256 curve
    /// equation.
    pub fn from_coordinates(
        gx: &[u8; FIELD_SIZE],
        gy: &[u8; FIELD_SIZE],
    ) -> Result<Self, KeyError> {
        let x = le_coordinate_to_field_bytes(gx);
        let y = le_coordinate_to_field_bytes(gy);
        let point = EncodedPoint::from_affine_coordinates(&x, &y, false);

        let inner: Option<PublicKey> = PublicKey::from_encoded_point(&point).into();
        match inner {
            Some(inner) => Ok(Self { inner }),
            None => {
                error_log!("peer public key is not a point on P-256");
                Err(CryptoError::PointNotOnCurve.into())
            }
        }
    }

    /// Encodes this key back into little-endian wire coordinates.
    pub fn to_wire(&self) -> Ec256PublicKey {
        let point = self.inner.to_encoded_point(false);
        let mut wire = Ec256PublicKey::default();
        // a non-identity point always encodes with both coordinates
        if let Coordinates::Uncompressed { x, y } = point.coordinates() {
            wire.gx = field_bytes_to_le_coordinate(x);
            wire.gy = field_bytes_to_le_coordinate(y);
        }
        wire
    }

    /// The validated RustCrypto public key.
    pub fn as_public_key(&self) -> &PublicKey {
        &self.inner
    }
}

impl From<PublicKey> for PeerPublicKey {
    fn from(inner: PublicKey) -> Self {
        Self { inner }
    }
}

impl From<PeerPublicKey> for PublicKey {
    fn from(value: PeerPublicKey) -> Self {
        value.inner
    }
}

impl TryFrom<&Ec256PublicKey> for PeerPublicKey {
    type Error = KeyError;

    fn try_from(value: &Ec256PublicKey) -> Result<Self, Self::Error> {
        Self::from_coordinates(&value.gx, &value.gy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use p256::SecretKey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Using a seeded RNG to prevent chanced errors
    macro_rules! rng {
        () => {
            StdRng::from_seed([15u8; 32])
        };
    }

    /// The P-256 base point, big-endian.
    const G_X: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const G_Y: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

    fn be_hex(s: &str) -> [u8; FIELD_SIZE] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    fn le_hex(s: &str) -> [u8; FIELD_SIZE] {
        let mut bytes = be_hex(s);
        bytes.reverse();
        bytes
    }

    fn assert_not_on_curve(result: Result<PeerPublicKey, KeyError>) {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cryptographic);
        assert!(matches!(
            err.crypto_cause(),
            Some(CryptoError::PointNotOnCurve)
        ));
    }

    #[test]
    fn base_point_from_little_endian_coordinates() {
        let key = PeerPublicKey::from_coordinates(&le_hex(G_X), &le_hex(G_Y)).unwrap();
        let mut one = [0u8; FIELD_SIZE];
        one[FIELD_SIZE - 1] = 1;
        let generator = SecretKey::from_slice(&one).unwrap().public_key();
        assert_eq!(key.as_public_key(), &generator);
    }

    #[test]
    fn base_point_encodes_to_little_endian_wire() {
        let mut one = [0u8; FIELD_SIZE];
        one[FIELD_SIZE - 1] = 1;
        let generator = SecretKey::from_slice(&one).unwrap().public_key();
        let wire = PeerPublicKey::from(generator).to_wire();
        assert_eq!(wire.gx, le_hex(G_X));
        assert_eq!(wire.gy, le_hex(G_Y));
    }

    #[test]
    fn big_endian_coordinates_are_rejected() {
        assert_not_on_curve(PeerPublicKey::from_coordinates(
            &be_hex(G_X),
            &be_hex(G_Y),
        ));
    }

    #[test]
    fn random_keys_survive_the_wire() {
        let mut rng = rng!();
        for _ in 0..16 {
            let peer = PeerPublicKey::from(SecretKey::random(&mut rng).public_key());
            let rebuilt = PeerPublicKey::try_from(&peer.to_wire()).unwrap();
            assert_eq!(rebuilt, peer);
        }
    }

    #[test]
    fn tampered_y_is_rejected() {
        let peer = PeerPublicKey::from(SecretKey::random(&mut rng!()).public_key());
        let mut wire = peer.to_wire();
        wire.gy[0] ^= 1;
        assert_not_on_curve(PeerPublicKey::try_from(&wire));
    }

    #[test]
    fn degenerate_coordinates_are_rejected() {
        // the identity has no affine encoding, (0, 0) is not on the curve
        assert_not_on_curve(PeerPublicKey::from_coordinates(
            &[0u8; FIELD_SIZE],
            &[0u8; FIELD_SIZE],
        ));
        // coordinates above the field modulus
        assert_not_on_curve(PeerPublicKey::from_coordinates(
            &[0xffu8; FIELD_SIZE],
            &[0xffu8; FIELD_SIZE],
        ));
    }
}

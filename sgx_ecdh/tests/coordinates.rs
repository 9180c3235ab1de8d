use p256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use proptest::prelude::*;
use sgx_ecdh::{CryptoError, PeerPublicKey, FIELD_SIZE};

fn little_endian(be: &[u8]) -> [u8; FIELD_SIZE] {
    let mut le: [u8; FIELD_SIZE] = be.try_into().unwrap();
    le.reverse();
    le
}

proptest! {
    #[test]
    fn valid_points_rebuild_exactly(scalar in any::<[u8; FIELD_SIZE]>()) {
        let secret = SecretKey::from_slice(&scalar);
        prop_assume!(secret.is_ok());
        let public = secret.unwrap().public_key();

        let point = public.to_encoded_point(false);
        let gx = little_endian(point.x().unwrap());
        let gy = little_endian(point.y().unwrap());

        let peer = PeerPublicKey::from_coordinates(&gx, &gy).unwrap();
        prop_assert_eq!(peer.as_public_key(), &public);

        let wire = peer.to_wire();
        prop_assert_eq!(wire.gx, gx);
        prop_assert_eq!(wire.gy, gy);
    }

    #[test]
    fn random_coordinates_are_rejected(
        gx in any::<[u8; FIELD_SIZE]>(),
        gy in any::<[u8; FIELD_SIZE]>(),
    ) {
        let err = PeerPublicKey::from_coordinates(&gx, &gy).unwrap_err();
        prop_assert!(matches!(err.crypto_cause(), Some(CryptoError::PointNotOnCurve)));
    }
}

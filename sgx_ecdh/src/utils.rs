//! Byte-order conversions for the attestation wire format.
//!
//! **The wire format is little-endian.** SEC1, PKCS#8 and the RustCrypto
//! field types are all big-endian, so every coordinate crossing the wire
//! boundary must go through these two functions. Feeding a wire coordinate
//! straight into a big-endian decoder gives a different number; usually
//! that point is then rejected as off-curve, but nothing guarantees it.

use p256::FieldBytes;

use crate::FIELD_SIZE;

/// Converts a little-endian wire coordinate into big-endian field bytes.
#[inline]
pub(crate) fn le_coordinate_to_field_bytes(le: &[u8; FIELD_SIZE]) -> FieldBytes {
    let mut be = FieldBytes::default();
    for (dst, src) in be.iter_mut().zip(le.iter().rev()) {
        *dst = *src;
    }
    be
}

/// Converts big-endian field bytes into a little-endian wire coordinate.
#[inline]
pub(crate) fn field_bytes_to_le_coordinate(be: &FieldBytes) -> [u8; FIELD_SIZE] {
    let mut le = [0u8; FIELD_SIZE];
    for (dst, src) in le.iter_mut().zip(be.iter().rev()) {
        *dst = *src;
    }
    le
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_one() {
        let mut le = [0u8; FIELD_SIZE];
        le[0] = 1;
        let be = le_coordinate_to_field_bytes(&le);
        assert_eq!(be[FIELD_SIZE - 1], 1);
        assert!(be[..FIELD_SIZE - 1].iter().all(|b| *b == 0));
    }

    #[test]
    fn conversions_are_inverse() {
        let mut le = [0u8; FIELD_SIZE];
        for (i, b) in le.iter_mut().enumerate() {
            *b = i as u8;
        }
        let be = le_coordinate_to_field_bytes(&le);
        assert_eq!(be[0], (FIELD_SIZE - 1) as u8);
        assert_eq!(field_bytes_to_le_coordinate(&be), le);
    }
}

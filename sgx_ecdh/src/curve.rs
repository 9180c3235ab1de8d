//! The one curve this crate works with.

use pkcs8::ObjectIdentifier;

/// The curve every key in this crate is checked against: NIST P-256, a.k.a.
/// secp256r1 or prime256v1.
pub type Curve = p256::NistP256;

/// Size in bytes of a P-256 field element, which is also the size of each
/// coordinate in an [Ec256PublicKey](crate::Ec256PublicKey) and of a
/// derived shared secret.
pub const FIELD_SIZE: usize = 32;

/// The named-curve OID for P-256.
pub const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// `id-ecPublicKey`, the PKCS#8 algorithm identifier of every EC key.
pub(crate) const EC_PUBLIC_KEY_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

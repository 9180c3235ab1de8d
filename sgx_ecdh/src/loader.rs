//! Loading a long-term private key from PEM.

use std::{fs, path::Path};

use p256::SecretKey;
use pkcs8::{der::Decode, ObjectIdentifier, PrivateKeyInfo};
use sec1::EcPrivateKey as Sec1PrivateKey;
use zeroize::Zeroizing;

use crate::{
    curve::EC_PUBLIC_KEY_OID, error::CryptoError, KeyError, PeerPublicKey, P256_OID,
};

const PKCS8_LABEL: &str = "PRIVATE KEY";
const SEC1_LABEL: &str = "EC PRIVATE KEY";

const BEGIN: &[u8] = b"-----BEGIN ";
const END: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Splits `input` into its PEM documents, dropping any text around them.
///
/// A document runs from its `-----BEGIN ` line to the end of the matching
/// `-----END ...-----` boundary. An unterminated document runs to the end
/// of the input and is left for the decoder to reject.
fn pem_documents(mut input: &[u8]) -> Vec<&[u8]> {
    let mut documents = Vec::new();
    while let Some(begin) = find(input, BEGIN) {
        let rest = &input[begin..];
        let len = find(rest, END)
            .and_then(|end| {
                let label_start = end + END.len();
                find(&rest[label_start..], DASHES).map(|i| label_start + i + DASHES.len())
            })
            .unwrap_or(rest.len());
        documents.push(&rest[..len]);
        input = &rest[len..];
    }
    documents
}

/// An elliptic-curve private key read from PEM.
///
/// The key is kept on whatever curve the file named. Use
/// [to_p256](Self::to_p256) or [public_key](Self::public_key) to check that
/// it is a P-256 key before using it; the derivation functions do this for
/// you.
pub struct PrivateKey {
    curve: ObjectIdentifier,
    // big-endian private scalar, as stored in the SEC1 structure
    scalar: Zeroizing<Vec<u8>>,
    // SEC1-encoded public point, if the file carried one
    public: Option<Vec<u8>>,
}

/// Reads an unencrypted PEM private key from `path`.
///
/// Both `PRIVATE KEY` (PKCS#8) and `EC PRIVATE KEY` (SEC1) documents are
/// accepted. Other documents in the file, such as `EC PARAMETERS`, are
/// skipped and the first private key is loaded. The curve is **not**
/// checked here.
///
/// # Errors
///
/// * a [system](crate::ErrorKind::System) error carrying `path` if the
///   file cannot be opened or read
/// * a [cryptographic](crate::ErrorKind::Cryptographic) error if the file
///   is not PEM, is not a private key, is not an EC key or is malformed
pub fn load_private_key(path: impl AsRef<Path>) -> Result<PrivateKey, KeyError> {
    let path = path.as_ref();
    let pem = match fs::read(path) {
        Ok(pem) => Zeroizing::new(pem),
        Err(e) => {
            error_log!("unable to read private key {}: {}", path.display(), e);
            return Err(KeyError::system(path, e));
        }
    };
    let key = PrivateKey::from_pem(&pem);
    if key.is_ok() {
        debug_log!("loaded private key from {}", path.display());
    }
    key
}

/// Parses an unencrypted PEM private key held in memory.
///
/// This behaves exactly like [load_private_key] minus the file access.
pub fn load_private_key_pem(pem: &str) -> Result<PrivateKey, KeyError> {
    PrivateKey::from_pem(pem.as_bytes())
}

impl PrivateKey {
    /// Loads the first private key in a PEM file.
    ///
    /// Other documents, such as the `EC PARAMETERS` block that
    /// `openssl ecparam -genkey` writes ahead of the key, are skipped.
    fn from_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let mut skipped = None;
        for document in pem_documents(pem) {
            let label = pem_rfc7468::decode_label(document).map_err(|e| {
                error_log!("private key is not valid PEM: {}", e);
                e
            })?;
            match label {
                PKCS8_LABEL | SEC1_LABEL => return Self::from_pem_document(document),
                other => {
                    debug_log!("skipping PEM document {}", other);
                    skipped.get_or_insert(other);
                }
            }
        }
        match skipped {
            Some(label) => {
                error_log!("unsupported PEM label {}", label);
                Err(CryptoError::UnsupportedPemLabel(label.to_string()).into())
            }
            None => {
                error_log!("private key file holds no PEM document");
                Err(pem_rfc7468::Error::PreEncapsulationBoundary.into())
            }
        }
    }

    fn from_pem_document(document: &[u8]) -> Result<Self, KeyError> {
        let (label, der) = pem_rfc7468::decode_vec(document).map_err(|e| {
            error_log!("private key is not valid PEM: {}", e);
            e
        })?;
        let der = Zeroizing::new(der);
        if label == PKCS8_LABEL {
            Self::from_pkcs8_der(&der)
        } else {
            Self::from_sec1_der(&der, None)
        }
    }

    fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        let info = PrivateKeyInfo::from_der(der).map_err(pkcs8::Error::from)?;
        if info.algorithm.oid != EC_PUBLIC_KEY_OID {
            error_log!("private key algorithm {} is not EC", info.algorithm.oid);
            return Err(CryptoError::NotAnEcKey(info.algorithm.oid).into());
        }
        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|_| CryptoError::MissingCurve)?;
        Self::from_sec1_der(info.private_key, Some(curve))
    }

    /// Decodes the SEC1 `ECPrivateKey` structure. A PKCS#8 wrapper names
    /// the curve in `outer_curve`; the inner structure may repeat it.
    fn from_sec1_der(der: &[u8], outer_curve: Option<ObjectIdentifier>) -> Result<Self, KeyError> {
        let key = Sec1PrivateKey::from_der(der).map_err(sec1::Error::from)?;
        let inner_curve = key.parameters.and_then(|p| p.named_curve());

        let curve = match (outer_curve, inner_curve) {
            (Some(outer), Some(inner)) if outer != inner => {
                return Err(CryptoError::CurveMismatch(inner).into())
            }
            (Some(curve), _) | (None, Some(curve)) => curve,
            (None, None) => return Err(CryptoError::MissingCurve.into()),
        };

        if key.private_key.is_empty() {
            return Err(CryptoError::InvalidScalar.into());
        }

        Ok(Self {
            curve,
            scalar: Zeroizing::new(key.private_key.to_vec()),
            public: key.public_key.map(<[u8]>::to_vec),
        })
    }

    /// The OID of the named curve this key lives on.
    pub fn curve_oid(&self) -> ObjectIdentifier {
        self.curve
    }

    /// Whether this key claims to be on P-256.
    pub fn is_p256(&self) -> bool {
        self.curve == P256_OID
    }

    /// Checks that this is a usable P-256 key and returns it as a
    /// RustCrypto secret key.
    ///
    /// # Errors
    ///
    /// Returns a [cryptographic](crate::ErrorKind::Cryptographic) error if
    /// the key is on another curve ([CryptoError::CurveMismatch]), if the
    /// scalar is out of range, or if the file embedded a public key that
    /// does not match the scalar.
    pub fn to_p256(&self) -> Result<SecretKey, KeyError> {
        if !self.is_p256() {
            error_log!("private key is on curve {}, expected P-256", self.curve);
            return Err(CryptoError::CurveMismatch(self.curve).into());
        }
        let secret = SecretKey::from_slice(&self.scalar).map_err(|_| CryptoError::InvalidScalar)?;

        if let Some(public) = &self.public {
            let embedded = p256::PublicKey::from_sec1_bytes(public)
                .map_err(|_| CryptoError::PublicKeyMismatch)?;
            if embedded != secret.public_key() {
                return Err(CryptoError::PublicKeyMismatch.into());
            }
        }
        Ok(secret)
    }

    /// The P-256 public key belonging to this private key.
    pub fn public_key(&self) -> Result<PeerPublicKey, KeyError> {
        Ok(self.to_p256()?.public_key().into())
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

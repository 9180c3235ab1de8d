//! Errors returned by every operation in this crate.
//!
//! Failures fall into two kinds, mirroring the diagnostics an attestation
//! service usually prints: a *system* failure carries the path it happened
//! on and the OS error captured at that moment, and a *cryptographic*
//! failure carries the reason the key material was rejected.

use std::{io, path::PathBuf};

use pkcs8::ObjectIdentifier;

/// The broad category of a [KeyError].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Anything that went wrong inside the cryptographic stack: PEM or DER
    /// decoding, wrong key type, wrong curve, a point that is not on the
    /// curve, or a failed derivation.
    Cryptographic,
    /// An OS-level failure, such as a key file that does not exist or
    /// cannot be read.
    System,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cryptographic => f.write_str("cryptographic"),
            Self::System => f.write_str("system"),
        }
    }
}

/// The reason some key material was rejected.
#[derive(Debug)]
#[non_exhaustive]
pub enum CryptoError {
    /// The input was not PEM, or its base64 body was corrupt.
    Pem(pem_rfc7468::Error),
    /// The PEM label is not one of `PRIVATE KEY` or `EC PRIVATE KEY`.
    UnsupportedPemLabel(String),
    /// The `PRIVATE KEY` document could not be decoded as PKCS#8.
    Pkcs8(pkcs8::Error),
    /// The EC private key structure could not be decoded as SEC1.
    Sec1(sec1::Error),
    /// The key is a valid private key, but not an elliptic-curve one. The
    /// algorithm OID is included.
    NotAnEcKey(ObjectIdentifier),
    /// The key does not name the curve it lives on.
    MissingCurve,
    /// The key lives on a curve other than P-256. The curve OID is
    /// included.
    CurveMismatch(ObjectIdentifier),
    /// The private scalar is zero, too long, or not reduced modulo the
    /// group order.
    InvalidScalar,
    /// The public key embedded next to the private scalar does not belong
    /// to it.
    PublicKeyMismatch,
    /// The coordinates do not describe a point on P-256.
    PointNotOnCurve,
    /// A wire-format public key had the wrong length. The received length
    /// is included.
    InvalidWireLength(usize),
    /// The key agreement produced no output.
    EmptySecret,
}

impl core::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pem(_) => f.write_str("invalid PEM encoding"),
            Self::UnsupportedPemLabel(label) => {
                write!(f, "unsupported PEM label \"{label}\", expected an unencrypted private key")
            }
            Self::Pkcs8(_) => f.write_str("invalid PKCS#8 private key"),
            Self::Sec1(_) => f.write_str("invalid SEC1 EC private key"),
            Self::NotAnEcKey(oid) => write!(f, "not an EC key (algorithm {oid})"),
            Self::MissingCurve => f.write_str("EC key does not name its curve"),
            Self::CurveMismatch(oid) => write!(f, "EC key is on curve {oid}, expected P-256"),
            Self::InvalidScalar => f.write_str("invalid EC private scalar"),
            Self::PublicKeyMismatch => {
                f.write_str("embedded public key does not match the private key")
            }
            Self::PointNotOnCurve => f.write_str("point is not on the P-256 curve"),
            Self::InvalidWireLength(len) => {
                write!(f, "public key must be 64 bytes, got {len}")
            }
            Self::EmptySecret => f.write_str("key agreement produced an empty secret"),
        }
    }
}

impl std::error::Error for CryptoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pem(e) => Some(e),
            Self::Pkcs8(e) => Some(e),
            Self::Sec1(e) => Some(e),
            _ => None,
        }
    }
}

/// An error from loading, rebuilding or using a key.
#[derive(Debug)]
pub enum KeyError {
    /// The file at `path` could not be opened or read.
    System {
        /// The file the operation was working on.
        path: PathBuf,
        /// The OS error, captured when the failure happened.
        source: io::Error,
    },
    /// The key material was rejected.
    Crypto(CryptoError),
}

impl KeyError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::System { .. } => ErrorKind::System,
            Self::Crypto(_) => ErrorKind::Cryptographic,
        }
    }

    /// Returns the cryptographic cause, if this is a cryptographic error.
    pub fn crypto_cause(&self) -> Option<&CryptoError> {
        match self {
            Self::Crypto(e) => Some(e),
            Self::System { .. } => None,
        }
    }

    pub(crate) fn system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::System {
            path: path.into(),
            source,
        }
    }
}

impl core::fmt::Display for KeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::System { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Crypto(e) => write!(f, "cryptographic error: {e}"),
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::System { source, .. } => Some(source),
            Self::Crypto(e) => Some(e),
        }
    }
}

impl From<CryptoError> for KeyError {
    fn from(value: CryptoError) -> Self {
        Self::Crypto(value)
    }
}

impl From<pem_rfc7468::Error> for KeyError {
    fn from(value: pem_rfc7468::Error) -> Self {
        Self::Crypto(CryptoError::Pem(value))
    }
}

impl From<pkcs8::Error> for KeyError {
    fn from(value: pkcs8::Error) -> Self {
        Self::Crypto(CryptoError::Pkcs8(value))
    }
}

impl From<sec1::Error> for KeyError {
    fn from(value: sec1::Error) -> Self {
        Self::Crypto(CryptoError::Sec1(value))
    }
}

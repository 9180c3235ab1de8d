//! Human-readable error reports.
//!
//! Nothing here affects control flow. Callers decide success or failure
//! from each operation's own `Result`; [ErrorState] only remembers the
//! outcome of the last tracked operation so it can be printed later.

use std::io::{self, Write};

use crate::{ErrorKind, KeyError};

/// Renders `prefix: <description>` for an operation outcome.
///
/// `None` means the operation succeeded and renders as `no error`.
pub fn format_report(prefix: &str, error: Option<&KeyError>) -> String {
    match error {
        None => format!("{prefix}: no error"),
        Some(e) => format!("{prefix}: {e}"),
    }
}

/// The outcome of the last operation a caller tracked.
///
/// Each caller owns its own state, so threads never race on it. Every call
/// to [track](Self::track) overwrites the previous outcome, including
/// clearing it on success.
///
/// ```
/// use sgx_ecdh::{load_private_key, ErrorKind, ErrorState};
///
/// let mut state = ErrorState::new();
/// let result = state.track(load_private_key("/nonexistent/sp_key.pem"));
/// assert_eq!(result.unwrap_err(), ErrorKind::System);
/// assert!(state
///     .to_report("key_load_file")
///     .starts_with("key_load_file: /nonexistent/sp_key.pem: "));
/// ```
#[derive(Debug, Default)]
pub struct ErrorState {
    last: Option<KeyError>,
}

impl ErrorState {
    /// A state with no recorded error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of an operation and hands back its value.
    ///
    /// The full error stays here for [report](Self::report); the caller gets
    /// only its [ErrorKind].
    pub fn track<T>(&mut self, result: Result<T, KeyError>) -> Result<T, ErrorKind> {
        self.last = None;
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                let kind = e.kind();
                self.last = Some(e);
                Err(kind)
            }
        }
    }

    /// The kind of the last recorded error, or `None` if the last tracked
    /// operation succeeded.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.last.as_ref().map(KeyError::kind)
    }

    /// The last recorded error.
    pub fn last_error(&self) -> Option<&KeyError> {
        self.last.as_ref()
    }

    /// Forgets the last recorded error.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Renders the report line without writing it anywhere.
    pub fn to_report(&self, prefix: &str) -> String {
        format_report(prefix, self.last.as_ref())
    }

    /// Writes the report line to `out`.
    ///
    /// A cryptographic error is followed by one indented line per
    /// underlying cause.
    pub fn report(&self, prefix: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.to_report(prefix))?;
        if let Some(KeyError::Crypto(e)) = &self.last {
            let mut cause = std::error::Error::source(e);
            while let Some(c) = cause {
                writeln!(out, "    caused by: {c}")?;
                cause = c.source();
            }
        }
        Ok(())
    }

    /// Writes the report line to standard error.
    pub fn report_stderr(&self, prefix: &str) -> io::Result<()> {
        self.report(prefix, &mut io::stderr().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::CryptoError, load_private_key, load_private_key_pem, PeerPublicKey, FIELD_SIZE,
    };

    #[test]
    fn fresh_state_reports_no_error() {
        let state = ErrorState::new();
        assert_eq!(state.kind(), None);
        assert_eq!(state.to_report("key_perror"), "key_perror: no error");
    }

    #[test]
    fn success_clears_a_previous_failure() {
        let mut state = ErrorState::new();

        let bad = state.track(PeerPublicKey::from_coordinates(
            &[0u8; FIELD_SIZE],
            &[0u8; FIELD_SIZE],
        ));
        assert_eq!(bad.unwrap_err(), ErrorKind::Cryptographic);
        assert_eq!(state.kind(), Some(ErrorKind::Cryptographic));
        assert_eq!(
            state.to_report("peer"),
            "peer: cryptographic error: point is not on the P-256 curve"
        );

        let key = PeerPublicKey::from(p256::SecretKey::random(&mut rand_core::OsRng).public_key());
        let good = state.track(PeerPublicKey::try_from(&key.to_wire()));
        assert_eq!(good.unwrap(), key);
        assert_eq!(state.kind(), None);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn system_errors_keep_their_os_error() {
        let mut state = ErrorState::new();
        let missing = "/nonexistent/directory/key.pem";
        assert_eq!(
            state.track(load_private_key(missing)).unwrap_err(),
            ErrorKind::System
        );
        match state.last_error() {
            Some(KeyError::System { path, source }) => {
                assert_eq!(path.to_str(), Some(missing));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected a system error, got {other:?}"),
        }

        let mut out = Vec::new();
        state.report("load", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("load: {missing}: ")), "{text}");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn crypto_report_lists_causes() {
        let mut state = ErrorState::new();
        let _ = state.track(load_private_key_pem("definitely not PEM"));
        assert!(matches!(
            state.last_error().and_then(KeyError::crypto_cause),
            Some(CryptoError::Pem(_))
        ));

        let mut out = Vec::new();
        state.report("load", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("load: cryptographic error: invalid PEM encoding")
        );
        assert!(lines.next().unwrap().starts_with("    caused by: "));

        state.clear();
        assert_eq!(state.to_report("load"), "load: no error");
        assert!(state.report_stderr("load").is_ok());
    }
}

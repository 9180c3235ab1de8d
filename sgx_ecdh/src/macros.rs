//! Logging macros.

/// Puts out an error message when the "logging" feature is enabled.
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        tracing::error!($($arg)*);
    }};
}

/// Puts out a debug message when the "logging" feature is enabled.
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        tracing::debug!($($arg)*);
    }};
}

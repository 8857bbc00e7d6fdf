//! Error types for the RustyAWS core.

/// Core error type for configuration and request-model failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The URL scheme is neither `http` nor `https`.
    #[error("unsupported URL scheme: {0:?} (expected \"http\" or \"https\")")]
    UnsupportedScheme(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

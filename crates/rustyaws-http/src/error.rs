//! Error types for sending requests.
//!
//! [`TransportError`] covers failures to talk to the remote peer at all. Its
//! [`ErrorKind`] is assigned where the failure is first observed, so deciding
//! whether to retry is a plain tag match. [`ConnError`] adds the validation and
//! signing failures raised before anything is sent.

use rustyaws_auth::AuthError;
use rustyaws_core::CoreError;

/// Boxed error used as the underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Classification of a failure to communicate with the remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The peer closed an established connection while we were writing.
    BrokenPipe,
    /// The connection ended before a complete response was read.
    UnexpectedEof,
    /// Any other failure (DNS, connection refused, TLS, ...).
    Other,
}

impl ErrorKind {
    /// Whether a request that failed this way is worth re-sending immediately.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::BrokenPipe | Self::UnexpectedEof)
    }
}

/// Errors raised by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport was configured with an unusable scheme.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// The underlying HTTP client could not be created.
    #[error("building HTTP client: {0}")]
    Client(#[source] BoxError),

    /// The request cannot be expressed as HTTP.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request could not be delivered or its response could not be read.
    #[error("sending request to {host} ({kind:?}): {source}")]
    Io {
        /// Host the request was addressed to.
        host: String,
        /// Classification used by the retry policy.
        kind: ErrorKind,
        /// The underlying cause.
        #[source]
        source: BoxError,
    },
}

impl TransportError {
    /// Create an I/O-level error for `host`.
    pub fn io(host: impl Into<String>, kind: ErrorKind, source: impl Into<BoxError>) -> Self {
        Self::Io {
            host: host.into(),
            kind,
            source: source.into(),
        }
    }

    /// The failure classification; [`ErrorKind::Other`] for non-I/O errors.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { kind, .. } => *kind,
            _ => ErrorKind::Other,
        }
    }

    /// Whether the request should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }
}

/// Errors raised by [`SimpleDbConn`](crate::SimpleDbConn) and
/// [`S3Conn`](crate::S3Conn).
#[derive(Debug, thiserror::Error)]
pub enum ConnError {
    /// A caller-supplied parameter name or value failed validation.
    #[error("invalid parameter {name:?}: {source}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why it was rejected.
        #[source]
        source: AuthError,
    },

    /// The caller supplied a parameter whose name is reserved for signing.
    #[error("parameter {0:?} is reserved")]
    ReservedParameter(String),

    /// Signing the request failed.
    #[error("signing request: {0}")]
    Sign(#[source] AuthError),

    /// Sending the request failed.
    #[error("sending request: {0}")]
    Transport(#[from] TransportError),
}

//! Error types for validation and signing.
//!
//! All failures in this crate are represented by [`AuthError`]. None of them are
//! retried: they indicate bad input or a caller bug.

/// Errors that can occur while validating, canonicalizing, or signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The value is longer than the service accepts.
    #[error("value is {len} bytes long; the maximum is {max} bytes")]
    ValueTooLong {
        /// Length of the rejected value in bytes.
        len: usize,
        /// The limit that was exceeded.
        max: usize,
    },

    /// The value is not valid UTF-8.
    #[error("value is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The value contains a code point that is not a legal XML 1.0 character.
    #[error("value contains illegal character U+{codepoint:04X}")]
    IllegalCharacter {
        /// The offending Unicode code point.
        codepoint: u32,
    },

    /// A header required by the string to sign is absent.
    #[error("missing required header: {0}")]
    MissingHeader(String),

    /// Building the string to sign failed.
    #[error("computing string to sign: {0}")]
    StringToSign(#[source] Box<AuthError>),
}

//! Validation for item names, attribute names, and attribute values.
//!
//! SimpleDB stores values as XML text, so every value must be at most
//! [`MAX_VALUE_BYTES`] bytes of UTF-8 and consist only of characters that are
//! legal in an XML 1.0 document:
//!
//! ```text
//! #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
//! ```
//!
//! The empty string is always legal; callers needing non-empty values check that
//! themselves.

use crate::error::AuthError;

/// Maximum length of a value in bytes.
pub const MAX_VALUE_BYTES: usize = 1024;

/// Validate a string before it is allowed into a request.
///
/// # Errors
///
/// Returns [`AuthError::ValueTooLong`] if the value is longer than
/// [`MAX_VALUE_BYTES`] bytes, or [`AuthError::IllegalCharacter`] naming the
/// first code point outside the legal XML character ranges.
///
/// # Examples
///
/// ```
/// use rustyaws_auth::validate_value;
///
/// assert!(validate_value("").is_ok());
/// assert!(validate_value("taco").is_ok());
/// assert!(validate_value("abc\u{0}def").is_err());
/// ```
pub fn validate_value(value: &str) -> Result<(), AuthError> {
    if value.len() > MAX_VALUE_BYTES {
        return Err(AuthError::ValueTooLong {
            len: value.len(),
            max: MAX_VALUE_BYTES,
        });
    }

    match value.chars().find(|c| !is_legal_xml_char(*c)) {
        Some(c) => Err(AuthError::IllegalCharacter {
            codepoint: u32::from(c),
        }),
        None => Ok(()),
    }
}

/// Validate raw bytes, additionally rejecting anything that is not UTF-8.
///
/// # Errors
///
/// Returns [`AuthError::InvalidUtf8`] for malformed input, otherwise the same
/// errors as [`validate_value`].
pub fn validate_bytes(value: &[u8]) -> Result<(), AuthError> {
    if value.len() > MAX_VALUE_BYTES {
        return Err(AuthError::ValueTooLong {
            len: value.len(),
            max: MAX_VALUE_BYTES,
        });
    }
    validate_value(std::str::from_utf8(value)?)
}

fn is_legal_xml_char(c: char) -> bool {
    matches!(
        u32::from(c),
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x1_0000..=0x10_FFFF
    )
}

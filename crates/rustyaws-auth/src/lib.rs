//! Request authentication for the RustyAWS SimpleDB and S3 clients.
//!
//! This crate produces byte-exact, signed requests:
//!
//! 1. Every caller-supplied name and value is checked by [`validate_value`].
//! 2. The parameter set is canonicalized into a sorted, percent-encoded body
//!    ([`assemble_post_body`]) and a string to sign ([`compute_string_to_sign`]).
//! 3. A signer computes `Base64(HMAC-SHA1(secret, string_to_sign))` and attaches
//!    it to the request: as the `Signature` parameter ([`SimpleDbSigner`]) or
//!    in the `Authorization` header ([`S3Signer`]).
//!
//! # Usage
//!
//! ```rust
//! use rustyaws_auth::{SimpleDbSigner, validate_value};
//! use rustyaws_core::{AccessKey, Request};
//!
//! let signer = SimpleDbSigner::for_host(AccessKey::new("AKID", "secret"), "sdb.amazonaws.com");
//!
//! let mut req = Request::new();
//! validate_value("my-domain").unwrap();
//! req.insert("DomainName".to_owned(), "my-domain".to_owned());
//! signer.sign(&mut req).unwrap();
//! assert!(req.contains_key("Signature"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical POST body and string-to-sign construction
//! - [`error`] - Authentication error types
//! - [`sigv2`] - HMAC-SHA1 signers and the [`Canonicalizer`] capability
//! - [`validation`] - Length and XML character-set checks for values

pub mod canonical;
pub mod error;
pub mod sigv2;
pub mod validation;

pub use canonical::{assemble_post_body, compute_string_to_sign};
pub use error::AuthError;
pub use sigv2::{
    Canonicalizer, S3Canonicalizer, S3Signer, SIGNATURE_PARAM, SimpleDbCanonicalizer,
    SimpleDbSigner, compute_signature,
};
pub use validation::{MAX_VALUE_BYTES, validate_bytes, validate_value};

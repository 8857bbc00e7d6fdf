//! AWS Signature Version 2 signing (HMAC-SHA1).
//!
//! Both supported services sign with
//! `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))` and differ only in
//! how the string to sign is built and where the signature is placed:
//!
//! - SimpleDB: [`SimpleDbCanonicalizer`] (`POST\nhost\n/\nquery`), signature
//!   stored in the `Signature` request parameter by [`SimpleDbSigner`].
//! - S3: [`S3Canonicalizer`] (below), signature stored in the `Authorization`
//!   header as `AWS <AccessKeyId>:<Signature>` by [`S3Signer`].
//!
//! ```text
//! StringToSign(S3) = HTTP-Verb + "\n" +
//!                    Content-MD5 + "\n" +
//!                    Content-Type + "\n" +
//!                    Date + "\n" +
//!                    CanonicalizedAmzHeaders +   (always empty here)
//!                    Path
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use rustyaws_core::{AccessKey, HttpRequest, Request};
use sha1::Sha1;
use tracing::debug;

use crate::canonical::compute_string_to_sign;
use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;

/// Name of the request parameter that carries a SimpleDB signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Builds the string to sign for a request of type `R`.
///
/// The production implementations are [`SimpleDbCanonicalizer`] and
/// [`S3Canonicalizer`]; tests substitute their own.
pub trait Canonicalizer<R: ?Sized>: Send + Sync {
    /// Derive the string to sign for `req`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the request lacks something the string to
    /// sign requires.
    fn string_to_sign(&self, req: &R) -> Result<String, AuthError>;
}

/// String-to-sign builder for query-style requests sent to a fixed host.
#[derive(Debug, Clone)]
pub struct SimpleDbCanonicalizer {
    host: String,
}

impl SimpleDbCanonicalizer {
    /// Create a canonicalizer for requests sent to `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl Canonicalizer<Request> for SimpleDbCanonicalizer {
    fn string_to_sign(&self, req: &Request) -> Result<String, AuthError> {
        Ok(compute_string_to_sign(req, &self.host))
    }
}

/// String-to-sign builder for S3 requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Canonicalizer;

impl Canonicalizer<HttpRequest> for S3Canonicalizer {
    fn string_to_sign(&self, req: &HttpRequest) -> Result<String, AuthError> {
        let date = req
            .header("date")
            .ok_or_else(|| AuthError::MissingHeader("Date".to_owned()))?;
        let content_md5 = req.header("content-md5").unwrap_or_default();
        let content_type = req.header("content-type").unwrap_or_default();

        Ok(format!(
            "{}\n{content_md5}\n{content_type}\n{date}\n\n{}",
            req.verb, req.path
        ))
    }
}

/// Signs query-style requests by adding a `Signature` parameter.
///
/// Stateless after construction, so one signer can be shared across tasks.
#[derive(Debug, Clone)]
pub struct SimpleDbSigner<C = SimpleDbCanonicalizer> {
    key: AccessKey,
    canonicalizer: C,
}

impl SimpleDbSigner {
    /// Create a signer for requests sent to `host`.
    pub fn for_host(key: AccessKey, host: impl Into<String>) -> Self {
        Self::new(key, SimpleDbCanonicalizer::new(host))
    }
}

impl<C: Canonicalizer<Request>> SimpleDbSigner<C> {
    /// Create a signer with a custom canonicalizer.
    pub fn new(key: AccessKey, canonicalizer: C) -> Self {
        Self { key, canonicalizer }
    }

    /// The access key this signer signs with.
    #[must_use]
    pub fn access_key(&self) -> &AccessKey {
        &self.key
    }

    /// Sign `req` in place.
    ///
    /// A `Signature` left over from an earlier signing is not part of the
    /// canonical form, so re-signing unchanged parameters yields the same
    /// value. No other parameter is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StringToSign`] wrapping the canonicalizer's error.
    pub fn sign(&self, req: &mut Request) -> Result<(), AuthError> {
        req.remove(SIGNATURE_PARAM);

        let string_to_sign = self
            .canonicalizer
            .string_to_sign(req)
            .map_err(|e| AuthError::StringToSign(Box::new(e)))?;

        debug!(
            access_key_id = %self.key.id(),
            string_to_sign = ?string_to_sign,
            "Built SimpleDB string to sign"
        );

        let signature = compute_signature(self.key.secret(), &string_to_sign);
        req.insert(SIGNATURE_PARAM.to_owned(), signature);
        Ok(())
    }
}

/// Signs S3 requests by setting the `Authorization` header.
#[derive(Debug, Clone)]
pub struct S3Signer<C = S3Canonicalizer> {
    key: AccessKey,
    canonicalizer: C,
}

impl S3Signer {
    /// Create a signer using the standard S3 string to sign.
    #[must_use]
    pub fn for_key(key: AccessKey) -> Self {
        Self::new(key, S3Canonicalizer)
    }
}

impl<C: Canonicalizer<HttpRequest>> S3Signer<C> {
    /// Create a signer with a custom canonicalizer.
    pub fn new(key: AccessKey, canonicalizer: C) -> Self {
        Self { key, canonicalizer }
    }

    /// Sign `req` in place by writing `Authorization: AWS <id>:<signature>`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StringToSign`] wrapping the canonicalizer's error,
    /// e.g. when the `Date` header is missing.
    pub fn sign(&self, req: &mut HttpRequest) -> Result<(), AuthError> {
        let string_to_sign = self
            .canonicalizer
            .string_to_sign(req)
            .map_err(|e| AuthError::StringToSign(Box::new(e)))?;

        debug!(
            access_key_id = %self.key.id(),
            string_to_sign = ?string_to_sign,
            "Built S3 string to sign"
        );

        let signature = compute_signature(self.key.secret(), &string_to_sign);
        req.set_header("authorization", format!("AWS {}:{signature}", self.key.id()));
        Ok(())
    }
}

/// Compute the signature: `Base64(HMAC-SHA1(secret, string_to_sign))`.
#[must_use]
pub fn compute_signature(secret_key: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    let result = mac.finalize().into_bytes();
    BASE64.encode(result)
}

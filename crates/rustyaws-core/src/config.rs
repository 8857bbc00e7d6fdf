//! Client configuration.
//!
//! Provides [`ClientConfig`] for configuring the SimpleDB and S3 connections.
//! Values are loaded from environment variables, falling back to the public
//! AWS endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

use crate::credentials::AccessKey;
use crate::error::CoreResult;
use crate::types::Scheme;

/// Default number of attempts made for a request that keeps failing transiently.
const DEFAULT_MAX_TRIES: usize = 3;

/// Client configuration.
///
/// # Examples
///
/// ```
/// use rustyaws_core::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .access_key_id("AKID".to_owned())
///     .secret_access_key("secret".to_owned())
///     .scheme("http".to_owned())
///     .simpledb_host("localhost:8080".to_owned())
///     .build();
/// assert_eq!(config.max_tries, 3);
/// assert_eq!(config.access_key().id(), "AKID");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// AWS access key id.
    #[builder(default)]
    pub access_key_id: String,

    /// AWS secret access key.
    #[builder(default)]
    pub secret_access_key: String,

    /// URL scheme used for both endpoints (`http` or `https`).
    #[builder(default = String::from("https"))]
    pub scheme: String,

    /// Host (optionally with port) of the SimpleDB endpoint.
    #[builder(default = String::from("sdb.amazonaws.com"))]
    pub simpledb_host: String,

    /// Host (optionally with port) of the S3 endpoint.
    #[builder(default = String::from("s3.amazonaws.com"))]
    pub s3_host: String,

    /// Maximum number of attempts for a transiently failing request.
    #[builder(default = DEFAULT_MAX_TRIES)]
    pub max_tries: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            scheme: String::from("https"),
            simpledb_host: String::from("sdb.amazonaws.com"),
            s3_host: String::from("s3.amazonaws.com"),
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("simpledb_host", &self.simpledb_host)
            .field("s3_host", &self.s3_host)
            .field("max_tries", &self.max_tries)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AWS_ACCESS_KEY_ID` | *(empty)* |
    /// | `AWS_SECRET_ACCESS_KEY` | *(empty)* |
    /// | `AWS_SCHEME` | `https` |
    /// | `SIMPLEDB_HOST` | `sdb.amazonaws.com` |
    /// | `S3_HOST` | `s3.amazonaws.com` |
    /// | `AWS_MAX_TRIES` | `3` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("AWS_ACCESS_KEY_ID") {
            config.access_key_id = v;
        }
        if let Ok(v) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            config.secret_access_key = v;
        }
        if let Ok(v) = std::env::var("AWS_SCHEME") {
            config.scheme = v;
        }
        if let Ok(v) = std::env::var("SIMPLEDB_HOST") {
            config.simpledb_host = v;
        }
        if let Ok(v) = std::env::var("S3_HOST") {
            config.s3_host = v;
        }
        if let Ok(v) = std::env::var("AWS_MAX_TRIES") {
            match v.parse() {
                Ok(n) => config.max_tries = n,
                Err(_) => warn!(value = %v, "ignoring invalid AWS_MAX_TRIES"),
            }
        }

        config
    }

    /// The configured credentials as an [`AccessKey`].
    #[must_use]
    pub fn access_key(&self) -> AccessKey {
        AccessKey::new(self.access_key_id.clone(), self.secret_access_key.clone())
    }

    /// Parse the configured scheme.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::UnsupportedScheme`] for anything other than
    /// `http` or `https`.
    pub fn scheme(&self) -> CoreResult<Scheme> {
        self.scheme.parse()
    }

    /// The attempt bound, never less than one.
    #[must_use]
    pub fn max_tries(&self) -> usize {
        self.max_tries.max(1)
    }
}

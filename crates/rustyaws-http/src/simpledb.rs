//! Signed SimpleDB connection.
//!
//! A SimpleDB call is a form-encoded `POST /` whose body carries the action, its
//! parameters, and the Signature Version 2 common parameters:
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `Action` | the API action |
//! | `AWSAccessKeyId` | the access key id |
//! | `SignatureMethod` | `HmacSHA1` |
//! | `SignatureVersion` | `2` |
//! | `Timestamp` | UTC, `YYYY-MM-DDTHH:MM:SSZ` |
//! | `Version` | `2009-04-15` |
//! | `Signature` | added last, by the signer |

use chrono::{DateTime, Utc};
use rustyaws_auth::canonical::{POST_PATH, POST_VERB};
use rustyaws_auth::{SIGNATURE_PARAM, SimpleDbSigner, assemble_post_body, validate_value};
use rustyaws_core::{AccessKey, ClientConfig, HttpRequest, HttpResponse, Request};
use tracing::debug;

use crate::error::ConnError;
use crate::retry::RetryingTransport;
use crate::transport::{HttpTransport, Transport};

/// SimpleDB API version sent with every request.
pub const API_VERSION: &str = "2009-04-15";

/// Content type of every SimpleDB request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

const SIGNATURE_METHOD: &str = "HmacSHA1";
const SIGNATURE_VERSION: &str = "2";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A connection that validates, signs, and sends SimpleDB requests.
#[derive(Debug)]
pub struct SimpleDbConn<T = RetryingTransport<HttpTransport>> {
    signer: SimpleDbSigner,
    transport: T,
}

impl SimpleDbConn {
    /// Connect to the SimpleDB endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnError::Transport`] if the configured scheme is unsupported
    /// or the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConnError> {
        let transport = HttpTransport::new(&config.scheme, config.simpledb_host.clone())?;
        Ok(Self::new(
            config.access_key(),
            config.simpledb_host.clone(),
            RetryingTransport::with_max_tries(transport, config.max_tries()),
        ))
    }
}

impl<T: Transport> SimpleDbConn<T> {
    /// Create a connection that signs for `host` and sends through `transport`.
    ///
    /// `host` must be the host the transport actually connects to, since it is
    /// part of the signed string.
    pub fn new(key: AccessKey, host: impl Into<String>, transport: T) -> Self {
        Self {
            signer: SimpleDbSigner::for_host(key, host),
            transport,
        }
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, complete, and sign `params` for `action`, producing the HTTP
    /// request to send.
    ///
    /// Caller-supplied common parameters (other than `Action`) are kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`ConnError::ReservedParameter`] if `params` contains
    /// `Signature`, [`ConnError::InvalidParameter`] if `action` or any name or
    /// value fails validation, or [`ConnError::Sign`] if signing fails.
    pub fn build_request(
        &self,
        action: &str,
        mut params: Request,
        now: DateTime<Utc>,
    ) -> Result<HttpRequest, ConnError> {
        if params.contains_key(SIGNATURE_PARAM) {
            return Err(ConnError::ReservedParameter(SIGNATURE_PARAM.to_owned()));
        }
        for (name, value) in &params {
            validate_value(name)
                .and_then(|()| validate_value(value))
                .map_err(|source| ConnError::InvalidParameter {
                    name: name.clone(),
                    source,
                })?;
        }
        validate_value(action).map_err(|source| ConnError::InvalidParameter {
            name: "Action".to_owned(),
            source,
        })?;

        let key = self.signer.access_key();
        params.insert("Action".to_owned(), action.to_owned());
        let defaults = [
            ("AWSAccessKeyId", key.id().to_owned()),
            ("SignatureMethod", SIGNATURE_METHOD.to_owned()),
            ("SignatureVersion", SIGNATURE_VERSION.to_owned()),
            ("Timestamp", now.format(TIMESTAMP_FORMAT).to_string()),
            ("Version", API_VERSION.to_owned()),
        ];
        for (name, value) in defaults {
            params.entry(name.to_owned()).or_insert(value);
        }

        self.signer.sign(&mut params).map_err(ConnError::Sign)?;

        Ok(HttpRequest::new(POST_VERB, POST_PATH)
            .with_header("Content-Type", FORM_CONTENT_TYPE)
            .with_body(assemble_post_body(&params)))
    }

    /// Sign and send a request for `action` with the given parameters.
    ///
    /// The response is returned whatever its status code; parsing it is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`SimpleDbConn::build_request`], or
    /// [`ConnError::Transport`] once the transport gives up.
    pub async fn send_request(
        &self,
        action: &str,
        params: Request,
    ) -> Result<HttpResponse, ConnError> {
        let req = self.build_request(action, params, Utc::now())?;
        debug!(action, body_len = req.body.len(), "Sending SimpleDB request");
        Ok(self.transport.send_request(&req).await?)
    }
}

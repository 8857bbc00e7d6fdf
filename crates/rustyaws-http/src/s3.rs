//! Signed S3 connection.
//!
//! S3 requests keep their own verb, path, headers, and body. The connection
//! stamps a `Date` header when the caller has not set one, signs the request
//! into the `Authorization` header, and sends it through the retrying
//! transport.

use chrono::{DateTime, Utc};
use rustyaws_auth::S3Signer;
use rustyaws_core::{AccessKey, ClientConfig, HttpRequest, HttpResponse};
use tracing::debug;

use crate::error::ConnError;
use crate::retry::RetryingTransport;
use crate::transport::{HttpTransport, Transport};

/// RFC 1123 date format used in the `Date` header.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A connection that signs and sends S3 requests.
#[derive(Debug)]
pub struct S3Conn<T = RetryingTransport<HttpTransport>> {
    signer: S3Signer,
    transport: T,
}

impl S3Conn {
    /// Connect to the S3 endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnError::Transport`] if the configured scheme is unsupported
    /// or the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConnError> {
        let transport = HttpTransport::new(&config.scheme, config.s3_host.clone())?;
        Ok(Self::new(
            config.access_key(),
            RetryingTransport::with_max_tries(transport, config.max_tries()),
        ))
    }
}

impl<T: Transport> S3Conn<T> {
    /// Create a connection that signs with `key` and sends through `transport`.
    pub fn new(key: AccessKey, transport: T) -> Self {
        Self {
            signer: S3Signer::for_key(key),
            transport,
        }
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stamp `Date` (if absent) and sign `req`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnError::Sign`] if signing fails.
    pub fn prepare(
        &self,
        mut req: HttpRequest,
        now: DateTime<Utc>,
    ) -> Result<HttpRequest, ConnError> {
        if req.header("date").is_none() {
            req.set_header("Date", now.format(HTTP_DATE_FORMAT).to_string());
        }
        self.signer.sign(&mut req).map_err(ConnError::Sign)?;
        Ok(req)
    }

    /// Sign and send `req`, returning the response whatever its status code.
    ///
    /// # Errors
    ///
    /// Returns [`ConnError::Sign`] if signing fails, or [`ConnError::Transport`]
    /// once the transport gives up.
    pub async fn send_request(&self, req: HttpRequest) -> Result<HttpResponse, ConnError> {
        let req = self.prepare(req, Utc::now())?;
        debug!(verb = %req.verb, path = %req.path, "Sending S3 request");
        Ok(self.transport.send_request(&req).await?)
    }
}

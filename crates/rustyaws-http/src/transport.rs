//! Sending requests over HTTP.
//!
//! [`Transport`] is the seam between request assembly and the network. The
//! production implementation, [`HttpTransport`], is bound to one scheme and host
//! at construction time and performs exactly one exchange per call: no retries
//! and no interpretation of status codes.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::io;

use async_trait::async_trait;
use rustyaws_core::{HttpRequest, HttpResponse, Scheme};
use tracing::debug;

use crate::error::{ErrorKind, TransportError};

/// Sends an assembled request and returns whatever the peer answered.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `req` and return the raw response.
    ///
    /// A response with any status code is `Ok`; errors are reserved for
    /// failures to communicate with the peer.
    async fn send_request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A [`Transport`] backed by a `reqwest` client, bound to one scheme and host.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    scheme: Scheme,
    host: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `scheme://host`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] naming the scheme if it is neither
    /// `http` nor `https`, or [`TransportError::Client`] if the HTTP client
    /// cannot be initialized.
    pub fn new(scheme: &str, host: impl Into<String>) -> Result<Self, TransportError> {
        let scheme: Scheme = scheme.parse()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Client(Box::new(e)))?;

        Ok(Self {
            scheme,
            host: host.into(),
            client,
        })
    }

    /// The scheme requests are sent with.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The host (and optional port) requests are sent to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}://{}{path}", self.scheme, self.host)
    }

    fn io_error(&self, err: reqwest::Error) -> TransportError {
        let kind = classify_error(&err);
        TransportError::io(self.host.clone(), kind, err)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = reqwest::Method::from_bytes(req.verb.as_bytes())
            .map_err(|_| TransportError::InvalidRequest(format!("bad HTTP verb {:?}", req.verb)))?;
        let url = self.url(&req.path);

        debug!(verb = %req.verb, url = %url, body_len = req.body.len(), "Sending request");

        let mut builder = self.client.request(method, &url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(req.body.clone())
            .send()
            .await
            .map_err(|e| self.io_error(e))?;

        let status_code = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();

        let body = response.bytes().await.map_err(|e| self.io_error(e))?;

        debug!(status = status_code, body_len = body.len(), "Received response");

        Ok(HttpResponse {
            status_code,
            headers,
            body,
        })
    }
}

/// Classify a low-level failure by walking its source chain.
///
/// An `io::Error` of kind `BrokenPipe` maps to [`ErrorKind::BrokenPipe`]. An
/// `io::Error` of kind `UnexpectedEof`, or an HTTP parser error reporting that
/// the connection closed mid-message, maps to [`ErrorKind::UnexpectedEof`].
/// Everything else is [`ErrorKind::Other`].
#[must_use]
pub fn classify_error(err: &(dyn StdError + 'static)) -> ErrorKind {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::BrokenPipe => return ErrorKind::BrokenPipe,
                io::ErrorKind::UnexpectedEof => return ErrorKind::UnexpectedEof,
                _ => {}
            }
        }
        if let Some(hyper_err) = e.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() {
                return ErrorKind::UnexpectedEof;
            }
        }
        current = e.source();
    }
    ErrorKind::Other
}

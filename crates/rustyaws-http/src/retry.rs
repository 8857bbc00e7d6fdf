//! Immediate retry of transiently failing requests.
//!
//! [`RetryingTransport`] forwards each request to an inner [`Transport`]. When an
//! attempt fails with a transient error ([`ErrorKind::BrokenPipe`] or
//! [`ErrorKind::UnexpectedEof`]) and attempts remain, the full request is sent
//! again straight away, with no backoff. Any other outcome, including a
//! response with an error status code, ends the loop and is returned as is.
//!
//! Retries are not transactional: callers must only send requests that are
//! safe to repeat.
//!
//! [`ErrorKind::BrokenPipe`]: crate::ErrorKind::BrokenPipe
//! [`ErrorKind::UnexpectedEof`]: crate::ErrorKind::UnexpectedEof

use async_trait::async_trait;
use rustyaws_core::{HttpRequest, HttpResponse};
use tracing::warn;

use crate::error::TransportError;
use crate::transport::Transport;

/// Number of attempts made by [`RetryingTransport::new`].
pub const DEFAULT_MAX_TRIES: usize = 3;

/// A [`Transport`] decorator that retries transient failures.
#[derive(Debug, Clone)]
pub struct RetryingTransport<T> {
    inner: T,
    max_tries: usize,
}

impl<T: Transport> RetryingTransport<T> {
    /// Wrap `inner`, making at most [`DEFAULT_MAX_TRIES`] attempts per request.
    pub fn new(inner: T) -> Self {
        Self::with_max_tries(inner, DEFAULT_MAX_TRIES)
    }

    /// Wrap `inner`, making at most `max_tries` attempts (at least one).
    pub fn with_max_tries(inner: T, max_tries: usize) -> Self {
        Self {
            inner,
            max_tries: max_tries.max(1),
        }
    }

    /// The wrapped transport.
    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The attempt bound.
    #[must_use]
    pub fn max_tries(&self) -> usize {
        self.max_tries
    }
}

#[async_trait]
impl<T: Transport> Transport for RetryingTransport<T> {
    async fn send_request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut attempt = 0;
        loop {
            let result = self.inner.send_request(req).await;
            if let Err(err) = &result {
                if err.is_transient() && attempt + 1 < self.max_tries {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_tries = self.max_tries,
                        kind = ?err.kind(),
                        error = %err,
                        "Transient transport failure, retrying"
                    );
                    continue;
                }
            }
            return result;
        }
    }
}

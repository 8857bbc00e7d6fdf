//! HTTP delivery for the RustyAWS SimpleDB and S3 clients.
//!
//! This crate sends signed requests and tolerates a narrow class of transient
//! network failures:
//!
//! 1. [`HttpTransport`] sends an [`HttpRequest`](rustyaws_core::HttpRequest) to a
//!    fixed scheme and host and returns the raw status and body. Any status code
//!    is a successful outcome; only failures to communicate are errors.
//! 2. [`RetryingTransport`] decorates any [`Transport`] and immediately re-sends a
//!    request whose failure was classified as transient (broken pipe or
//!    unexpected end of file), up to a fixed number of attempts.
//! 3. [`SimpleDbConn`] and [`S3Conn`] validate, sign, and send requests through a
//!    retrying transport.
//!
//! # Modules
//!
//! - [`error`] - Transport and connection error types
//! - [`retry`] - The retrying transport decorator
//! - [`s3`] - Signed S3 connection
//! - [`simpledb`] - Signed SimpleDB connection
//! - [`transport`] - The [`Transport`] trait and its reqwest-backed implementation

pub mod error;
pub mod retry;
pub mod s3;
pub mod simpledb;
pub mod transport;

pub use error::{BoxError, ConnError, ErrorKind, TransportError};
pub use retry::{DEFAULT_MAX_TRIES, RetryingTransport};
pub use s3::S3Conn;
pub use simpledb::SimpleDbConn;
pub use transport::{HttpTransport, Transport, classify_error};

//! Core types and configuration shared by the RustyAWS client crates.
//!
//! This crate holds the pieces every other layer needs: the [`AccessKey`]
//! credential pair, the flat parameter map used by query-style APIs
//! ([`Request`]), the transport-level [`HttpRequest`] / [`HttpResponse`]
//! pair, and the environment-driven [`ClientConfig`].

mod config;
mod credentials;
mod error;
mod types;

pub use config::ClientConfig;
pub use credentials::AccessKey;
pub use error::{CoreError, CoreResult};
pub use types::{HttpRequest, HttpResponse, Request, Scheme};

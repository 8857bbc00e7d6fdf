//! Canonical form construction for query-style (SimpleDB) requests.
//!
//! A request is a flat, unordered set of parameters. Its canonical form is:
//!
//! ```text
//! POST\n
//! lowercase(Host)\n
//! /\n
//! CanonicalQueryString
//! ```
//!
//! where the canonical query string is the parameters sorted by key (byte-wise),
//! each key and value percent-encoded independently, joined as `key=value` with
//! `&`. The same string is sent verbatim as the POST body.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rustyaws_core::Request;

/// Verb used for every query-style request.
pub const POST_VERB: &str = "POST";

/// Path used for every query-style request.
pub const POST_PATH: &str = "/";

/// The set of characters that must be percent-encoded in keys and values.
///
/// Everything except the RFC 3986 unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`) is encoded, so a space becomes `%20`
/// and every byte of a multi-byte UTF-8 sequence is escaped in upper-case hex.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the `application/x-www-form-urlencoded` body for a request.
///
/// Parameters are sorted by key using byte-wise comparison, so the result does
/// not depend on the order in which they were inserted.
///
/// # Examples
///
/// ```
/// use rustyaws_auth::assemble_post_body;
/// use rustyaws_core::Request;
///
/// let mut req = Request::new();
/// req.insert("b".to_owned(), "c d".to_owned());
/// req.insert("a".to_owned(), "1".to_owned());
/// assert_eq!(assemble_post_body(&req), "a=1&b=c%20d");
/// assert_eq!(assemble_post_body(&Request::new()), "");
/// ```
#[must_use]
pub fn assemble_post_body(req: &Request) -> String {
    let mut params: Vec<(&str, &str)> = req
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    params.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    params
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string to sign for a query-style request sent to `host`.
///
/// The result always contains exactly three newlines, even when the query
/// component is empty.
///
/// # Examples
///
/// ```
/// use rustyaws_auth::compute_string_to_sign;
/// use rustyaws_core::Request;
///
/// assert_eq!(
///     compute_string_to_sign(&Request::new(), "SoMe_HoSt.cOm"),
///     "POST\nsome_host.com\n/\n"
/// );
/// ```
#[must_use]
pub fn compute_string_to_sign(req: &Request, host: &str) -> String {
    let host = host.to_ascii_lowercase();
    let query = assemble_post_body(req);

    format!("{POST_VERB}\n{host}\n{POST_PATH}\n{query}")
}

/// Percent-encode a single key or value.
fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

//! HTTP transport used by the bridge to reach the GraphQL endpoint.
//!
//! The bridge never talks to `reqwest` directly. It depends on the
//! [`HttpTransport`] trait so the hosting framework can supply its own client
//! (with its own timeout and retry policy), and tests can substitute a canned
//! response.
//!
//! - [`HttpTransport`] - the collaborator contract: one POST, raw bytes back
//! - [`ReqwestTransport`] - default implementation over `reqwest::Client`
//! - [`TransportError`] - failures surfaced by any transport

mod client;

use std::future::Future;

use thiserror::Error;

pub use client::{http_client, ReqwestTransport, MAX_RESPONSE_SIZE};

/// Errors produced while performing the HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Response body exceeded the size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// A header could not be encoded
    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
}

/// Performs a single POST request and returns the raw response body.
///
/// Implementations own every transport policy (timeouts, status handling,
/// retries). The bridge propagates whatever error they return.
pub trait HttpTransport {
    /// POSTs `body` to `url` with the given `(name, value)` headers.
    fn post(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by [`ApNewsBridge::fetch_feed`](super::ApNewsBridge::fetch_feed).
///
/// A failed fetch never yields partial results.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The query payload could not be serialized
    #[error("Failed to encode feed request: {0}")]
    EncodeRequest(#[source] serde_json::Error),
    /// The transport failed to deliver a response
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The body was not JSON, or its structure did not match the query
    #[error("Malformed response from endpoint: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    /// The feed had no items for this topic
    #[error("Topic not found or no articles for: {topic}")]
    NotFound { topic: String },
}

impl BridgeError {
    /// True for errors caused by the user's topic choice rather than the provider.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BridgeError::NotFound { .. })
    }
}

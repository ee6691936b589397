//! Error types for the upstream todo client.
//!
//! # Design
//! Non-2xx statuses are split by class because callers treat them
//! differently: 4xx is always handed back to the client, 5xx is recoverable
//! for the by-category listing only. Everything else that is not a success
//! lands in `UnexpectedStatus`. Raw status and body are kept for the gateway
//! to relay or log.

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream answered 5xx.
    #[error("upstream unavailable (HTTP {status}): {body}")]
    UpstreamUnavailable { status: u16, body: String },

    /// The upstream answered 4xx.
    #[error("upstream rejected request (HTTP {status}): {body}")]
    UpstreamClientError { status: u16, body: String },

    /// A non-2xx status outside the 4xx and 5xx ranges.
    #[error("unexpected upstream status (HTTP {status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let body = response.body.clone();
        if response.is_server_error() {
            ApiError::UpstreamUnavailable { status, body }
        } else if response.is_client_error() {
            ApiError::UpstreamClientError { status, body }
        } else {
            ApiError::UnexpectedStatus { status, body }
        }
    }

    /// Upstream status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UpstreamUnavailable { status, .. }
            | ApiError::UpstreamClientError { status, .. }
            | ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => None,
        }
    }
}

//! Gateway errors and their mapping onto inbound HTTP statuses.
//!
//! # Design
//! Upstream 4xx is relayed with the same status and body. Anything that
//! means the upstream could not give a usable answer becomes 502, except a
//! connect timeout, which becomes 504. The by-category 5xx fallback never
//! reaches this module; it is resolved in `todo_core` before an error exists.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::ApiError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    /// Inbound status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Api(ApiError::UpstreamClientError { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Api(ApiError::SerializationError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Api(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = match self {
            GatewayError::Api(ApiError::UpstreamClientError { body, .. }) => body,
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

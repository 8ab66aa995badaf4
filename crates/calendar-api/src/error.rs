//! Error types for the calendar HTTP API.
//!
//! [`ApiError`] unifies store failures and request-parsing failures into a
//! single enum that converts into an Axum response carrying an
//! `{"error": "<message>"}` body.
//!
//! | Failure | Status |
//! |---------|--------|
//! | malformed field, invalid user id / date / text | `400 Bad Request` |
//! | event not found (business failure) | `503 Service Unavailable` |
//! | undecodable body, anything unexpected | `500 Internal Server Error` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calendar_core::CalendarError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A store operation failed.
    #[error("{0}")]
    Calendar(#[from] CalendarError),

    /// A request field was missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The request body could not be decoded at all.
    #[error("failed to parse body")]
    MalformedBody,

    /// A response payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Shorthand for [`ApiError::BadRequest`].
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Calendar(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Calendar(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MalformedBody | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::debug!(%status, error = %message, "request rejected");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

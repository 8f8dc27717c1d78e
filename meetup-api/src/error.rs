//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use meetup_core::error::MeetupError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Backing store could not be reached.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message, "STORE_UNAVAILABLE")
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body.
///
/// `message` is repeated at the top level for clients that read it there.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message.clone(),
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<MeetupError> for ApiError {
    fn from(err: MeetupError) -> Self {
        match err {
            // Caller mistakes are not faults; no logging.
            MeetupError::ValidationError(message) => ApiError::bad_request(message),
            MeetupError::JsonError(ref e) => {
                tracing::debug!(error = %e, "Rejected malformed request body");
                ApiError::bad_request("Invalid JSON")
            }
            _ if err.is_recoverable() => {
                tracing::error!(error = %err, "Registration store unavailable");
                ApiError::unavailable("Failed to reach registration store")
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

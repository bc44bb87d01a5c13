//! Translation of service errors into HTTP responses.

use crate::error::PhonebookError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// RFC 3339 time the error was produced
    pub timestamp: String,
    pub status: u16,
    /// Reason phrase for the status, e.g. "Bad Request"
    pub error: String,
    pub message: String,
    /// Request path that produced the error
    pub path: String,
}

/// A service error bound to the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub error: PhonebookError,
    pub path: String,
}

impl ApiError {
    pub fn new(error: PhonebookError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }

    /// Status code for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.error {
            PhonebookError::Validation(_) => StatusCode::BAD_REQUEST,
            PhonebookError::NotFound { .. } => StatusCode::NOT_FOUND,
            PhonebookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(path = %self.path, error = %self.error, "Request failed");
        } else {
            tracing::debug!(path = %self.path, error = %self.error, "Request rejected");
        }

        let body = ErrorResponse {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.error.to_string(),
            path: self.path,
        };
        (status, Json(body)).into_response()
    }
}

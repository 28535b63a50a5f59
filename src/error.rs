//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Every service operation returns `Result<_, AppError>`. There are exactly
/// three kinds, each carrying the message shown to the caller.
///
/// # Error Categories
///
/// - **NotFound**: the referenced account does not exist
/// - **BadRequest**: the caller broke a business rule (bad type, duplicate
///   name, insufficient funds, malformed body)
/// - **Internal**: the store failed; the message is fixed per operation and
///   never contains storage details
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    BadRequest(String),

    /// Returns HTTP 500 Internal Server Error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

/// Malformed or incomplete JSON bodies are reported as `BadRequest`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// An account number that does not parse as an integer is a `BadRequest`.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "bad_request",
///     "message": "Insufficient balance"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `NotFound` → 404 Not Found
/// - `BadRequest` → 400 Bad Request
/// - `Internal` → 500 Internal Server Error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

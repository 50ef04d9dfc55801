//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Every variant maps to a response carrying a `success: false` flag and a
/// human-readable message. Validation and authorization errors are produced
/// before any mutation occurs; storage faults surface as a generic failure.
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request fields failed validation
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Malformed request outside field validation (bad id, wrong password)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Event end is not strictly after its start
    #[error("{0}")]
    InvalidRange(String),

    /// State conflict: duplicate email, already attending, not attending
    #[error("{0}")]
    Conflict(String),

    /// Missing/invalid credential, or authenticated but not permitted
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced user or event is absent
    #[error("{0}")]
    NotFound(String),

    /// Underlying store unavailable or misbehaving
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unexpected internal failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "errors": errors }),
            ),
            ApiError::BadRequest(msg)
            | ApiError::InvalidRange(msg)
            | ApiError::Conflict(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Server error!" }),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Server error!" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

//! Error types for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use presence_core::PresenceError;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Status not in the allow-list (400)
    #[error("Invalid status: {status:?}")]
    InvalidStatus {
        status: String,
        allowed: Vec<String>,
    },

    /// Malformed `/set` body (400)
    #[error("Invalid JSON: {source}")]
    InvalidJson {
        source: serde_json::Error,
        allowed: Vec<String>,
    },

    /// Unauthorized (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// State could not be persisted (500)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<String>>,
}

impl From<PresenceError> for ApiError {
    fn from(err: PresenceError) -> Self {
        match err {
            PresenceError::InvalidStatus { status, allowed } => {
                ApiError::InvalidStatus { status, allowed }
            }
            PresenceError::Io(e) => ApiError::Storage(e.to_string()),
            PresenceError::Serialization(e) => ApiError::Storage(e.to_string()),
            PresenceError::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    /// Short machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidStatus { .. } => "invalid_status",
            ApiError::InvalidJson { .. } => "invalid_json",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Internal(_) => "internal_error",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (status, message, allowed) = match self {
            ApiError::InvalidStatus { status, allowed } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid status: {:?}", status),
                Some(allowed),
            ),
            ApiError::InvalidJson { source, allowed } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", source),
                Some(allowed),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to persist status: {}", msg),
                None,
            ),
        };

        crate::metrics::record_error(&code);

        let body = Json(ErrorResponse {
            error: code,
            message,
            allowed,
        });

        (status, body).into_response()
    }
}

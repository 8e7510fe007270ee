use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::browse::BrowseError;

/// Application-level error type for HTTP handlers.
///
/// Renders as JSON carrying both `error` and `message`, plus a machine code,
/// so clients can treat it like a failed operation result.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Browse(#[from] BrowseError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Browse(err) => match err {
                BrowseError::DirectoryNotFound(_) | BrowseError::FileNotFound(_) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                BrowseError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, "CONFLICT", err.to_string())
                }
                BrowseError::NotAFile(_) | BrowseError::InvalidName(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
                }
                BrowseError::Io { .. } => {
                    tracing::warn!(error = %err, "Filesystem operation failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", err.to_string())
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

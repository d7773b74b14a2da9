use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use notes_core::error::CoreError;

use crate::response::STATUS_ERROR;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// ```text
/// {"status": "Error", "message": "...", "code": "NOT_FOUND"}
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `notes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body could not be decoded.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Request body decoded but failed field validation; one message per field.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const NOT_FOUND_MESSAGE: &str = "Not found";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                // Which entity was missing stays in the logs: a missing note
                // and someone else's note must read the same to the caller.
                CoreError::NotFound { .. } => {
                    tracing::debug!(error = %core, "Not found");
                    (StatusCode::NOT_FOUND, "NOT_FOUND", NOT_FOUND_MESSAGE.to_string())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InvalidJson(msg) => (StatusCode::BAD_REQUEST, "INVALID_JSON", msg.clone()),
            AppError::Validation(errors) => {
                let body = json!({
                    "status": STATUS_ERROR,
                    "message": errors.join(", "),
                    "code": "VALIDATION_ERROR",
                    "errors": errors,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "status": STATUS_ERROR,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

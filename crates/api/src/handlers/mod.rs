pub mod notes;
pub mod users;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Decode a JSON request body.
///
/// The body is read as raw bytes so an empty body and a malformed one can be
/// reported separately, and so a missing `Content-Type` is not an error.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::InvalidJson("Request body cannot be empty".into()));
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed JSON body");
        AppError::InvalidJson("Invalid JSON format".into())
    })
}

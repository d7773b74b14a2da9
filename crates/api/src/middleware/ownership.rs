//! Path-level ownership check for `/users/{user_id}/notes` routes.
//!
//! A caller may only address their own notes. Naming someone else's user id
//! is answered exactly like naming a user that does not exist.

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use notes_core::error::CoreError;
use notes_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

pub const MSG_INVALID_ID: &str = "Invalid id format: must be integer";

/// Unwrap the raw path segments, turning an undecodable path (e.g. invalid
/// UTF-8 after percent-decoding) into the same 400 as a non-integer id.
pub fn path_segments<T>(path: Result<Path<T>, PathRejection>) -> AppResult<T> {
    path.map(|Path(segments)| segments).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected undecodable path");
        AppError::BadRequest(MSG_INVALID_ID.to_string())
    })
}

/// Parse an integer path segment such as `{note_id}`.
pub fn parse_path_id(raw: &str, field: &str) -> AppResult<DbId> {
    raw.parse::<DbId>().map_err(|_| {
        tracing::debug!(field, value = raw, "Rejected non-integer path id");
        AppError::BadRequest(MSG_INVALID_ID.to_string())
    })
}

/// Check that `raw_owner` is the authenticated user's id and return it.
pub fn authorize_owner(user: &AuthUser, raw_owner: &str) -> AppResult<DbId> {
    let owner_id = parse_path_id(raw_owner, "user_id")?;
    if owner_id != user.user_id {
        tracing::warn!(
            user_id = user.user_id,
            owner_id,
            "Rejected access to another user's notes"
        );
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: owner_id,
        }));
    }
    Ok(owner_id)
}

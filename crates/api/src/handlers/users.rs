//! Handler for user registration.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use notes_core::types::{DbId, Timestamp};
use notes_core::users::RegisterUser;
use notes_core::validation::validate_input;
use notes_db::models::user::CreateUser;
use notes_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_json_body;
use crate::response::ApiResponse;
use crate::state::AppState;

/// A newly registered user together with an access token for them.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: DbId,
    pub user_name: String,
    pub created_at: Timestamp,
    pub token: String,
}

/// POST /users
///
/// Register a user and issue their first access token.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input = parse_json_body::<RegisterUser>(&body)?.normalized();
    validate_input(&input).map_err(AppError::Validation)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.user_name,
        },
    )
    .await?;

    let token = state
        .tokens
        .issue(user.id, &user.username)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(RegisteredUser {
            id: user.id,
            user_name: user.username,
            created_at: user.created_at,
            token,
        })),
    ))
}

//! Handlers for a user's notes.
//!
//! Every handler runs behind [`crate::middleware::auth::require_auth`] and
//! resolves the `{user_id}` segment through
//! [`crate::middleware::ownership::authorize_owner`] before touching the store.

use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notes_core::error::CoreError;
use notes_core::notes::{ListWindow, NoteInput};
use notes_core::types::DbId;
use notes_core::validation::validate_input;
use notes_db::models::note::{CreateNote, UpdateNote};
use notes_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_json_body;
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::{authorize_owner, parse_path_id, path_segments};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Raw listing parameters. Kept as strings so malformed values fall back to
/// defaults instead of failing the request.
#[derive(Debug, Default)]
pub struct ListNotesParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
}

impl ListNotesParams {
    /// Pick `limit`, `offset` and `sort` out of decoded query pairs. A repeated
    /// key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            limit: first("limit"),
            offset: first("offset"),
            sort: first("sort"),
        }
    }

    fn window(&self) -> ListWindow {
        ListWindow::resolve(
            self.limit.as_deref(),
            self.offset.as_deref(),
            self.sort.as_deref(),
        )
    }
}

fn read_note_input(body: &Bytes) -> AppResult<NoteInput> {
    let input = parse_json_body::<NoteInput>(body)?.normalized();
    validate_input(&input).map_err(AppError::Validation)?;
    Ok(input)
}

fn note_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users/{user_id}/notes
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let user_id = path_segments(path)?;
    let owner_id = authorize_owner(&auth, &user_id)?;
    let input = read_note_input(&body)?;

    let note = NoteRepo::create(
        &state.pool,
        owner_id,
        &CreateNote {
            title: input.title,
            content: input.content,
        },
    )
    .await?;

    tracing::info!(user_id = owner_id, note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(ApiResponse::created(note))))
}

/// GET /users/{user_id}/notes?limit=&offset=&sort=
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let user_id = path_segments(path)?;
    let owner_id = authorize_owner(&auth, &user_id)?;

    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Ignoring undecodable query string");
            Vec::new()
        }
    };
    let window = ListNotesParams::from_pairs(&pairs).window();

    let notes = NoteRepo::list_by_owner(&state.pool, owner_id, &window).await?;

    tracing::debug!(
        user_id = owner_id,
        limit = window.limit,
        offset = window.offset,
        count = notes.len(),
        "Listed notes"
    );

    Ok(Json(ApiResponse::ok(notes)))
}

/// GET /users/{user_id}/notes/{note_id}
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let (user_id, note_id) = path_segments(path)?;
    let owner_id = authorize_owner(&auth, &user_id)?;
    let note_id = parse_path_id(&note_id, "note_id")?;

    let note = NoteRepo::find_for_owner(&state.pool, owner_id, note_id)
        .await?
        .ok_or_else(|| note_not_found(note_id))?;

    Ok(Json(ApiResponse::ok(note)))
}

/// PUT /users/{user_id}/notes/{note_id}
///
/// Replaces title and content; `updated_at` is refreshed, `created_at` kept.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let (user_id, note_id) = path_segments(path)?;
    let owner_id = authorize_owner(&auth, &user_id)?;
    let note_id = parse_path_id(&note_id, "note_id")?;
    let input = read_note_input(&body)?;

    let note = NoteRepo::update_for_owner(
        &state.pool,
        owner_id,
        note_id,
        &UpdateNote {
            title: input.title,
            content: input.content,
        },
    )
    .await?
    .ok_or_else(|| note_not_found(note_id))?;

    tracing::info!(user_id = owner_id, note_id, "Note updated");

    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /users/{user_id}/notes/{note_id}
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let (user_id, note_id) = path_segments(path)?;
    let owner_id = authorize_owner(&auth, &user_id)?;
    let note_id = parse_path_id(&note_id, "note_id")?;

    if !NoteRepo::delete_for_owner(&state.pool, owner_id, note_id).await? {
        return Err(note_not_found(note_id));
    }

    tracing::info!(user_id = owner_id, note_id, "Note deleted");

    Ok(Json(ApiResponse::empty()))
}

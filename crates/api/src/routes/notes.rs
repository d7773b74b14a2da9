//! Route definitions for a user's notes.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Note routes, all behind [`require_auth`].
///
/// ```text
/// GET    /users/{user_id}/notes              -> list_notes (?limit, offset, sort)
/// POST   /users/{user_id}/notes              -> create_note
/// GET    /users/{user_id}/notes/{note_id}    -> get_note
/// PUT    /users/{user_id}/notes/{note_id}    -> update_note
/// DELETE /users/{user_id}/notes/{note_id}    -> delete_note
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/notes",
            get(notes::list_notes).post(notes::create_note),
        )
        .route(
            "/users/{user_id}/notes/{note_id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

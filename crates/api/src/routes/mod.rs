pub mod health;
pub mod notes;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// POST   /users                              register (public)
///
/// /users/{user_id}/notes                     list, create (requires auth)
/// /users/{user_id}/notes/{note_id}           get, update, delete (requires auth)
/// ```
///
/// `state` is needed up front to attach the authentication layer.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(notes::router(state))
}

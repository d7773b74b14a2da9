use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes.
///
/// ```text
/// POST   /users              -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(users::register))
}

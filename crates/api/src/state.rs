use std::sync::Arc;

use crate::auth::jwt::TokenManager;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: notes_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token issuer/verifier, built once from `config.jwt`.
    pub tokens: Arc<TokenManager>,
}

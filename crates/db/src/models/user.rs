//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use notes_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new user. The username is already trimmed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
}

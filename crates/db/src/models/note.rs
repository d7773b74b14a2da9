//! Note entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use notes_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a note. Title and content are trimmed and non-empty.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
}

/// DTO for replacing a note's title and content.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub title: String,
    pub content: String,
}

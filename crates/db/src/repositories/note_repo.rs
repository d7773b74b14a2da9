//! Repository for the `notes` table.
//!
//! Every statement filters on `user_id` as well as `id`, so a note owned by
//! someone else is indistinguishable from one that does not exist.

use sqlx::PgPool;
use notes_core::notes::ListWindow;
use notes_core::types::DbId;

use crate::models::note::{CreateNote, Note, UpdateNote};

/// Column list for notes queries.
const COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

/// Owner-scoped CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a note for `owner_id`. `created_at` and `updated_at` are both
    /// set from the same `now()` so they compare equal.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, now(), now())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List a page of the owner's notes ordered by creation time.
    ///
    /// Rows created in the same instant are ordered by id in the same
    /// direction, so paging is stable.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        window: &ListWindow,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let direction = window.direction.as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY created_at {direction}, id {direction}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(pool)
            .await
    }

    /// Fetch one note, only if it belongs to `owner_id`.
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        note_id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .bind(note_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace title and content and refresh `updated_at` in one statement.
    ///
    /// Returns `None` if no note matches both ids.
    pub async fn update_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        note_id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $3,
                content = $4,
                updated_at = clock_timestamp()
             WHERE user_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .bind(note_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        note_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE user_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(note_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use crate::types::DbId;

/// Domain-level failures shared by every layer above `notes-core`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or is not visible to the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

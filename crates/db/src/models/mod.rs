//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the `Create`/`Update` DTOs its repository accepts.

pub mod note;
pub mod user;

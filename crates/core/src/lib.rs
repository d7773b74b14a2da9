//! Domain types, errors, and input rules for the notes service.
//!
//! This crate has no database or HTTP dependencies so the rules it encodes
//! can be unit-tested in isolation and shared by the `db` and `api` crates.

pub mod error;
pub mod notes;
pub mod types;
pub mod users;
pub mod validation;

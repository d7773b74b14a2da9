//! Request gatekeeping for the note routes.
//!
//! - [`auth::require_auth`] -- rejects requests without a valid Bearer token
//!   and binds the verified [`auth::AuthUser`] to the request.
//! - [`ownership::authorize_owner`] -- checks that the `{user_id}` path segment
//!   names the authenticated user.

pub mod auth;
pub mod ownership;

//! Authentication primitives.
//!
//! - [`jwt`] -- signed access tokens: issuing at registration, verifying on
//!   every protected request.

pub mod jwt;

//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`] -- the caller identified by a valid bearer token.

pub mod auth;

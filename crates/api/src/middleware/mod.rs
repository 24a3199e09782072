//! Request authentication.
//!
//! - [`auth::AuthUser`] -- resolves the calling user from the `Authorization` header.

pub mod auth;

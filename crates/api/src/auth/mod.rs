//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing.
//! - [`jwt`] -- signed, time-bound identity tokens.

pub mod jwt;
pub mod password;

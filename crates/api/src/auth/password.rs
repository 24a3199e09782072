//! Password hashing for newly registered users.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$...`), salted from [`OsRng`].
//! The `users.password` column stores the PHC string as-is.

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use password_hash::rand_core::OsRng;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

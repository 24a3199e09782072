//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod book_repo;
pub mod order_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use order_repo::{OrderRepo, OrderWriteError};
pub use user_repo::UserRepo;

/// True when `err` is a unique-constraint violation reported by the driver.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// True when `err` is a foreign-key violation reported by the driver.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table and
//! the create DTO used by its repository.

pub mod book;
pub mod order;
pub mod user;

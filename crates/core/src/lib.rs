//! Domain logic for the bookstore backend.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it for validation, pricing, and the shared error taxonomy.

pub mod error;
pub mod money;
pub mod ordering;
pub mod types;

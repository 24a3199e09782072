//! Book catalog model.

use bookstore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `books` table. The catalog is read-only to this service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    /// Decimal price as text, e.g. `"12.50"`.
    pub price: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

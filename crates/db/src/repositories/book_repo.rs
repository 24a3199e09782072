//! Repository for the `books` table (read-only).

use bookstore_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::book::Book;

const COLUMNS: &str = "id, title, author, price, description, created_at, updated_at";

/// Catalog lookups.
pub struct BookRepo;

impl BookRepo {
    /// List every book in the catalog, ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY id");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// Fetch the books whose ids appear in `ids`.
    ///
    /// Unknown ids are silently absent from the result, and each book appears
    /// once no matter how often its id is repeated. Callers diff the result
    /// against the request to find what is missing.
    pub async fn find_by_ids(pool: &SqlitePool, ids: &[DbId]) -> Result<Vec<Book>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM books WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        builder.build_query_as::<Book>().fetch_all(pool).await
    }
}

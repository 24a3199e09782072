//! Handlers for the `/books` resource.

use axum::extract::State;
use axum::Json;
use bookstore_db::models::book::Book;
use bookstore_db::repositories::BookRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body for `GET /books`.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// GET /v1/books
///
/// List the whole catalog.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<BooksResponse>> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(BooksResponse { books }))
}

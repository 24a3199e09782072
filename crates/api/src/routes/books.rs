//! Route definitions for the `/books` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(books::list))
}

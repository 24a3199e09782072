//! Route definitions for the `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`. Both require a bearer token.
///
/// ```text
/// POST /          -> place_order
/// GET  /history   -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place_order))
        .route("/history", get(orders::history))
}

pub mod books;
pub mod health;
pub mod orders;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// POST /users            register (public)
/// GET  /books            list catalog (public)
/// POST /orders           place order (requires auth)
/// GET  /orders/history   order history (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/books", books::router())
        .nest("/orders", orders::router())
}

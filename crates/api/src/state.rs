use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted internally and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bookstore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token issuer/validator shared by registration and the auth extractor.
    pub tokens: Arc<TokenService>,
}

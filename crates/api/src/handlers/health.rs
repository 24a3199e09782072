//! Liveness probe for load balancers and deploy scripts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"` or `"unavailable"`.
    pub status: &'static str,
    pub version: &'static str,
    /// `"up"` when `SELECT 1` succeeds against the pool, else `"down"`.
    pub database: &'static str,
}

/// GET /health
///
/// 200 while the store answers, 503 otherwise.
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (code, status, database) = match bookstore_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", "down")
        }
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

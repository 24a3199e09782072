//! Service banner and the catch-all for unknown routes.

use axum::http::StatusCode;
use axum::Json;

use crate::response::MessageResponse;

/// ANY / -- identifies the service.
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("simple online book store server"))
}

/// Fallback for any path without a route.
pub async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("endpoint not found")),
    )
}

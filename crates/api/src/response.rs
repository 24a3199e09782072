//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` -- used for errors and informational replies.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Serializes to `{}`. Returned by endpoints that succeed without a payload.
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

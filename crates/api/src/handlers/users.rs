//! Handlers for the `/users` resource (registration).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bookstore_core::error::CoreError;
use bookstore_db::models::user::CreateUser;
use bookstore_db::repositories::{is_unique_violation, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), CoreError> {
        if self.email.is_empty() {
            return Err(CoreError::Validation("email is required".into()));
        }
        if self.password.is_empty() {
            return Err(CoreError::Validation("password is required".into()));
        }
        Ok(())
    }
}

/// Successful registration response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/users
///
/// Register a new user and return a token for it. Returns 201 Created.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let Json(input) = payload?;
    input.validate()?;

    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let new_user = CreateUser {
        email: input.email,
        password_hash,
    };
    let user = UserRepo::create(&state.pool, &new_user)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Core(CoreError::Conflict("email already exist".into()))
            } else {
                AppError::InternalError(format!("Failed to register user: {e}"))
            }
        })?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::InternalError(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

//! Token-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use bookstore_core::error::CoreError;
use bookstore_db::models::user::User;
use bookstore_db::repositories::UserRepo;

use crate::auth::jwt::TokenError;
use crate::error::AppError;
use crate::state::AppState;

pub const TOKEN_REQUIRED: &str = "token is required";
pub const INVALID_TOKEN_FORMAT: &str = "invalid token format";
pub const USER_NOT_FOUND: &str = "user not found";
pub const USER_LOOKUP_FAILED: &str = "failed to get user information";

/// Authenticated user resolved from the `Authorization` header.
///
/// Add it as a handler parameter to require authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Rejections, in the order they are checked:
///
/// | condition                         | status | message                          |
/// |-----------------------------------|--------|----------------------------------|
/// | header missing or empty           | 401    | `token is required`              |
/// | not exactly `<scheme> <token>`    | 401    | `invalid token format`           |
/// | token expired                     | 401    | `token expired`                  |
/// | any other token failure           | 500    | `internal error`                 |
/// | user no longer exists             | 401    | `user not found`                 |
/// | user lookup failed                | 401    | `failed to get user information` |
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts.headers.get(AUTHORIZATION))?;

        let user_id = state.tokens.validate(token).map_err(token_rejection)?;

        let user = match UserRepo::find_by_id(&state.pool, user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(user_id, "Token subject does not match any user");
                return Err(CoreError::Unauthorized(USER_NOT_FOUND.into()).into());
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to fetch authenticated user");
                return Err(CoreError::Unauthorized(USER_LOOKUP_FAILED.into()).into());
            }
        };

        Ok(AuthUser { user })
    }
}

/// Pull the token out of an `Authorization: <scheme> <token>` header.
///
/// The scheme itself is not checked; the value must split on a single space
/// into exactly two parts.
fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let raw = match header {
        None => return Err(unauthorized(TOKEN_REQUIRED)),
        Some(value) if value.is_empty() => return Err(unauthorized(TOKEN_REQUIRED)),
        Some(value) => value
            .to_str()
            .map_err(|_| unauthorized(INVALID_TOKEN_FORMAT))?,
    };

    let parts: Vec<&str> = raw.split(' ').collect();
    match parts.as_slice() {
        [_scheme, token] => Ok(*token),
        _ => Err(unauthorized(INVALID_TOKEN_FORMAT)),
    }
}

/// Map a token validation failure to its rejection.
///
/// Only expiry is the client's problem; anything else is treated as a
/// server-side fault.
fn token_rejection(err: TokenError) -> AppError {
    match err {
        TokenError::TokenExpired => {
            tracing::info!("Rejected expired token");
            unauthorized(&TokenError::TokenExpired.to_string())
        }
        other => AppError::InternalError(format!("Failed while validating token: {other}")),
    }
}

fn unauthorized(message: &str) -> AppError {
    tracing::debug!(reason = message, "Rejecting unauthenticated request");
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Core(CoreError::Unauthorized(msg)) => msg,
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn missing_header_requires_token() {
        assert_eq!(message(bearer_token(None).unwrap_err()), TOKEN_REQUIRED);
    }

    #[test]
    fn empty_header_requires_token() {
        let value = HeaderValue::from_static("");
        assert_eq!(message(bearer_token(Some(&value)).unwrap_err()), TOKEN_REQUIRED);
    }

    #[test]
    fn header_without_space_is_invalid_format() {
        let value = HeaderValue::from_static("abc.def.ghi");
        assert_eq!(
            message(bearer_token(Some(&value)).unwrap_err()),
            INVALID_TOKEN_FORMAT
        );
    }

    #[test]
    fn header_with_extra_parts_is_invalid_format() {
        let value = HeaderValue::from_static("Bearer abc extra");
        assert_eq!(
            message(bearer_token(Some(&value)).unwrap_err()),
            INVALID_TOKEN_FORMAT
        );
    }

    #[test]
    fn two_part_header_yields_token() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&value)).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn expired_token_is_unauthorized() {
        assert_eq!(message(token_rejection(TokenError::TokenExpired)), "token expired");
    }

    #[test]
    fn other_token_failures_are_internal() {
        let err = token_rejection(TokenError::InvalidToken("bad signature".into()));
        assert_matches!(err, AppError::InternalError(_));
    }
}

//! HTTP-level tests for the authentication gate on `/v1/orders`.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};
use bookstore_api::auth::jwt::{TokenService, TOKEN_LIFETIME_SECS};
use sqlx::SqlitePool;

use common::{body_json, build_test_app, get_auth, register, send, test_tokens, user_id};

async fn history_with_header(app: axum::Router, header: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri("/v1/orders/history");
    if let Some(value) = header {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_header_requires_token(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = history_with_header(app, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "token is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn header_without_scheme_is_invalid_format(pool: SqlitePool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "fmt@test.com").await;

    let response = history_with_header(app, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "invalid token format");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scheme_name_is_not_checked(pool: SqlitePool) {
    let app = build_test_app(pool);
    let token = register(app.clone(), "scheme@test.com").await;

    let response = history_with_header(app, Some(&format!("Token {token}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_token_is_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    register(app.clone(), "old@test.com").await;
    let id = user_id(&pool, "old@test.com").await;

    let issued_at = chrono::Utc::now().timestamp() - 2 * TOKEN_LIFETIME_SECS;
    let token = test_tokens().issue_at(id, issued_at).unwrap();

    let response = get_auth(app, "/v1/orders/history", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "token expired");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_deleted_user_is_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = register(app.clone(), "gone@test.com").await;

    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind("gone@test.com")
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/v1/orders/history", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "user not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_signed_with_other_secret_is_a_server_error(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    register(app.clone(), "forged@test.com").await;
    let id = user_id(&pool, "forged@test.com").await;

    let forged = TokenService::new("some-other-secret").unwrap().issue(id).unwrap();

    let response = get_auth(app, "/v1/orders/history", &forged).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], "internal error");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn placing_an_order_requires_auth(pool: SqlitePool) {
    let app = build_test_app(pool.clone());

    let response = common::post_json(
        app,
        "/v1/orders",
        serde_json::json!({ "books": [{ "book_id": 1, "quantity": 1 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(common::count_rows(&pool, "orders").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_token_with_foreign_signature_is_still_expired(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    register(app.clone(), "stale@test.com").await;
    let id = user_id(&pool, "stale@test.com").await;

    let issued_at = chrono::Utc::now().timestamp() - 3 * TOKEN_LIFETIME_SECS;
    let token = TokenService::new("some-other-secret")
        .unwrap()
        .issue_at(id, issued_at)
        .unwrap();

    let response = get_auth(app, "/v1/orders/history", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "token expired");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_lookup_failure_is_unauthorized(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let token = register(app.clone(), "offline@test.com").await;

    pool.close().await;

    let response = get_auth(app, "/v1/orders/history", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "failed to get user information"
    );
}

//! Handlers for the `/orders` resource (placement and history).

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bookstore_core::error::CoreError;
use bookstore_core::ordering::{
    missing_book_ids, missing_books_message, price_order, validate_line_items, LineItem,
};
use bookstore_core::types::DbId;
use bookstore_db::models::order::{CreateOrder, CreateOrderItem, OrderHistory};
use bookstore_db::repositories::{BookRepo, OrderRepo, OrderWriteError, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, USER_NOT_FOUND};
use crate::response::EmptyResponse;
use crate::state::AppState;

const BOOK_NOT_FOUND: &str = "book not found";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One requested line in `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub book_id: DbId,
    pub quantity: i64,
}

/// Request body for `POST /orders`. A missing `books` key is an empty order.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub books: Vec<BookRequest>,
}

/// Response body for `GET /orders/history`.
#[derive(Debug, Serialize)]
pub struct OrderHistoryResponse {
    pub orders: Vec<OrderHistory>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/orders
///
/// Place an order for the authenticated user.
///
/// 1. Re-check that the user still exists.
/// 2. Validate the line items (non-empty, quantities >= 1).
/// 3. Resolve every referenced book; reject the whole order if any is unknown.
/// 4. Snapshot prices, sum the total, and persist order + items atomically.
pub async fn place_order(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> AppResult<Json<EmptyResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user.id)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to get user by id: {e}")))?
        .ok_or_else(|| CoreError::NotFound(USER_NOT_FOUND.into()))?;

    let Json(input) = payload?;
    let items: Vec<LineItem> = input
        .books
        .iter()
        .map(|b| LineItem {
            book_id: b.book_id,
            quantity: b.quantity,
        })
        .collect();

    validate_line_items(&items)?;

    let ids: Vec<DbId> = items.iter().map(|i| i.book_id).collect();
    let books = BookRepo::find_by_ids(&state.pool, &ids)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to look up books: {e}")))?;
    let prices: HashMap<DbId, String> = books.into_iter().map(|b| (b.id, b.price)).collect();

    let missing = missing_book_ids(&items, &prices);
    if !missing.is_empty() {
        return Err(CoreError::MissingReference(missing_books_message(&missing)).into());
    }

    let priced = price_order(&items, &prices)?;

    let order = CreateOrder {
        user_id: user.id,
        total: priced.total,
    };
    let lines: Vec<CreateOrderItem> = priced
        .lines
        .iter()
        .map(|line| CreateOrderItem {
            book_id: line.book_id,
            price: line.price_string(),
            quantity: line.quantity,
        })
        .collect();

    let (created, _) = OrderRepo::create(&state.pool, &order, &lines)
        .await
        .map_err(order_write_rejection)?;

    tracing::info!(
        order_id = created.id,
        user_id = user.id,
        total = %created.total,
        "Order placed"
    );
    Ok(Json(EmptyResponse {}))
}

/// Map a failed order write to its client response.
///
/// A dangling user is the addressed entity (404); a dangling book came from
/// the request body (400).
fn order_write_rejection(err: OrderWriteError) -> AppError {
    match err {
        OrderWriteError::UserNotFound => CoreError::NotFound(USER_NOT_FOUND.into()).into(),
        OrderWriteError::BookNotFound => {
            CoreError::MissingReference(BOOK_NOT_FOUND.into()).into()
        }
        OrderWriteError::Database(err) => {
            AppError::InternalError(format!("Failed to create order: {err}"))
        }
    }
}

/// GET /v1/orders/history
///
/// All past orders of the authenticated user, each with its lines.
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<OrderHistoryResponse>> {
    let orders = OrderRepo::history_for_user(&state.pool, auth.user.id)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to load order history: {e}")))?;
    Ok(Json(OrderHistoryResponse { orders }))
}

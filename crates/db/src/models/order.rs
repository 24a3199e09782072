//! Order, order item and order history models.

use bookstore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    /// Sum of the item snapshots, two decimal places.
    pub total: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub book_id: DbId,
    /// Book price at the moment the order was placed.
    pub price: String,
    pub quantity: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the order header.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_id: DbId,
    pub total: String,
}

/// DTO for one order line. The order id is assigned inside the transaction.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub book_id: DbId,
    pub price: String,
    pub quantity: i64,
}

/// One flat row of the history join, before grouping.
#[derive(Debug, FromRow)]
pub struct OrderHistoryRow {
    pub order_id: DbId,
    pub total: String,
    pub book_id: DbId,
    pub price: String,
    pub quantity: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// A past order with its purchased lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderHistory {
    pub id: DbId,
    pub total: String,
    pub items: Vec<OrderHistoryItem>,
}

/// A purchased line as shown in the order history.
#[derive(Debug, Clone, Serialize)]
pub struct OrderHistoryItem {
    pub book_id: DbId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: String,
    pub quantity: i64,
}

//! Repository for the `orders` and `order_items` tables.

use std::collections::HashMap;

use bookstore_core::types::DbId;
use chrono::Utc;
use sqlx::SqlitePool;

use super::is_foreign_key_violation;
use crate::models::order::{
    CreateOrder, CreateOrderItem, Order, OrderHistory, OrderHistoryItem, OrderHistoryRow,
    OrderItem,
};

const ORDER_COLUMNS: &str = "id, user_id, total, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, book_id, price, quantity, created_at, updated_at";

/// Failure modes of [`OrderRepo::create`].
///
/// Foreign-key violations are translated into the first two variants so the
/// caller can tell the client which reference was dangling.
#[derive(Debug, thiserror::Error)]
pub enum OrderWriteError {
    /// The order's `user_id` does not reference an existing user.
    #[error("user id not found")]
    UserNotFound,

    /// An item's `book_id` does not reference an existing book.
    #[error("book id not found")]
    BookNotFound,

    /// Any other database failure, kept for logging.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Order persistence and history.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and all of its items in a single transaction.
    ///
    /// `created_at` / `updated_at` are taken once, before the first insert,
    /// and shared by the order and every item. If any insert fails the
    /// transaction is dropped without commit, which rolls everything back.
    pub async fn create(
        pool: &SqlitePool,
        order: &CreateOrder,
        items: &[CreateOrderItem],
    ) -> Result<(Order, Vec<OrderItem>), OrderWriteError> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders (user_id, total, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             RETURNING {ORDER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Order>(&query)
            .bind(order.user_id)
            .bind(&order.total)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    OrderWriteError::UserNotFound
                } else {
                    OrderWriteError::Database(e)
                }
            })?;

        let item_query = format!(
            "INSERT INTO order_items (order_id, book_id, price, quantity, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut created_items = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(&item_query)
                .bind(created.id)
                .bind(item.book_id)
                .bind(&item.price)
                .bind(item.quantity)
                .bind(now)
                .bind(now)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    if is_foreign_key_violation(&e) {
                        OrderWriteError::BookNotFound
                    } else {
                        OrderWriteError::Database(e)
                    }
                })?;
            created_items.push(row);
        }

        tx.commit().await?;

        tracing::debug!(
            order_id = created.id,
            user_id = created.user_id,
            items = created_items.len(),
            "Order persisted"
        );
        Ok((created, created_items))
    }

    /// All orders placed by `user_id`, each with its purchased lines.
    ///
    /// Returns an empty vector when the user has never ordered.
    pub async fn history_for_user(
        pool: &SqlitePool,
        user_id: DbId,
    ) -> Result<Vec<OrderHistory>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OrderHistoryRow>(
            "SELECT o.id AS order_id, o.total, oi.book_id, oi.price, oi.quantity, \
                    b.title, b.author, b.description \
             FROM orders o \
             JOIN order_items oi ON oi.order_id = o.id \
             JOIN books b ON b.id = oi.book_id \
             WHERE o.user_id = ? \
             ORDER BY o.id, oi.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(group_history_rows(rows))
    }
}

/// Fold flat join rows into one [`OrderHistory`] per order id.
///
/// Orders keep the position of their first row; items keep row order.
fn group_history_rows(rows: Vec<OrderHistoryRow>) -> Vec<OrderHistory> {
    let mut orders: Vec<OrderHistory> = Vec::new();
    let mut positions: HashMap<DbId, usize> = HashMap::new();

    for row in rows {
        let idx = *positions.entry(row.order_id).or_insert_with(|| {
            orders.push(OrderHistory {
                id: row.order_id,
                total: row.total.clone(),
                items: Vec::new(),
            });
            orders.len() - 1
        });

        orders[idx].items.push(OrderHistoryItem {
            book_id: row.book_id,
            title: row.title,
            author: row.author,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
        });
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: DbId, book_id: DbId) -> OrderHistoryRow {
        OrderHistoryRow {
            order_id,
            total: format!("{order_id}.00"),
            book_id,
            price: "1.00".into(),
            quantity: 1,
            title: format!("Book {book_id}"),
            author: "Author".into(),
            description: String::new(),
        }
    }

    #[test]
    fn groups_rows_by_order() {
        let grouped = group_history_rows(vec![row(1, 10), row(1, 11), row(2, 10)]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, 1);
        assert_eq!(grouped[0].items.len(), 2);
        assert_eq!(grouped[1].id, 2);
        assert_eq!(grouped[1].total, "2.00");
        assert_eq!(grouped[1].items[0].book_id, 10);
    }

    #[test]
    fn interleaved_rows_still_group() {
        let grouped = group_history_rows(vec![row(5, 1), row(3, 2), row(5, 3)]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, 5);
        assert_eq!(
            grouped[0].items.iter().map(|i| i.book_id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn no_rows_means_no_history() {
        assert!(group_history_rows(Vec::new()).is_empty());
    }
}

//! Order placement validation and pricing.
//!
//! The API layer runs these in sequence: [`validate_line_items`] before any
//! database access, [`missing_book_ids`] once the catalog lookup returns, and
//! [`price_order`] only when every referenced book exists.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::money::{format_total, line_amount, parse_price};
use crate::types::DbId;

/// Minimum quantity accepted for a single line.
pub const MIN_QUANTITY: i64 = 1;

/// Rejection when a line amount or the running total overflows.
pub const TOTAL_OUT_OF_RANGE: &str = "invalid quantity";

/// One requested `(book, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    pub book_id: DbId,
    pub quantity: i64,
}

/// A line with its unit price captured from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub book_id: DbId,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl PricedLine {
    /// Snapshot price in its storage form.
    pub fn price_string(&self) -> String {
        self.unit_price.to_string()
    }
}

/// Result of pricing a fully-resolved order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    /// Sum of all lines, rounded to two places (e.g. `"5.70"`).
    pub total: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the request shape: at least one line and every quantity >= 1.
pub fn validate_line_items(items: &[LineItem]) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::Validation("at least 1 book is required".into()));
    }
    if items.iter().any(|item| item.quantity < MIN_QUANTITY) {
        return Err(CoreError::Validation("invalid quantity".into()));
    }
    Ok(())
}

/// Requested book ids absent from `prices`, in request order.
///
/// Duplicates in the request are reported as many times as they appear.
pub fn missing_book_ids(items: &[LineItem], prices: &HashMap<DbId, String>) -> Vec<DbId> {
    items
        .iter()
        .filter(|item| !prices.contains_key(&item.book_id))
        .map(|item| item.book_id)
        .collect()
}

/// Client-facing message for a set of unknown book ids.
pub fn missing_books_message(ids: &[DbId]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("books with ids: [{joined}] not found")
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Price every line from the catalog and sum the order total.
///
/// `prices` maps book id to the stored price string. Callers must have
/// already confirmed via [`missing_book_ids`] that every id is present; a
/// gap here is reported as [`CoreError::Internal`]. An amount too large to
/// represent is rejected as [`CoreError::Validation`].
pub fn price_order(
    items: &[LineItem],
    prices: &HashMap<DbId, String>,
) -> Result<PricedOrder, CoreError> {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let raw = prices.get(&item.book_id).ok_or_else(|| {
            CoreError::Internal(format!("No price resolved for book {}", item.book_id))
        })?;
        let unit_price = parse_price(raw)?;
        total = line_amount(unit_price, item.quantity)
            .and_then(|amount| total.checked_add(amount))
            .ok_or_else(|| CoreError::Validation(TOTAL_OUT_OF_RANGE.into()))?;
        lines.push(PricedLine {
            book_id: item.book_id,
            unit_price,
            quantity: item.quantity,
        });
    }

    Ok(PricedOrder {
        lines,
        total: format_total(total),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

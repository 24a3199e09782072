//! Fixed-point money helpers.
//!
//! Prices travel as decimal strings (`"12.50"`) at the storage and JSON
//! boundary and as [`Decimal`] everywhere in between. Floating point is
//! never involved.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;

/// Number of fractional digits kept in an order total.
pub const TOTAL_DECIMAL_PLACES: u32 = 2;

/// Parse a stored price string into a [`Decimal`].
///
/// A price that does not parse is a data problem, not a client problem,
/// so it surfaces as [`CoreError::Internal`].
pub fn parse_price(raw: &str) -> Result<Decimal, CoreError> {
    Decimal::from_str(raw.trim())
        .map_err(|e| CoreError::Internal(format!("Invalid stored price '{raw}': {e}")))
}

/// Price of a single line: `unit_price * quantity`, unrounded.
///
/// Returns `None` when the product does not fit in a [`Decimal`].
pub fn line_amount(unit_price: Decimal, quantity: i64) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Round a summed amount to [`TOTAL_DECIMAL_PLACES`] and render it.
///
/// Midpoints round away from zero, so `"0.125"` becomes `"0.13"`. The output
/// always carries exactly two fractional digits.
pub fn format_total(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(TOTAL_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(TOTAL_DECIMAL_PLACES);
    rounded.to_string()
}

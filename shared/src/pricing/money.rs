//! Money calculation utilities using rust_decimal for precision
//!
//! All price accumulation is done in `Decimal`, then converted to `f64`
//! once at the presentation boundary. Catalog prices arrive as `f64`
//! on the wire; converting per value and rounding once avoids
//! compounding rounding error across many additions.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Format a price for display
///
/// # Examples
///
/// ```
/// use shared::pricing::money::format_price;
///
/// assert_eq!(format_price(65.0), "65.00");
/// assert_eq!(format_price(12.5), "12.50");
/// ```
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

//! Numeric input handling for currency, weights and rates.
//!
//! Form fields arrive as text and are often half-typed. Two entry points exist:
//!
//! - [`parse_lenient`]: anything that is not a number reads as zero. This is what
//!   the live totals use, so a partially filled bill always has figures.
//! - [`parse_strict`]: rejects unparseable or negative input with a
//!   [`DomainError::Validation`]. Used when an item is committed to a bill.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Decimal places used for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Parse a numeric field, reading empty or non-numeric text as zero.
pub fn parse_lenient(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO)
}

/// Parse a numeric field, rejecting empty, non-numeric or negative text.
pub fn parse_strict(field: &str, input: &str) -> DomainResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    let value = Decimal::from_str(trimmed)
        .map_err(|_| DomainError::validation(format!("{field} must be a number, got '{trimmed}'")))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!("{field} must not be negative")));
    }
    Ok(value)
}

/// Round a currency amount to two places, halves away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `base * rate / 100`, or zero if the product leaves the decimal range.
pub fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    base.checked_mul(rate)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// `a * b`, or zero if the product leaves the decimal range.
pub fn product_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

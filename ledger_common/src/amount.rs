//! Fixed-point money handling
//!
//! All balances and amounts are `Decimal`s with a scale of exactly two.
//! Rounding to two places is always done with [`RoundingStrategy::MidpointAwayFromZero`],
//! so `"0.005"` becomes `0.01` and `"-0.005"` becomes `-0.01`.
//!
//! Strings are decoded here, at the boundary; no arithmetic is ever done on the string form.

use crate::errors::LedgerError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// The number of decimal places every balance and amount is kept at.
pub const SCALE: u32 = 2;

/// **Rounds a value to two decimal places and fixes its scale at two**
///
/// Negative zero is turned into plain zero.
///
/// Values too large to be held at a scale of two keep a smaller scale;
/// see [`normalize_checked`].
pub fn normalize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Like [`normalize`], but `None` when the result can't be held at a scale of two.
pub fn normalize_checked(value: Decimal) -> Option<Decimal> {
    let normalized = normalize(value);
    (normalized.scale() == SCALE).then_some(normalized)
}

/// Plain decimal notation only: an optional sign, digits, and an optional fraction.
///
/// `Decimal::from_str` is more lenient than that; it skips underscores, for one.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a decimal-looking string and normalizes it.
fn parse_decimal(text: &str) -> Result<Decimal, LedgerError> {
    let trimmed = text.trim();
    if !is_plain_decimal(trimmed) {
        return Err(LedgerError::InvalidAmount(text.to_string()));
    }

    Decimal::from_str(trimmed)
        .ok()
        .and_then(normalize_checked)
        .ok_or_else(|| LedgerError::InvalidAmount(text.to_string()))
}

/// **Parses a transfer amount**
///
/// # Errors
/// - Not a number, or zero or negative after rounding, `LedgerError::InvalidAmount`
pub fn parse_amount(text: &str) -> Result<Decimal, LedgerError> {
    let amount = parse_decimal(text)?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(text.to_string()));
    }
    Ok(amount)
}

/// **Parses an account balance**
///
/// Zero is a valid balance.
///
/// # Errors
/// - Not a number, or negative after rounding, `LedgerError::InvalidAmount`
pub fn parse_balance(text: &str) -> Result<Decimal, LedgerError> {
    let balance = parse_decimal(text)?;
    if balance < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(text.to_string()));
    }
    Ok(balance)
}

/// The two-decimal string form used on the wire, e.g. `"70.00"`.
pub fn to_wire(value: Decimal) -> String {
    normalize(value).to_string()
}

pub(crate) fn serialize_balance<S: Serializer>(
    balance: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_wire(*balance))
}

pub(crate) fn deserialize_balance<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Decimal, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_balance(&text).map_err(serde::de::Error::custom)
}

//! # Money Module
//!
//! Prices are stored and transported as integer cents.
//!
//! ## Where Prices Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scanner view: user types the shelf price "2.99"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "2.99".parse::<Money>()  ──►  Money(299)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  inventory.price_cents = 299                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Map popup renders "$2.99"                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `"0.1" + "0.2"` is never evaluated in floating point anywhere in the
//! pipeline: the text is split on the decimal point and both halves are parsed
//! as integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Largest shelf price accepted from price text: $10,000.00.
pub const MAX_PRICE_CENTS: i64 = 1_000_000;

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use canscout_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).cents(), 299);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use canscout_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(3, 49).cents(), 349);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Parses shelf-price text into cents.
///
/// ## Accepted Forms
/// - `"2.99"`, `"$2.99"`, `" 2.99 "` → 299
/// - `"3"` → 300, `"3.5"` → 350, `".99"` → 99
///
/// ## Rejected
/// - negative values, more than two decimals, anything non-numeric,
///   values above $10,000
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let text = text.strip_prefix('$').unwrap_or(text).trim();

        if text.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let invalid = || ValidationError::invalid_format("price", "expected a dollar amount like 2.99");

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || whole.len() > 9 {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let money = Money::from_major_minor(dollars, cents);
        if money.cents() > MAX_PRICE_CENTS {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            });
        }

        Ok(money)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_symbol() {
        assert_eq!("2.99".parse::<Money>().unwrap().cents(), 299);
        assert_eq!("$2.99".parse::<Money>().unwrap().cents(), 299);
        assert_eq!("  $ 4.09 ".parse::<Money>().unwrap().cents(), 409);
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("3".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("3.5".parse::<Money>().unwrap().cents(), 350);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("$".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("-1.00".parse::<Money>().is_err());
        assert!("2.999".parse::<Money>().is_err());
        assert!("two dollars".parse::<Money>().is_err());
        assert!("1,000.00".parse::<Money>().is_err());
        assert!("20000".parse::<Money>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(299).to_string(), "$2.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-$1.50");
    }
}

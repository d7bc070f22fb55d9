//! # Money Module
//!
//! Provides the `Money` type for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Stored as REAL:   12.10 may come back as 12.0999999999999996           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "12.10" typed at the prompt → 1210 cents → shown as 12.10            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price: Money = "12.5".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.to_string(), "12.50");
//!
//! // Extra decimals round to the nearest cent, halves away from zero
//! let price: Money = "0.125".parse().unwrap();
//! assert_eq!(price.cents(), 13);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of fractional digits kept when parsing a price.
const MINOR_DIGITS: usize = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Parsing
// =============================================================================

fn invalid(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a decimal amount such as `12`, `12.5`, `12.505` or `.99`.
///
/// ## Rules
/// - Optional leading `-` (rejected later by [`crate::validation::validate_price`])
/// - Any number of fractional digits; beyond two the amount is rounded to
///   the nearest cent, halves away from zero (`12.505` → `12.51`)
/// - Digits only, no exponents, thousands separators or currency symbols
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number such as 12.50"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number such as 12.50"));
        }

        let (kept, dropped) = fraction.split_at(fraction.len().min(MINOR_DIGITS));
        let round_up = dropped.as_bytes().first().is_some_and(|&d| d >= b'5');

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        // "5" → 50 cents, "05" → 5 cents
        let kept: i64 = format!("{kept:0<width$}", width = MINOR_DIGITS)
            .parse()
            .map_err(|_| invalid("expected a number such as 12.50"))?;

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(kept))
            .and_then(|c| c.checked_add(i64::from(round_up)))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount with two decimals, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.whole_units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.whole_units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.05".parse::<Money>().unwrap().cents(), 1205);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!("  3.10 ".parse::<Money>().unwrap().cents(), 310);
        assert_eq!("-1.5".parse::<Money>().unwrap().cents(), -150);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "-", "abc", "1,50", "$5", "1.2.3", "1e3", "1.2x"] {
            let err = input.parse::<Money>().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rounds_extra_decimals_to_cents() {
        assert_eq!("0.125".parse::<Money>().unwrap().cents(), 13);
        assert_eq!("12.505".parse::<Money>().unwrap().cents(), 1251);
        assert_eq!("12.504999".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("1.234".parse::<Money>().unwrap().cents(), 123);
        assert_eq!("0.999".parse::<Money>().unwrap().cents(), 100);
        assert_eq!(".001".parse::<Money>().unwrap().cents(), 0);
        assert_eq!("-0.125".parse::<Money>().unwrap().cents(), -13);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("92233720368547758.07".parse::<Money>().is_ok());
        assert!("92233720368547758.08".parse::<Money>().is_err());
        assert!("92233720368547758.075".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_negative_check() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }
}

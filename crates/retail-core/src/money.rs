//! # Money Type
//!
//! Unit prices are handled as integer cents.
//!
//! ## Storage Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console input "2.50" ──► Money::parse ──► Money(250)                   │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  Product.pricePerUnit (REAL) ◄── to_dollars() ── 2.5                    │
//! │                                                                         │
//! │  Product.pricePerUnit (REAL) ──► from_dollars() ──► Money(250)          │
//! │                                  (rounded to the nearest cent)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic and comparisons happen on cents; floats only exist at the
//! column boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates money from cents.
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a dollar amount read from a REAL column, rounding to the
    /// nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(2.0).cents(), 200);
    /// assert_eq!(Money::from_dollars(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    /// Parses a user-entered price such as `2`, `2.5` or `2.50`.
    ///
    /// ## Rules
    /// - Digits with an optional `.` and at most two fractional digits
    /// - Optional leading `$`
    /// - Negative amounts are rejected
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::money::Money;
    ///
    /// assert_eq!(Money::parse("2.50").unwrap().cents(), 250);
    /// assert_eq!(Money::parse("$3").unwrap().cents(), 300);
    /// assert!(Money::parse("1.999").is_err());
    /// assert!(Money::parse("-1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let digits = input.strip_prefix('$').unwrap_or(input);

        if digits.starts_with('-') {
            return Err(ValidationError::MustNotBeNegative {
                field: "price".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number like 2.50"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number like 2.50"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("expected digits"))? * 10,
            _ => frac.parse().map_err(|_| invalid("expected digits"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in dollars for the REAL price column.
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Price of `qty` units, or `None` when the total does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::Money;
    ///
    /// assert_eq!(Money::from_cents(250).checked_mul(4), Some(Money::from_cents(1000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`2.00`), the way prices appear in report tables.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(200).to_string(), "2.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("2").unwrap().cents(), 200);
        assert_eq!(Money::parse("2.5").unwrap().cents(), 250);
        assert_eq!(Money::parse("2.05").unwrap().cents(), 205);
        assert_eq!(Money::parse(" .75 ").unwrap().cents(), 75);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);

        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("2.999").is_err());
        assert!(matches!(
            Money::parse("-2"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_dollar_boundary_round_trips() {
        for cents in [0, 1, 199, 200, 1099, 123_456] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::from_dollars(money.to_dollars()), money);
        }
    }

    #[test]
    fn test_arithmetic() {
        let unit = Money::from_cents(200);
        assert_eq!(unit.checked_mul(3), Some(Money::from_cents(600)));
        assert_eq!(unit.checked_mul(0), Some(Money::zero()));

        let dearest = Money::parse("92233720368547758.07").unwrap();
        assert_eq!(dearest.checked_mul(1), Some(dearest));
        assert_eq!(dearest.checked_mul(2), None);
        assert!(Money::from_cents(-1).is_negative());
    }
}

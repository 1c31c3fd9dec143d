//! # Money Module
//!
//! Provides the `Money` type for every amount column on a bill.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a week of float columns:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                             │
//! │    10 + 20 = 30 paise, always                                          │
//! │                                                                         │
//! │  Floats exist only at the edges:                                       │
//! │    backend JSON ──► from_f64 (rounded) ──► Money ──► to_f64 ──► xlsx  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billbook_core::money::Money;
//!
//! let cash = Money::parse("120.50").unwrap();
//! let bank = Money::from_minor(2_000);
//! assert_eq!((cash + bank).to_string(), "140.50");
//!
//! // A cleared form cell counts as zero
//! assert!(Money::parse("").unwrap().is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

/// Minor units per major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: amounts such as DUE or adjustments may be negative
/// - **Transparent serde**: sheet files and tests see the raw minor units;
///   the backend wire format goes through [`Money::from_f64`]/[`Money::to_f64`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use billbook_core::money::Money;
    ///
    /// let amount = Money::from_minor(1099); // 10.99
    /// assert_eq!(amount.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses user input such as `"1200"`, `"1200.5"` or `"-30.25"`.
    ///
    /// Empty or whitespace-only input is zero, matching a blank cell on the
    /// weekly sheet. More than two fractional digits is rejected rather than
    /// silently rounded.
    ///
    /// ## Example
    /// ```rust
    /// use billbook_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12.5").unwrap().minor(), 1250);
    /// assert_eq!(Money::parse("  ").unwrap(), Money::zero());
    /// assert!(Money::parse("1.005").is_err());
    /// assert!(Money::parse("12abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::parse_field("amount", input)
    }

    /// Same as [`Money::parse`], naming `field` in the error.
    pub fn parse_field(field: &str, input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Money::zero());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("expected a number"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("expected a number"))?,
        };

        let minor = whole_value
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|v| v.checked_add(fraction_value))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -minor } else { minor }))
    }

    /// Converts a JSON number into Money, rounding to the nearest minor unit.
    ///
    /// Returns `None` for NaN, infinities, and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use billbook_core::money::Money;
    ///
    /// // 0.1 + 0.2 as produced by a float-summing backend
    /// assert_eq!(Money::from_f64(0.30000000000000004), Some(Money::from_minor(30)));
    /// assert_eq!(Money::from_f64(f64::NAN), None);
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * MINOR_PER_MAJOR as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(scaled as i64))
    }

    /// Converts to a float in major units, for JSON and spreadsheet cells.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Formats with a currency symbol in front: `₹1234.50`, `-₹5.00`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{symbol}{}", self.abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering: `1234.50`, `-5.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.major().abs(), self.minor_part());
        f.pad(&text)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_parse_accepts_common_inputs() {
        assert_eq!(Money::parse("1200").unwrap(), Money::from_major(1200));
        assert_eq!(Money::parse("12.5").unwrap().minor(), 1250);
        assert_eq!(Money::parse("12.05").unwrap().minor(), 1205);
        assert_eq!(Money::parse(".75").unwrap().minor(), 75);
        assert_eq!(Money::parse("7.").unwrap().minor(), 700);
        assert_eq!(Money::parse(" -30.25 ").unwrap().minor(), -3025);
        assert_eq!(Money::parse("+4").unwrap().minor(), 400);
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(Money::parse("").unwrap(), Money::zero());
        assert_eq!(Money::parse("   ").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1,000").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("--5").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_precision() {
        let err = Money::parse_field("CASH", "1.005").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "CASH".to_string(),
                reason: "at most two decimal places are allowed".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_from_f64_rounds_to_minor_unit() {
        assert_eq!(Money::from_f64(10.99), Some(Money::from_minor(1099)));
        assert_eq!(Money::from_f64(0.1 + 0.2), Some(Money::from_minor(30)));
        assert_eq!(Money::from_f64(-5.5), Some(Money::from_minor(-550)));
        assert_eq!(Money::from_f64(f64::INFINITY), None);
        assert_eq!(Money::from_f64(1e30), None);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Money::from_minor(1250).to_f64(), 12.5);
        assert_eq!(Money::from_minor(-5).to_f64(), -0.05);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(format!("{:>8}", Money::from_minor(150)), "    1.50");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_minor(123450).format_with_symbol("₹"), "₹1234.50");
        assert_eq!(Money::from_minor(-500).format_with_symbol("₹"), "-₹5.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);
        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((-a).minor(), -1000);

        let values = [a, b, Money::from_minor(1)];
        let by_ref: Money = values.iter().sum();
        let by_value: Money = values.into_iter().sum();
        assert_eq!(by_ref, Money::from_minor(1501));
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_minor(i64::MAX);
        let min = Money::from_minor(i64::MIN);
        assert_eq!(max + Money::from_minor(1), max);
        assert_eq!(min - Money::from_minor(1), min);
        assert_eq!(-min, max);
        let total: Money = [max, max, Money::from_minor(-5)].into_iter().sum();
        assert_eq!(total, max - Money::from_minor(5));
    }
}

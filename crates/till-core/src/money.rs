//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    229.97 * 0.08 = 18.397599999999997                                   │
//! │    toFixed(2) hides it on screen, but the stored total drifts          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    22997 cents × 800 bps = 18397600 / 10000 = 1839.76 → 1840 cents     │
//! │    Rounding happens ONCE, with an explicit rule                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(4999); // $49.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // $99.98
//! let total = price + Money::from_cents(12999); // $179.98
//! assert_eq!(doubled.cents(), 9998);
//! assert_eq!(total.to_string(), "$179.98");
//!
//! // Typed amounts from the tender screen are parsed, never float-converted
//! let tendered: Money = "250.00".parse().unwrap();
//! assert_eq!(tendered.cents(), 25000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{RoundingMode, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (tendered − due) can go negative before
///   they are checked
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// CatalogItem.unit_price ──► CartLine.line_total ──► subtotal
///                                                       │
///                                   tax ◄── TaxRate ────┤
///                                                       ▼
///                                   total ──► amount_due ──► change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(12999); // $129.99
    /// assert_eq!(price.cents(), 12999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -$5.50.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(248, 37).cents(), 24837);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
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

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// Used for change due: tendering less than the total never shows a
    /// negative figure.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let due = Money::from_cents(24837);
    /// assert_eq!(Money::from_cents(25000).saturating_sub_floor(due).cents(), 163);
    /// assert!(Money::from_cents(20000).saturating_sub_floor(due).is_zero());
    /// ```
    #[inline]
    pub fn saturating_sub_floor(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Calculates tax on this amount at `rate`, rounded to whole cents.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  amount_cents × bps / 10000, remainder resolved by RoundingMode     │
    /// │                                                                     │
    /// │  Nearest: half-up        1839.76 → 1840    0.825 → 0.83             │
    /// │  Up:      any remainder  1839.01 → 1840                             │
    /// │  Down:    truncate       1839.99 → 1839                             │
    /// │                                                                     │
    /// │  Negative amounts round symmetrically (magnitude first, then sign) │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::{RoundingMode, TaxRate};
    ///
    /// let subtotal = Money::from_cents(22997); // $229.97
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800), RoundingMode::Nearest);
    /// assert_eq!(tax.cents(), 1840); // $18.40
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate, rounding: RoundingMode) -> Money {
        // i128 so large subtotals can't overflow the intermediate product
        let scaled = self.0 as i128 * rate.bps() as i128;
        let magnitude = scaled.abs();
        let quotient = magnitude / 10_000;
        let remainder = magnitude % 10_000;

        let rounded = match rounding {
            RoundingMode::Nearest if remainder * 2 >= 10_000 => quotient + 1,
            RoundingMode::Up if remainder > 0 => quotient + 1,
            _ => quotient,
        };

        let signed = if scaled < 0 { -rounded } else { rounded };
        Money::from_cents(signed as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4999); // $49.99
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 9998);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a typed decimal amount such as `"250.00"`, `"$19.5"` or `"12"`.
///
/// At most two fraction digits are accepted; anything finer is not a
/// currency amount and is rejected rather than silently rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a decimal number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| invalid("amount is too large"))?
        };
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid("bad fraction"))?,
        };

        let cents = whole_cents
            .checked_add(frac_cents)
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with a dollar sign and two decimals: `$248.37`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(12999);
        assert_eq!(money.cents(), 12999);
        assert_eq!(money.dollars(), 129);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(24837).to_string(), "$248.37");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_tax_nearest_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        let tax = amount.calculate_tax(TaxRate::from_bps(825), RoundingMode::Nearest);
        assert_eq!(tax.cents(), 83);

        // $229.97 at 8% = $18.3976 → $18.40
        let amount = Money::from_cents(22997);
        let tax = amount.calculate_tax(TaxRate::from_bps(800), RoundingMode::Nearest);
        assert_eq!(tax.cents(), 1840);

        // $0.06 at 8% = $0.0048 → $0.00
        let tax = Money::from_cents(6).calculate_tax(TaxRate::from_bps(800), RoundingMode::Nearest);
        assert_eq!(tax.cents(), 0);
    }

    #[test]
    fn test_tax_up_and_down() {
        let amount = Money::from_cents(22997);
        let rate = TaxRate::from_bps(800);
        assert_eq!(amount.calculate_tax(rate, RoundingMode::Up).cents(), 1840);
        assert_eq!(amount.calculate_tax(rate, RoundingMode::Down).cents(), 1839);

        // Exact amounts are untouched by every mode
        let exact = Money::from_cents(1000);
        for mode in [RoundingMode::Nearest, RoundingMode::Up, RoundingMode::Down] {
            assert_eq!(exact.calculate_tax(TaxRate::from_bps(1000), mode).cents(), 100);
        }
    }

    #[test]
    fn test_tax_negative_amount_is_symmetric() {
        let refund = Money::from_cents(-1000);
        let tax = refund.calculate_tax(TaxRate::from_bps(825), RoundingMode::Nearest);
        assert_eq!(tax.cents(), -83);
    }

    #[test]
    fn test_tax_zero_rate() {
        let tax = Money::from_cents(22997).calculate_tax(TaxRate::zero(), RoundingMode::Up);
        assert!(tax.is_zero());
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!("250.00".parse::<Money>().unwrap().cents(), 25000);
        assert_eq!("250".parse::<Money>().unwrap().cents(), 25000);
        assert_eq!("$19.5".parse::<Money>().unwrap().cents(), 1950);
        assert_eq!(" 0.07 ".parse::<Money>().unwrap().cents(), 7);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("-5.50".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "1.234".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!("12a".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_saturating_sub_floor() {
        let due = Money::from_cents(24837);
        assert_eq!(Money::from_cents(25000).saturating_sub_floor(due).cents(), 163);
        assert_eq!(due.saturating_sub_floor(due).cents(), 0);
        assert_eq!(Money::from_cents(100).saturating_sub_floor(due).cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}

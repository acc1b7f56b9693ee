//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `Rate` type for the fixed discount and tax percentages.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.9 × 20.00 × 3 = 54.00000000000001  ❌                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    line total = 2000 × 3 × 9000 / 10000 = 5400 cents  (exactly 54.00)  │
//! │                                                                         │
//! │  Rounding happens once, half up, after the whole product is formed.    │
//! │  Arithmetic that can grow is checked and reports overflow as `None`.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let mrp: Money = "19.99".parse().unwrap();
//! assert_eq!(mrp.cents(), 1999);
//!
//! let doubled = mrp.checked_mul(2).unwrap();
//! assert_eq!(doubled.to_string(), "39.98");
//! assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10% and 500 bps = 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The share left after taking this rate off: 10% gives 90%.
    #[inline]
    pub const fn complement(&self) -> Self {
        Rate(10_000u32.saturating_sub(self.0))
    }
}

/// Renders as a percentage: `5%`, `8.25%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents/paise).
///
/// ## Where Money is Used
/// ```text
/// InventoryRecord.mrp ──► apply_discount(10%) ──► SalesLineItem.sale_price
///         │
///         └── checked_mul(quantity) ──► apply_discount(10%) ──► SalesLineItem.line_total
///                                                                      │
///                                                        checked_sum   ▼
///                               Receipt.subtotal ──► calculate_tax(5%) ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole units (e.g. `Money::from_units(20)` is 20.00).
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax at the given rate, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_cents(12600); // 126.00
    /// let tax = subtotal.calculate_tax(Rate::from_bps(500));
    /// assert_eq!(tax.cents(), 630); // 6.30
    /// ```
    pub fn calculate_tax(&self, rate: Rate) -> Money {
        Money::from_cents(Self::portion(self.0, rate))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The amount is scaled by the complement of `rate` and rounded half up,
    /// so 10% off 0.15 is 0.14 (0.135 rounded).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::{Money, Rate};
    ///
    /// let mrp = Money::from_cents(10000); // 100.00
    /// let sale_price = mrp.apply_discount(Rate::from_bps(1000)); // 10% off
    /// assert_eq!(sale_price.cents(), 9000); // 90.00
    /// ```
    pub fn apply_discount(&self, rate: Rate) -> Money {
        Money::from_cents(Self::portion(self.0, rate.complement()))
    }

    /// Multiplies by a quantity; `None` on overflow.
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts; `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts; `None` if the running total overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// `cents × rate`, rounded half up. Never exceeds `cents` for rates up
    /// to 100%, so the narrowing cast is lossless.
    fn portion(cents: i64, rate: Rate) -> i64 {
        ((cents as i128 * rate.bps() as i128 + 5000) / 10000) as i64
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Errors from parsing decimal text into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    Invalid(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

/// Parses decimal text (`20`, `19.99`, `17.991000000000003`, `-5.5`).
///
/// More than two fractional digits are rounded half up (away from zero)
/// to the nearest cent.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let invalid = || ParseMoneyError::Invalid(text.to_string());
        let overflow = || ParseMoneyError::Overflow(text.to_string());

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };

        let digit = |i: usize| -> i64 {
            frac.as_bytes()
                .get(i)
                .map(|b| (b - b'0') as i64)
                .unwrap_or(0)
        };
        let round_up = if digit(2) >= 5 { 1 } else { 0 };
        let frac_cents = digit(0) * 10 + digit(1) + round_up;

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders with exactly two fractional digits and no currency symbol
/// (`54.00`, `-5.50`), matching the data files and the receipt.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Amounts travel as their decimal text ("20.00") so the CSV columns stay
// human-editable.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
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
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_units(20).cents(), 2000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_parse_plain_and_decimal() {
        assert_eq!("20".parse::<Money>().unwrap().cents(), 2000);
        assert_eq!("20.0".parse::<Money>().unwrap().cents(), 2000);
        assert_eq!("19.99".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!(" 7.5 ".parse::<Money>().unwrap().cents(), 750);
        assert_eq!(".25".parse::<Money>().unwrap().cents(), 25);
        assert_eq!("-5.5".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!("17.991000000000003".parse::<Money>().unwrap().cents(), 1799);
        assert_eq!("0.125".parse::<Money>().unwrap().cents(), 13);
        assert_eq!("0.124".parse::<Money>().unwrap().cents(), 12);
        assert_eq!("0.995".parse::<Money>().unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(ParseMoneyError::Invalid(_))));
        assert!(matches!("1.2.3".parse::<Money>(), Err(ParseMoneyError::Invalid(_))));
        assert!(matches!(".".parse::<Money>(), Err(ParseMoneyError::Invalid(_))));
        assert!(matches!("1e5".parse::<Money>(), Err(ParseMoneyError::Invalid(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(ParseMoneyError::Overflow(_))
        ));
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.checked_mul(3), Some(Money::from_cents(3000)));
        assert_eq!(Money::checked_sum([a, b, b]), Some(Money::from_cents(2000)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(huge.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::checked_sum([huge, Money::from_cents(1)]), None);

        // scaling never overflows, even at the top of the range
        assert!(huge.apply_discount(Rate::from_bps(1000)).is_positive());
        assert!(huge.calculate_tax(Rate::from_bps(500)).is_positive());
    }

    #[test]
    fn test_discount_and_tax() {
        let mrp = Money::from_units(20);
        let sale_price = mrp.apply_discount(Rate::from_bps(1000));
        assert_eq!(sale_price.cents(), 1800);

        let subtotal = Money::from_cents(12600);
        assert_eq!(subtotal.calculate_tax(Rate::from_bps(500)).cents(), 630);

        // 90% of 0.15 is 0.135, which rounds half up to 0.14
        let cheap = Money::from_cents(15);
        assert_eq!(cheap.apply_discount(Rate::from_bps(1000)).cents(), 14);
    }

    #[test]
    fn test_discount_rounds_once_on_odd_cents() {
        let ten = Rate::from_bps(1000);
        let mrp = Money::from_cents(1005); // 10.05

        // 9.045 rounds to 9.05 per unit
        assert_eq!(mrp.apply_discount(ten).cents(), 905);

        // 100 units: 0.9 × 1005 × 100 = 90450 exactly, no per-unit drift
        let gross = mrp.checked_mul(100).unwrap();
        assert_eq!(gross.apply_discount(ten).to_string(), "904.50");
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_bps(500).to_string(), "5%");
        assert_eq!(Rate::from_bps(1000).to_string(), "10%");
        assert_eq!(Rate::from_bps(825).to_string(), "8.25%");
        assert_eq!(Rate::from_bps(750).to_string(), "7.5%");
        assert_eq!(Rate::from_bps(1000).complement(), Rate::from_bps(9000));
        assert_eq!(Rate::from_bps(12_000).complement(), Rate::from_bps(0));
    }

    #[test]
    fn test_positive_check() {
        assert!(!Money::zero().is_positive());
        assert!(Money::from_cents(100).is_positive());
        assert!(!Money::from_cents(-100).is_positive());
    }
}

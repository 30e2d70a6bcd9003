//! # Money
//!
//! Prices and totals as whole cents.
//!
//! ## Cart Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Toothbrush 1000 + Laptop 60000          = total            61000      │
//! │  61000 × 1000 bps, rounded half up       = discount_amount   6100      │
//! │  61000 - 6100                            = final_total      54900      │
//! │                                                                         │
//! │  All three are i64 cents, so final_total = total - discount_amount     │
//! │  holds exactly. Floats only ever appear in DiscountFactor::fraction    │
//! │  for display.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::money::Money;
//!
//! let chocolate = Money::from_cents(1200);
//! let juice = Money::from_cents(500);
//! assert_eq!((chocolate + juice).to_string(), "$17.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// An amount of money in cents. Serializes as the bare integer.
///
/// ## Flow Through the Cart
/// ```text
/// Item.price_cents ──► Cart total ──► discount_amount ──► final_total
///                                                             │
///                                      Displayed as "$549.00" ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero (`-550` gives `-5`).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents after the decimal point, 0 to 99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `bps` basis points of this amount, rounded to the nearest cent
    /// (half up).
    ///
    /// Computed as `(cents * bps + 5000) / 10000` in i128.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let total = Money::from_cents(61000); // $610.00
    /// assert_eq!(total.percentage(1000).cents(), 6100); // 10% = $61.00
    ///
    /// // $0.15 at 5% = 0.75 cents → 1 cent
    /// assert_eq!(Money::from_cents(15).percentage(500).cents(), 1);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$10.99`, `-$5.50`. Other currency symbols are the renderer's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().abs(), self.cents_part())
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

/// Summing an iterator of prices (cart totals).
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
    fn test_parts() {
        let tv = Money::from_cents(80_001);
        assert_eq!(tv.dollars(), 800);
        assert_eq!(tv.cents_part(), 1);

        let refund = Money::from_cents(-1205);
        assert_eq!(refund.dollars(), -12);
        assert_eq!(refund.cents_part(), 5);
        assert!(refund.is_negative());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(Money::from_cents(54900).to_string(), "$549.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-1205).to_string(), "-$12.05");
        assert_eq!(Money::default().to_string(), "$0.00");
    }

    #[test]
    fn test_operators() {
        let laptop = Money::from_cents(60000);
        let toothbrush = Money::from_cents(1000);
        assert_eq!(laptop + toothbrush, Money::from_cents(61000));
        assert_eq!(laptop - toothbrush, Money::from_cents(59000));

        let mut running = Money::zero();
        running += laptop;
        running -= toothbrush;
        assert_eq!(running.cents(), 59000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1000, 80000, 60000]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 141000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_percentage_exact() {
        let total = Money::from_cents(61000);
        assert_eq!(total.percentage(0).cents(), 0);
        assert_eq!(total.percentage(500).cents(), 3050);
        assert_eq!(total.percentage(1000).cents(), 6100);
        assert_eq!(total.percentage(1500).cents(), 9150);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5 cents at 10% = 0.5 cent → 1
        assert_eq!(Money::from_cents(5).percentage(1000).cents(), 1);
        // 4 cents at 10% = 0.4 cent → 0
        assert_eq!(Money::from_cents(4).percentage(1000).cents(), 0);
    }

    #[test]
    fn test_percentage_no_overflow() {
        let big = Money::from_cents(i64::MAX / 2);
        let pct = big.percentage(1500);
        assert!(pct.cents() > 0);
    }
}

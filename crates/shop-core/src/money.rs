//! # Money
//!
//! Prices and totals as whole euro cents.
//!
//! ```text
//! Product.price ──► CartEntry::line_total() ──► Cart::total_price()
//!       ▲               (price × quantity)         (Σ line totals)
//!       │
//!       └── QR payload: priceEuros * 100 + priceCents
//! ```
//!
//! Cart arithmetic saturates at the `i64` bounds instead of wrapping or
//! panicking, so adding to a cart stays infallible.
//!
//! ```rust
//! use shop_core::money::Money;
//!
//! let line = Money::from_cents(399) * 3;
//! assert_eq!(line.cents(), 1197);
//! assert_eq!(line.to_string(), "€11.97");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// An amount in euro cents. Serializes as the bare integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn zero() -> Self {
        Money(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole euros, truncated toward zero.
    ///
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).euros(), 10);
    /// assert_eq!(Money::from_cents(-550).euros(), -5);
    /// ```
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// The 0..=99 remainder shown after the decimal point.
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price times a line quantity.
    ///
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let bananas = Money::from_cents(249);
    /// assert_eq!(bananas.multiply_quantity(3).cents(), 747);
    /// ```
    pub const fn multiply_quantity(&self, quantity: i64) -> Self {
        Money(self.0.saturating_mul(quantity))
    }
}

/// `€3.50`, `-€5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "€{}.{:02}", self.euros().unsigned_abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        self.multiply_quantity(quantity)
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

//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Decimal, and Why Unrounded?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE ROUNDING PROBLEM                                                   │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  Rounding every intermediate step:                                      │
//! │    round(tax) + round(fee) + ... drifts from round(sum)  ❌             │
//! │                                                                         │
//! │  OUR SOLUTION: exact decimals, rounded once at the display boundary    │
//! │    subtotal × 0.13 = 57.85 exactly                                     │
//! │    Money::rounded() / Display are the only places that round           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pasal_core::money::Money;
//!
//! let price = Money::from_rupees(180);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.to_string(), "Rs. 360.00");
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::CURRENCY_PREFIX;

/// Decimal places shown to customers.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, no float drift
/// - **Signed**: differences (e.g. "amount until free shipping") can be computed
///   before clamping
/// - **JSON number on the wire**: matches what the storefront client sends
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLineItem.unit_price ──► line total
///                                                   │
///                        Σ lines ──► subtotal ──► VAT ──► total
///                                                   ▲
///                 DeliveryEstimate.fee ──► policy ──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    Decimal,
);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(Decimal::MAX);

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::money::Money;
    ///
    /// let fee = Money::from_rupees(50);
    /// assert_eq!(fee.to_string(), "Rs. 50.00");
    /// ```
    pub const fn from_rupees(rupees: i64) -> Self {
        let magnitude = rupees.unsigned_abs();
        Money(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            0,
            rupees < 0,
            0,
        ))
    }

    /// Creates a Money value from paisa (1/100 rupee).
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::money::Money;
    ///
    /// assert_eq!(Money::from_paisa(5785).to_string(), "Rs. 57.85");
    /// ```
    pub const fn from_paisa(paisa: i64) -> Self {
        let magnitude = paisa.unsigned_abs();
        Money(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            0,
            paisa < 0,
            2,
        ))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Converts a float (query strings, config). `None` for NaN or infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64(value).map(Money)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Calculates tax on this amount. The result is NOT rounded.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::money::Money;
    /// use pasal_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(445);
    /// let vat = subtotal.calculate_tax(TaxRate::from_bps(1300));
    /// assert_eq!(vat, Money::from_paisa(5785)); // Rs. 57.85
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * Decimal::from(rate.bps()) / Decimal::from(10_000u32))
    }

    /// [`calculate_tax`](Self::calculate_tax), `None` on overflow.
    pub fn checked_calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0
            .checked_mul(Decimal::from(rate.bps()))?
            .checked_div(Decimal::from(10_000u32))
            .map(Money)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }

    /// [`multiply_quantity`](Self::multiply_quantity), `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Even share of `count` parts, `None` when `count` is zero.
    pub fn checked_split(&self, count: usize) -> Option<Money> {
        self.0.checked_div(Decimal::from(count)).map(Money)
    }

    /// Addition, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Rounds to 2 decimal places, half away from zero.
    ///
    /// Only call this at a display or serialization boundary; arithmetic
    /// should keep working on the unrounded value.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns the larger of `self` and zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Money {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Returns the rounded amount in paisa.
    ///
    /// Payment gateways (Khalti) expect integer paisa.
    pub fn to_paisa(&self) -> i64 {
        (self.rounded().0 * Decimal::ONE_HUNDRED)
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `Rs. 602.85`. Always two decimals, always rounded.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-{} {:.2}", CURRENCY_PREFIX, rounded.abs())
        } else {
            write!(f, "{} {:.2}", CURRENCY_PREFIX, rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At checkout, the error compounds:                                      │
//! │    subtotal × 0.9 (discount) + weight × 4 × 0.5 (shipping)             │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 decimals (rust_decimal)                          │
//! │    600 × 0.9 = 540.0 exactly                                           │
//! │    Rounding happens once, at display time, never in between            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwright_core::money::Money;
//!
//! let price = Money::parse("10.99").unwrap();
//!
//! let doubled = price.multiply_quantity(2);       // 21.98
//! let total = price + Money::from_units(5);       // 15.99
//! assert_eq!(total.to_string(), "15.99");
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! # let _ = doubled;
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for discounts
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **No implicit rounding**: intermediate values keep full scale
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem subtotal ──► discounted items ─┐
///                                                            ├─► total ──► PaymentPort::authorize
/// weight bracket fee ──► tier adjustment ───────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a whole number of major units.
    ///
    /// ## Example
    /// ```rust
    /// use cartwright_core::money::Money;
    ///
    /// let price = Money::from_units(150);
    /// assert_eq!(price.to_string(), "150");
    /// ```
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Parses an amount written in base 10 (e.g. `"19.90"`).
    ///
    /// ## Example
    /// ```rust
    /// use cartwright_core::money::Money;
    ///
    /// assert!(Money::parse("19.90").is_ok());
    /// assert!(Money::parse("nineteen").is_err());
    /// ```
    pub fn parse(text: &str) -> CoreResult<Self> {
        Decimal::from_str(text.trim())
            .map(Money)
            .map_err(|e| CoreError::InvalidAmount {
                input: text.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the underlying decimal amount.
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cartwright_core::money::Money;
    ///
    /// let unit_price = Money::parse("2.99").unwrap();
    /// assert_eq!(unit_price.multiply_quantity(3).to_string(), "8.97");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Adds two amounts, clamping at the largest representable value
    /// instead of overflowing.
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Multiplies money by an exact rate (0.10 for 10%, 0.5 for half).
    ///
    /// The result keeps full precision; nothing is rounded.
    #[inline]
    pub fn scale_by(&self, rate: Decimal) -> Self {
        Money(self.0 * rate)
    }

    /// Rounds to `scale` decimal places, half away from zero, and pads
    /// with trailing zeros so `208` displays as `208.00`.
    ///
    /// ## Example
    /// ```rust
    /// use cartwright_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(208).rounded(2).to_string(), "208.00");
    /// assert_eq!(Money::parse("0.125").unwrap().rounded(2).to_string(), "0.13");
    /// ```
    pub fn rounded(&self, scale: u32) -> Self {
        let mut amount = self
            .0
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(scale);
        Money(amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the decimal amount with whatever scale it carries.
///
/// ## Note
/// Use [`Money::rounded`] first when a fixed number of places is wanted.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

/// Default money is zero.
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

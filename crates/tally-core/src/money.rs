//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The stored data and the operator's cash inputs are decimal strings    │
//! │  and floats. Reconciling in floats means:                              │
//! │    (1000.10 - 300.05) - 50.05 + 200 = 850.0000000000001                │
//! │    variance == 0 → false  ❌ "Short" by a rounding artifact            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every input is rounded to the nearest cent once, at the boundary.   │
//! │    All arithmetic after that is exact.                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(1099);       // 10.99
//! let float = Money::from_major(200);        // 200.00
//! let typed = Money::parse_lenient("12.5");  // 12.50
//! let junk = Money::parse_lenient("abc");    // 0.00, never an error
//!
//! assert_eq!((price + float).cents(), 21099);
//! assert_eq!(typed.cents(), 1250);
//! assert!(junk.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::lenient::parse_float_prefix;

// =============================================================================
// Money Type
// =============================================================================

/// Largest magnitude, in major units, read from stored or typed text.
///
/// Anything beyond this is treated as unreadable and becomes zero.
pub const MAX_READABLE_MAJOR: f64 = 1_000_000_000_000.0;

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Variance and expected cash can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialize as cents**: Report output carries exact integers; stored
///   records use [`crate::lenient::money`] to keep decimal major units
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale.total ──┬──► SalesSummary.total_revenue ──► expected cash        │
/// │               └──► total_cash / total_e_wallet                          │
/// │                                                                         │
/// │  ExpenseEntry.amount ──► ExpenseLedger.sum() ──► expected cash         │
/// │                                                                         │
/// │  Operator inputs (starting float, counted cash) ──► variance           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Rounds to the nearest cent (half away from zero). NaN, infinities and
    /// magnitudes above [`MAX_READABLE_MAJOR`] become zero, matching the
    /// zero-on-unreadable policy.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(12.345).cents(), 1235);
    /// assert_eq!(Money::from_major_f64(f64::NAN).cents(), 0);
    /// assert_eq!(Money::from_major_f64(1e17).cents(), 0);
    /// ```
    pub fn from_major_f64(amount: f64) -> Self {
        if !amount.is_finite() || amount.abs() > MAX_READABLE_MAJOR {
            return Money::zero();
        }
        // Nudge by a tiny epsilon so 12.345 (stored as 12.34499..) rounds up
        let scaled = amount * 100.0;
        let nudged = scaled + scaled.signum() * 1e-7;
        Money(nudged.round() as i64)
    }

    /// Parses operator or stored text into money.
    ///
    /// Follows the forgiving rules of the cashier screen: leading
    /// whitespace is skipped, the longest numeric prefix is used
    /// (`"50php"` → 50.00), and anything unreadable is zero.
    pub fn parse_lenient(input: &str) -> Self {
        parse_float_prefix(input)
            .map(Money::from_major_f64)
            .unwrap_or_default()
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal in major units.
    ///
    /// Only for writing stored records back in their stored decimal form.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
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
        Money(self.0.saturating_abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency symbol.
///
/// The session config adds the configured symbol for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Totals saturate rather than wrap; a report never panics on odd data.
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
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
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

//! Money type for representing monetary values.
//!
//! The marketplace currency has no minor unit, so amounts are whole-unit
//! integers. Rates are applied in `f64` and rounded half-to-even, which keeps
//! results identical to the reference calculator down to its float artefacts
//! (`1000 * 0.0249` is `24.900000000000002`, not `24.9`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::FeeError;

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "$";

/// Round to the nearest integer, ties to even.
///
/// Returns `None` when `value` is not finite or does not fit in an `i64`.
pub fn round_half_even(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}

/// A monetary value in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a new Money value from whole units.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount in whole units.
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add another Money value, returning `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract another Money value, returning `None` on overflow.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Apply a fractional rate and round half-to-even.
    ///
    /// ```
    /// use fee_engine::money::Money;
    /// assert_eq!(Money::new(1000).apply_rate(0.0249).unwrap(), Money::new(25));
    /// assert_eq!(Money::new(100).apply_rate(0.025).unwrap(), Money::new(2));
    /// ```
    pub fn apply_rate(&self, rate: f64) -> Result<Money, FeeError> {
        round_half_even(self.0 as f64 * rate)
            .map(Money)
            .ok_or(FeeError::Overflow)
    }

    /// Convert to a float, for ratios.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Format as a display string (e.g., "$1,234" or "-$56").
    pub fn display(&self) -> String {
        if self.0 < 0 {
            format!("-{}{}", CURRENCY_SYMBOL, group_thousands(self.0.unsigned_abs()))
        } else {
            format!("{}{}", CURRENCY_SYMBOL, group_thousands(self.0.unsigned_abs()))
        }
    }

    /// Format without symbol (e.g., "1,234").
    pub fn display_amount(&self) -> String {
        if self.0 < 0 {
            format!("-{}", group_thousands(self.0.unsigned_abs()))
        } else {
            group_thousands(self.0.unsigned_abs())
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Insert `,` every three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Monetary amounts with exact decimal arithmetic
//!
//! This module provides a value type for reward amounts using rust_decimal,
//! so contributions and savings never pick up floating-point error. Every
//! amount is held at the currency's minor unit (cents).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::percentage::Percentage;

/// Number of fractional digits in the currency's minor unit
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid monetary amount: {0}")]
    Parse(String),

    #[error("Monetary amount {0} has more than {MINOR_UNIT_DIGITS} fractional digits")]
    TooManyDecimals(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// An exact monetary amount, held at the minor unit
///
/// Arithmetic between amounts is exact. Rounding only happens when an amount
/// is scaled by a [`Percentage`], and always uses round-half-up
/// (midpoint away from zero) to the minor unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    /// Creates an amount, rounding half-up to the minor unit
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(
            MINOR_UNIT_DIGITS,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Creates an amount from an integer count of minor units (e.g., cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, MINOR_UNIT_DIGITS))
    }

    /// Creates an amount from a wide count of minor units
    pub fn from_minor_units(minor_units: i128) -> Result<Self, MoneyError> {
        Decimal::try_from_i128_with_scale(minor_units, MINOR_UNIT_DIGITS)
            .map(Self)
            .map_err(|_| MoneyError::Overflow)
    }

    /// Parses a literal such as `"100.00"` or `"$8.00"`
    ///
    /// Literals with more fractional digits than the minor unit are rejected
    /// rather than silently rounded.
    pub fn value_of(text: &str) -> Result<Self, MoneyError> {
        text.parse()
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the amount as a decimal
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as a count of minor units
    pub fn minor_units(&self) -> i128 {
        let mut scaled = self.0;
        scaled.rescale(MINOR_UNIT_DIGITS);
        scaled.mantissa()
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Checked addition
    pub fn checked_add(&self, other: &MonetaryAmount) -> Result<MonetaryAmount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: &MonetaryAmount) -> Result<MonetaryAmount, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a percentage and rounds half-up to the minor unit
    ///
    /// The product is computed exactly in minor units and rounded once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::{MonetaryAmount, Percentage};
    ///
    /// let amount = MonetaryAmount::value_of("100.00").unwrap();
    /// let benefit = amount.multiply_by(&Percentage::value_of("8%").unwrap()).unwrap();
    /// assert_eq!(benefit, MonetaryAmount::value_of("8.00").unwrap());
    /// ```
    pub fn multiply_by(&self, percentage: &Percentage) -> Result<MonetaryAmount, MoneyError> {
        let product = self
            .minor_units()
            .checked_mul(i128::from(percentage.numerator()))
            .ok_or(MoneyError::Overflow)?;
        let rounded = div_round_half_up(product, i128::from(percentage.denominator()));
        Self::from_minor_units(rounded)
    }
}

/// Divides, rounding a tie away from zero. `divisor` must be positive.
fn div_round_half_up(dividend: i128, divisor: i128) -> i128 {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + dividend.signum()
    } else {
        quotient
    }
}

impl FromStr for MonetaryAmount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(MoneyError::Parse(s.to_string()));
        }
        let value = Decimal::from_str(digits).map_err(|_| MoneyError::Parse(s.to_string()))?;
        Self::try_from(value)
    }
}

impl TryFrom<Decimal> for MonetaryAmount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.normalize().scale() > MINOR_UNIT_DIGITS {
            return Err(MoneyError::TooManyDecimals(value.to_string()));
        }
        Ok(Self(value))
    }
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.2}", self.0.abs())
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for MonetaryAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for MonetaryAmount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for MonetaryAmount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a MonetaryAmount> for MonetaryAmount {
    fn sum<I: Iterator<Item = &'a MonetaryAmount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn amount_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = MonetaryAmount::from_minor(a);
            let mb = MonetaryAmount::from_minor(b);
            let mc = MonetaryAmount::from_minor(c);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn multiply_by_full_percentage_is_identity(minor in -1_000_000_000i64..1_000_000_000i64) {
            let amount = MonetaryAmount::from_minor(minor);
            prop_assert_eq!(amount.multiply_by(&Percentage::one_hundred()).unwrap(), amount);
        }

        #[test]
        fn display_round_trips(minor in 0i64..1_000_000_000i64) {
            let amount = MonetaryAmount::from_minor(minor);
            let parsed: MonetaryAmount = amount.to_string().parse().unwrap();
            prop_assert_eq!(parsed, amount);
        }
    }
}

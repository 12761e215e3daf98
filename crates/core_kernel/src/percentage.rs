//! Exact allocation percentages
//!
//! A [`Percentage`] is a reduced fraction in [0, 1]. Values such as one third
//! are held without loss, so three one-third allocations total exactly 100%.
//! Rounding only happens when a percentage is applied to a
//! [`MonetaryAmount`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::money::{MoneyError, MonetaryAmount};

/// Errors that can occur during percentage operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PercentageError {
    #[error("Invalid percentage: {0}")]
    Parse(String),

    #[error("Percentage out of range [0%, 100%]: {0}")]
    OutOfRange(String),

    #[error("Overflow during percentage calculation")]
    Overflow,
}

/// An exact fraction between 0% and 100%
///
/// Always stored in lowest terms, so structural equality is value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percentage {
    numerator: u64,
    denominator: u64,
}

impl Percentage {
    /// 0%
    pub const fn zero() -> Self {
        Self { numerator: 0, denominator: 1 }
    }

    /// 100%
    pub const fn one_hundred() -> Self {
        Self { numerator: 1, denominator: 1 }
    }

    /// Creates a percentage from a ratio, e.g. `from_ratio(1, 3)` for one third
    pub fn from_ratio(numerator: u64, denominator: u64) -> Result<Self, PercentageError> {
        if denominator == 0 {
            return Err(PercentageError::Parse(format!("{}/{}", numerator, denominator)));
        }
        Self::reduced(u128::from(numerator), u128::from(denominator))
    }

    /// Creates a percentage from a fraction, e.g. `0.5` for 50%
    pub fn from_decimal(fraction: Decimal) -> Result<Self, PercentageError> {
        if fraction.is_sign_negative() && !fraction.is_zero() {
            return Err(PercentageError::OutOfRange(fraction.to_string()));
        }
        let normalized = fraction.normalize();
        let numerator = u128::try_from(normalized.mantissa()).map_err(|_| PercentageError::Overflow)?;
        let denominator = 10u128
            .checked_pow(normalized.scale())
            .ok_or(PercentageError::Overflow)?;
        Self::reduced(numerator, denominator)
    }

    /// Creates a percentage from a value in percent, e.g. `12.5` for 12.5%
    pub fn from_percent(percent: Decimal) -> Result<Self, PercentageError> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(PercentageError::OutOfRange(format!("{}%", percent)));
        }
        let normalized = percent.normalize();
        let numerator = u128::try_from(normalized.mantissa()).map_err(|_| PercentageError::Overflow)?;
        let denominator = 10u128
            .checked_pow(normalized.scale())
            .and_then(|scale| scale.checked_mul(100))
            .ok_or(PercentageError::Overflow)?;
        Self::reduced(numerator, denominator)
    }

    /// Parses `"50%"`, `"12.5%"`, a bare fraction such as `"0.5"`, or a ratio such as `"1/3"`
    ///
    /// # Errors
    ///
    /// Returns `PercentageError::Parse` for malformed literals and for values
    /// outside [0%, 100%]
    pub fn value_of(text: &str) -> Result<Self, PercentageError> {
        text.parse()
    }

    /// Returns the numerator in lowest terms
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator in lowest terms
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Returns the fraction as a decimal (0.5 for 50%), rounded to decimal precision
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// Returns true for 0%
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns true for 100%
    pub fn is_one_hundred(&self) -> bool {
        self.numerator == self.denominator
    }

    /// Adds two percentages
    ///
    /// # Errors
    ///
    /// Returns `PercentageError::OutOfRange` if the sum exceeds 100%
    pub fn checked_add(&self, other: &Percentage) -> Result<Percentage, PercentageError> {
        let (a, b) = (u128::from(self.numerator), u128::from(self.denominator));
        let (c, d) = (u128::from(other.numerator), u128::from(other.denominator));

        let numerator = (a * d)
            .checked_add(c * b)
            .ok_or(PercentageError::Overflow)?;
        let denominator = b * d;

        if numerator > denominator {
            return Err(PercentageError::OutOfRange(format!("{} + {}", self, other)));
        }
        Self::reduced(numerator, denominator)
    }

    /// Multiplies two percentages (a share of a share)
    pub fn checked_mul(&self, other: &Percentage) -> Result<Percentage, PercentageError> {
        let numerator = u128::from(self.numerator) * u128::from(other.numerator);
        let denominator = u128::from(self.denominator) * u128::from(other.denominator);
        Self::reduced(numerator, denominator)
    }

    /// Applies this percentage to an amount, rounding half-up to the minor unit
    pub fn multiply_by(&self, amount: &MonetaryAmount) -> Result<MonetaryAmount, MoneyError> {
        amount.multiply_by(self)
    }

    fn reduced(numerator: u128, denominator: u128) -> Result<Self, PercentageError> {
        if numerator > denominator {
            return Err(PercentageError::OutOfRange(format!("{}/{}", numerator, denominator)));
        }
        let divisor = gcd(numerator, denominator);
        let numerator = u64::try_from(numerator / divisor).map_err(|_| PercentageError::Overflow)?;
        let denominator = u64::try_from(denominator / divisor).map_err(|_| PercentageError::Overflow)?;
        Ok(Self { numerator, denominator })
    }

    /// Returns the value in percent as an exact decimal, if it has a finite expansion
    fn exact_percent(&self) -> Option<Decimal> {
        let scaled = u128::from(self.numerator) * 100;
        let denominator = u128::from(self.denominator);
        let mut factor: u128 = 1;
        for scale in 0..=20u32 {
            let candidate = scaled.checked_mul(factor)?;
            if candidate % denominator == 0 {
                let mantissa = i128::try_from(candidate / denominator).ok()?;
                return Decimal::try_from_i128_with_scale(mantissa, scale)
                    .ok()
                    .map(|d| d.normalize());
            }
            factor = factor.checked_mul(10)?;
        }
        None
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

impl Default for Percentage {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialOrd for Percentage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percentage {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.numerator) * u128::from(other.denominator);
        let rhs = u128::from(other.numerator) * u128::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl FromStr for Percentage {
    type Err = PercentageError;

    /// Literals outside [0%, 100%] are malformed, so they fail with `Parse`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s.trim()).map_err(|e| match e {
            PercentageError::OutOfRange(_) => PercentageError::Parse(s.to_string()),
            other => other,
        })
    }
}

fn parse_literal(trimmed: &str) -> Result<Percentage, PercentageError> {
    let parse_err = || PercentageError::Parse(trimmed.to_string());

    if let Some(percent) = trimmed.strip_suffix('%') {
        let value = Decimal::from_str(percent.trim()).map_err(|_| parse_err())?;
        return Percentage::from_percent(value);
    }

    if let Some((numerator, denominator)) = trimmed.split_once('/') {
        let numerator: u64 = numerator.trim().parse().map_err(|_| parse_err())?;
        let denominator: u64 = denominator.trim().parse().map_err(|_| parse_err())?;
        return Percentage::from_ratio(numerator, denominator);
    }

    let value = Decimal::from_str(trimmed).map_err(|_| parse_err())?;
    Percentage::from_decimal(value)
}

impl TryFrom<String> for Percentage {
    type Error = PercentageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for String {
    fn from(percentage: Percentage) -> String {
        percentage.to_string()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exact_percent() {
            Some(percent) => write!(f, "{}%", percent),
            None => write!(f, "{}/{}", self.numerator, self.denominator),
        }
    }
}

//! Beneficiaries of a member account

use serde::{Deserialize, Serialize};

use core_kernel::{MonetaryAmount, Percentage};
use crate::error::RewardsError;

/// A named recipient of a share of every contribution made to an account
///
/// The allocation percentage is fixed; savings accumulate as contributions
/// are distributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    name: String,
    allocation_percentage: Percentage,
    savings: MonetaryAmount,
}

impl Beneficiary {
    /// Creates a beneficiary with no savings
    pub fn new(name: impl Into<String>, allocation_percentage: Percentage) -> Self {
        Self {
            name: name.into(),
            allocation_percentage,
            savings: MonetaryAmount::zero(),
        }
    }

    /// Reconstitutes a stored beneficiary with its accumulated savings
    pub fn restore(
        name: impl Into<String>,
        allocation_percentage: Percentage,
        savings: MonetaryAmount,
    ) -> Self {
        Self {
            name: name.into(),
            allocation_percentage,
            savings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allocation_percentage(&self) -> Percentage {
        self.allocation_percentage
    }

    /// Replaces the allocation percentage when an account is rebalanced
    pub(crate) fn reallocate(&mut self, allocation_percentage: Percentage) {
        self.allocation_percentage = allocation_percentage;
    }

    /// Total savings accumulated so far
    pub fn savings(&self) -> MonetaryAmount {
        self.savings
    }

    /// Adds a distributed amount to this beneficiary's savings
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::NegativeAmount` for a negative amount; savings
    /// are left unchanged.
    pub fn credit(&mut self, amount: MonetaryAmount) -> Result<(), RewardsError> {
        if amount.is_negative() {
            return Err(RewardsError::NegativeAmount(amount));
        }
        self.savings = self.savings.checked_add(&amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> MonetaryAmount {
        MonetaryAmount::value_of(text).unwrap()
    }

    #[test]
    fn test_new_beneficiary_has_no_savings() {
        let b = Beneficiary::new("Annabelle", Percentage::value_of("50%").unwrap());
        assert_eq!(b.name(), "Annabelle");
        assert!(b.savings().is_zero());
    }

    #[test]
    fn test_credit_accumulates() {
        let mut b = Beneficiary::new("Corgan", Percentage::one_hundred());
        b.credit(amount("4.00")).unwrap();
        b.credit(amount("4.00")).unwrap();
        assert_eq!(b.savings(), amount("8.00"));
    }

    #[test]
    fn test_credit_zero_is_allowed() {
        let mut b = Beneficiary::restore("Corgan", Percentage::one_hundred(), amount("1.00"));
        b.credit(MonetaryAmount::zero()).unwrap();
        assert_eq!(b.savings(), amount("1.00"));
    }

    #[test]
    fn test_credit_negative_is_rejected() {
        let mut b = Beneficiary::restore("Corgan", Percentage::one_hundred(), amount("1.00"));
        let result = b.credit(amount("-0.01"));
        assert!(matches!(result, Err(RewardsError::NegativeAmount(_))));
        assert_eq!(b.savings(), amount("1.00"));
    }
}

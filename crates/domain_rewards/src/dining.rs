//! Dining events reported by restaurants

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::MonetaryAmount;
use crate::error::RewardsError;

/// A meal paid for with a member's credit card at a participating restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dining {
    /// Amount of the dining bill
    pub amount: MonetaryAmount,
    /// Credit card the bill was paid with
    pub credit_card_number: String,
    /// Merchant number of the restaurant
    pub merchant_number: String,
    /// Date the dining took place
    pub date: NaiveDate,
}

impl Dining {
    pub fn new(
        amount: MonetaryAmount,
        credit_card_number: impl Into<String>,
        merchant_number: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            credit_card_number: credit_card_number.into(),
            merchant_number: merchant_number.into(),
            date,
        }
    }

    /// Creates a dining that took place today from an amount literal such as `"100.00"`
    pub fn create(
        amount: &str,
        credit_card_number: impl Into<String>,
        merchant_number: impl Into<String>,
    ) -> Result<Self, RewardsError> {
        Ok(Self::new(
            MonetaryAmount::value_of(amount)?,
            credit_card_number,
            merchant_number,
            Utc::now().date_naive(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parses_amount() {
        let dining = Dining::create("100.00", "1234123412341234", "1234567890").unwrap();
        assert_eq!(dining.amount, MonetaryAmount::from_minor(10_000));
        assert_eq!(dining.merchant_number, "1234567890");
    }

    #[test]
    fn test_create_rejects_bad_amount() {
        let result = Dining::create("lots", "1234123412341234", "1234567890");
        assert!(matches!(result, Err(RewardsError::Money(_))));
    }
}

//! Reward confirmations and the records kept of them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{MonetaryAmount, RewardId};
use crate::contribution::AccountContribution;
use crate::dining::Dining;

/// Returned to the caller once a reward has been recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfirmation {
    pub confirmation_number: String,
    pub account_contribution: AccountContribution,
}

/// Stored record of a confirmed reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub id: RewardId,
    pub confirmation_number: String,
    pub reward_amount: MonetaryAmount,
    pub reward_date: NaiveDate,
    pub account_number: String,
    pub dining_merchant_number: String,
    pub dining_date: NaiveDate,
    pub dining_amount: MonetaryAmount,
}

impl RewardRecord {
    pub fn new(
        confirmation_number: impl Into<String>,
        contribution: &AccountContribution,
        dining: &Dining,
        reward_date: NaiveDate,
    ) -> Self {
        Self {
            id: RewardId::assign(),
            confirmation_number: confirmation_number.into(),
            reward_amount: contribution.amount(),
            reward_date,
            account_number: contribution.account_number().to_string(),
            dining_merchant_number: dining.merchant_number.clone(),
            dining_date: dining.date,
            dining_amount: dining.amount,
        }
    }
}

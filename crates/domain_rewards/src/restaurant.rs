//! Participating restaurants and the benefit they pay

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{MonetaryAmount, Percentage, RestaurantId};
use crate::account::Account;
use crate::dining::Dining;
use crate::error::RewardsError;

/// Decides whether a restaurant pays a benefit for a given dining
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitAvailabilityPolicy {
    #[default]
    AlwaysAvailable,
    NeverAvailable,
}

impl BenefitAvailabilityPolicy {
    pub fn is_benefit_available_for(&self, _account: &Account, _dining: &Dining) -> bool {
        matches!(self, BenefitAvailabilityPolicy::AlwaysAvailable)
    }
}

/// A restaurant in the reward network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Internal identity, assigned when stored
    pub id: Option<RestaurantId>,
    /// Merchant number dinings are reported under
    pub number: String,
    pub name: String,
    /// Share of the dining amount paid back as a benefit
    pub benefit_percentage: Percentage,
    #[serde(default)]
    pub benefit_availability_policy: BenefitAvailabilityPolicy,
}

impl Restaurant {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        benefit_percentage: Percentage,
    ) -> Self {
        Self {
            id: None,
            number: number.into(),
            name: name.into(),
            benefit_percentage,
            benefit_availability_policy: BenefitAvailabilityPolicy::default(),
        }
    }

    pub fn with_availability_policy(mut self, policy: BenefitAvailabilityPolicy) -> Self {
        self.benefit_availability_policy = policy;
        self
    }

    /// Benefit owed to an account for a dining at this restaurant
    ///
    /// Zero when the availability policy denies the benefit.
    pub fn calculate_benefit_for(
        &self,
        account: &Account,
        dining: &Dining,
    ) -> Result<MonetaryAmount, RewardsError> {
        if !self
            .benefit_availability_policy
            .is_benefit_available_for(account, dining)
        {
            debug!(restaurant = %self.number, account = account.number(), "Benefit not available");
            return Ok(MonetaryAmount::zero());
        }
        Ok(dining.amount.multiply_by(&self.benefit_percentage)?)
    }
}

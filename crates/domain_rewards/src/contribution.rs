//! The result of one contribution to an account

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{MonetaryAmount, Percentage};
use crate::error::RewardsError;

/// The share of a contribution that went to one beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Distribution {
    /// Beneficiary name
    pub beneficiary: String,
    /// Amount distributed to the beneficiary
    pub amount: MonetaryAmount,
    /// Allocation percentage used to compute the amount
    pub percentage: Percentage,
    /// Beneficiary savings after this distribution was credited
    pub total_savings: MonetaryAmount,
}

/// An immutable record of a contribution made to an account
///
/// Holds one [`Distribution`] per beneficiary, keyed by beneficiary name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContribution {
    account_number: String,
    amount: MonetaryAmount,
    distributions: BTreeMap<String, Distribution>,
}

impl AccountContribution {
    /// Creates a contribution record
    pub fn new(
        account_number: impl Into<String>,
        amount: MonetaryAmount,
        distributions: impl IntoIterator<Item = Distribution>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            amount,
            distributions: distributions
                .into_iter()
                .map(|d| (d.beneficiary.clone(), d))
                .collect(),
        }
    }

    /// Number of the account the contribution was made to
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Total amount contributed
    pub fn amount(&self) -> MonetaryAmount {
        self.amount
    }

    /// All distributions, ordered by beneficiary name
    pub fn distributions(&self) -> impl Iterator<Item = &Distribution> {
        self.distributions.values()
    }

    pub fn distribution_count(&self) -> usize {
        self.distributions.len()
    }

    /// Looks up the distribution made to a beneficiary
    pub fn get_distribution(&self, beneficiary: &str) -> Result<&Distribution, RewardsError> {
        self.distributions
            .get(beneficiary)
            .ok_or_else(|| RewardsError::DistributionNotFound(beneficiary.to_string()))
    }

    /// Sum of all distributed amounts
    pub fn distributed_total(&self) -> MonetaryAmount {
        self.distributions.values().map(|d| d.amount).sum()
    }

    /// Contribution minus distributed total; non-zero only when per-share rounding drifted
    pub fn rounding_difference(&self) -> MonetaryAmount {
        self.amount - self.distributed_total()
    }
}

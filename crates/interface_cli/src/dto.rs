//! Batch file and report DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{MonetaryAmount, Percentage};
use domain_rewards::{
    Account, Beneficiary, BenefitAvailabilityPolicy, Dining, Distribution, Restaurant,
    RewardConfirmation, RewardsError,
};

/// Input of one batch run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
    #[serde(default)]
    pub restaurants: Vec<RestaurantSeed>,
    #[serde(default)]
    pub dinings: Vec<DiningSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountSeed {
    pub number: String,
    pub name: String,
    pub credit_card_number: Option<String>,
    #[serde(default)]
    pub beneficiaries: Vec<BeneficiarySeed>,
}

impl AccountSeed {
    pub fn into_account(self) -> Result<Account, RewardsError> {
        let mut account = Account::new(self.number, self.name);
        if let Some(card) = self.credit_card_number {
            account.set_credit_card_number(card);
        }
        for seed in self.beneficiaries {
            account.restore_beneficiary(Beneficiary::restore(
                seed.name,
                seed.allocation_percentage,
                seed.savings,
            ))?;
        }
        Ok(account)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeneficiarySeed {
    pub name: String,
    pub allocation_percentage: Percentage,
    #[serde(default)]
    pub savings: MonetaryAmount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantSeed {
    pub number: String,
    pub name: String,
    pub benefit_percentage: Percentage,
    #[serde(default)]
    pub benefit_availability_policy: BenefitAvailabilityPolicy,
}

impl From<RestaurantSeed> for Restaurant {
    fn from(seed: RestaurantSeed) -> Self {
        Restaurant::new(seed.number, seed.name, seed.benefit_percentage)
            .with_availability_policy(seed.benefit_availability_policy)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiningSeed {
    pub amount: MonetaryAmount,
    pub credit_card_number: String,
    pub merchant_number: String,
    /// Defaults to the run date
    pub date: Option<NaiveDate>,
}

impl DiningSeed {
    pub fn into_dining(self, run_date: NaiveDate) -> Dining {
        Dining::new(
            self.amount,
            self.credit_card_number,
            self.merchant_number,
            self.date.unwrap_or(run_date),
        )
    }
}

/// Output of one batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub confirmations: Vec<ConfirmationView>,
    pub failures: Vec<FailureView>,
    pub accounts: Vec<AccountSavingsView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub confirmation_number: String,
    pub account_number: String,
    pub amount: MonetaryAmount,
    pub distributions: Vec<Distribution>,
}

impl From<RewardConfirmation> for ConfirmationView {
    fn from(confirmation: RewardConfirmation) -> Self {
        let contribution = confirmation.account_contribution;
        Self {
            confirmation_number: confirmation.confirmation_number,
            account_number: contribution.account_number().to_string(),
            amount: contribution.amount(),
            distributions: contribution.distributions().cloned().collect(),
        }
    }
}

/// A dining that could not be rewarded
#[derive(Debug, Clone, Serialize)]
pub struct FailureView {
    /// Position of the dining in the batch
    pub index: usize,
    pub merchant_number: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountSavingsView {
    pub number: String,
    pub name: String,
    pub valid: bool,
    pub beneficiaries: Vec<Beneficiary>,
}

impl From<&Account> for AccountSavingsView {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number().to_string(),
            name: account.name().to_string(),
            valid: account.is_valid(),
            beneficiaries: account.beneficiaries().cloned().collect(),
        }
    }
}

//! Test Data Builders
//!
//! Builders for accounts, so tests only spell out the beneficiaries they
//! care about.

use core_kernel::{MonetaryAmount, Percentage};
use domain_rewards::{Account, Beneficiary};

use crate::fixtures::KeyFixtures;

/// Builder for constructing test accounts
pub struct TestAccountBuilder {
    number: String,
    name: String,
    credit_card_number: Option<String>,
    beneficiaries: Vec<Beneficiary>,
}

impl Default for TestAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAccountBuilder {
    /// Creates a builder for the reference account with no beneficiaries
    pub fn new() -> Self {
        Self {
            number: KeyFixtures::account_number().to_string(),
            name: "Keith and Keri Donald".to_string(),
            credit_card_number: Some(KeyFixtures::credit_card_number().to_string()),
            beneficiaries: Vec::new(),
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_credit_card(mut self, credit_card_number: impl Into<String>) -> Self {
        self.credit_card_number = Some(credit_card_number.into());
        self
    }

    pub fn without_credit_card(mut self) -> Self {
        self.credit_card_number = None;
        self
    }

    /// Adds a beneficiary; `percentage` is parsed with `Percentage::value_of`
    ///
    /// # Panics
    ///
    /// Panics if `percentage` does not parse
    pub fn with_beneficiary(mut self, name: &str, percentage: &str) -> Self {
        let percentage = Percentage::value_of(percentage)
            .unwrap_or_else(|e| panic!("bad test percentage {percentage:?}: {e}"));
        self.beneficiaries.push(Beneficiary::new(name, percentage));
        self
    }

    /// Adds a beneficiary with existing savings
    pub fn with_saved_beneficiary(
        mut self,
        name: &str,
        percentage: Percentage,
        savings: MonetaryAmount,
    ) -> Self {
        self.beneficiaries
            .push(Beneficiary::restore(name, percentage, savings));
        self
    }

    /// Adds one beneficiary per percentage, named `B0`, `B1`, ...
    pub fn with_allocations(mut self, percentages: &[Percentage]) -> Self {
        let start = self.beneficiaries.len();
        for (offset, percentage) in percentages.iter().enumerate() {
            self.beneficiaries
                .push(Beneficiary::new(format!("B{}", start + offset), *percentage));
        }
        self
    }

    /// # Panics
    ///
    /// Panics on duplicate beneficiary names
    pub fn build(self) -> Account {
        let mut account = Account::new(self.number, self.name);
        if let Some(card) = self.credit_card_number {
            account.set_credit_card_number(card);
        }
        for beneficiary in self.beneficiaries {
            account
                .restore_beneficiary(beneficiary)
                .unwrap_or_else(|e| panic!("bad test account: {e}"));
        }
        account
    }
}

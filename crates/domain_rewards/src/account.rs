//! Member accounts and the distribution of contributions
//!
//! An account owns its beneficiaries. Their allocation percentages must
//! total exactly 100% before a contribution can be made; the check runs at
//! contribution time, not when beneficiaries are added, so a partially
//! configured account can still be stored.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use core_kernel::{AccountId, MonetaryAmount, Percentage, PercentageError};
use crate::allocation::{self, RoundingPolicy};
use crate::beneficiary::Beneficiary;
use crate::contribution::{AccountContribution, Distribution};
use crate::error::RewardsError;

/// A member account of the reward network
///
/// An aggregate: beneficiaries are only reachable through their account,
/// and their savings only change through [`Account::make_contribution`].
///
/// # Invariants
///
/// - Beneficiary names are unique within the account
/// - Contributions require allocations totalling exactly 100%
/// - A failed contribution leaves every beneficiary unchanged
///
/// Contributions mutate beneficiary savings in place; concurrent
/// contributions to the same account must be serialized by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: Option<AccountId>,
    number: String,
    name: String,
    credit_card_number: Option<String>,
    beneficiaries: BTreeMap<String, Beneficiary>,
}

impl Account {
    /// Creates an account with no beneficiaries
    ///
    /// # Arguments
    ///
    /// * `number` - Unique account number
    /// * `name` - Name on the account
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            number: number.into(),
            name: name.into(),
            credit_card_number: None,
            beneficiaries: BTreeMap::new(),
        }
    }

    /// Sets the credit card used to find this account
    pub fn with_credit_card(mut self, credit_card_number: impl Into<String>) -> Self {
        self.credit_card_number = Some(credit_card_number.into());
        self
    }

    /// Internal identity, present once a repository has stored the account
    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    /// Records the identity assigned by the repository storing this account
    pub fn assign_id(&mut self, id: AccountId) {
        self.id = Some(id);
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credit_card_number(&self) -> Option<&str> {
        self.credit_card_number.as_deref()
    }

    pub fn set_credit_card_number(&mut self, credit_card_number: impl Into<String>) {
        self.credit_card_number = Some(credit_card_number.into());
    }

    /// Adds a beneficiary with the given allocation percentage
    ///
    /// The allocation total is not checked here; see [`Account::is_valid`].
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::DuplicateBeneficiary` if the name is taken
    pub fn add_beneficiary(
        &mut self,
        name: impl Into<String>,
        allocation_percentage: Percentage,
    ) -> Result<(), RewardsError> {
        self.insert_beneficiary(Beneficiary::new(name, allocation_percentage))
    }

    /// Adds a beneficiary entitled to 100% of every contribution
    pub fn add_sole_beneficiary(&mut self, name: impl Into<String>) -> Result<(), RewardsError> {
        self.add_beneficiary(name, Percentage::one_hundred())
    }

    /// Restores a stored beneficiary, savings included
    ///
    /// Intended for repositories reconstituting an account.
    pub fn restore_beneficiary(&mut self, beneficiary: Beneficiary) -> Result<(), RewardsError> {
        self.insert_beneficiary(beneficiary)
    }

    fn insert_beneficiary(&mut self, beneficiary: Beneficiary) -> Result<(), RewardsError> {
        if self.beneficiaries.contains_key(beneficiary.name()) {
            return Err(RewardsError::DuplicateBeneficiary(beneficiary.name().to_string()));
        }
        self.beneficiaries
            .insert(beneficiary.name().to_string(), beneficiary);
        Ok(())
    }

    /// Removes a beneficiary and rebalances the ones that remain
    ///
    /// Each entry of `new_allocations` sets the allocation percentage of a
    /// remaining beneficiary; beneficiaries not named keep theirs. The result
    /// is not required to total 100%, see [`Account::is_valid`]. Removing the
    /// sole beneficiary, or one allocated 0%, needs no rebalancing.
    ///
    /// # Returns
    ///
    /// The removed beneficiary, with the savings it had accumulated
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::BeneficiaryNotFound` if `name`, or any name in
    /// `new_allocations`, is not a remaining beneficiary. The account is left
    /// unchanged.
    pub fn remove_beneficiary(
        &mut self,
        name: &str,
        new_allocations: &BTreeMap<String, Percentage>,
    ) -> Result<Beneficiary, RewardsError> {
        if !self.beneficiaries.contains_key(name) {
            return Err(RewardsError::BeneficiaryNotFound(name.to_string()));
        }
        if let Some(unknown) = new_allocations
            .keys()
            .find(|other| other.as_str() == name || !self.beneficiaries.contains_key(other.as_str()))
        {
            return Err(RewardsError::BeneficiaryNotFound(unknown.clone()));
        }

        let removed = self
            .beneficiaries
            .remove(name)
            .ok_or_else(|| RewardsError::BeneficiaryNotFound(name.to_string()))?;
        for (other, percentage) in new_allocations {
            if let Some(beneficiary) = self.beneficiaries.get_mut(other) {
                beneficiary.reallocate(*percentage);
            }
        }

        debug!(
            account = %self.number,
            beneficiary = name,
            remaining = self.beneficiaries.len(),
            valid = self.is_valid(),
            "Removed beneficiary"
        );
        Ok(removed)
    }

    /// Beneficiaries, ordered by name
    pub fn beneficiaries(&self) -> impl Iterator<Item = &Beneficiary> {
        self.beneficiaries.values()
    }

    pub fn beneficiary_count(&self) -> usize {
        self.beneficiaries.len()
    }

    /// Looks up a beneficiary by exact name
    pub fn get_beneficiary(&self, name: &str) -> Result<&Beneficiary, RewardsError> {
        self.beneficiaries
            .get(name)
            .ok_or_else(|| RewardsError::BeneficiaryNotFound(name.to_string()))
    }

    /// Sums the allocation percentages of all beneficiaries
    ///
    /// # Errors
    ///
    /// Returns `PercentageError::OutOfRange` once the running total passes 100%
    pub fn total_allocation(&self) -> Result<Percentage, PercentageError> {
        self.beneficiaries
            .values()
            .try_fold(Percentage::zero(), |total, b| {
                total.checked_add(&b.allocation_percentage())
            })
    }

    /// Returns true only if the allocations total exactly 100%
    ///
    /// An over-allocated account is reported as invalid, never as an error.
    pub fn is_valid(&self) -> bool {
        matches!(self.total_allocation(), Ok(total) if total.is_one_hundred())
    }

    /// Contributes an amount, rounding each share half-up
    ///
    /// See [`Account::make_contribution_with`].
    pub fn make_contribution(
        &mut self,
        amount: MonetaryAmount,
    ) -> Result<AccountContribution, RewardsError> {
        self.make_contribution_with(amount, RoundingPolicy::default())
    }

    /// Distributes an amount among the beneficiaries by allocation percentage
    ///
    /// Every share is computed and credited to a staged copy of its
    /// beneficiary first; the account is only updated once all of them
    /// succeed.
    ///
    /// # Errors
    ///
    /// - `RewardsError::InvalidAccountState` if allocations do not total 100%
    /// - `RewardsError::NegativeAmount` if `amount` is negative
    /// - `RewardsError::Money` if a share or a savings balance overflows
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::{MonetaryAmount, Percentage};
    /// use domain_rewards::Account;
    ///
    /// let mut account = Account::new("123456789", "Keith and Keri Donald");
    /// account.add_beneficiary("Annabelle", Percentage::value_of("50%").unwrap()).unwrap();
    /// account.add_beneficiary("Corgan", Percentage::value_of("50%").unwrap()).unwrap();
    ///
    /// let contribution = account.make_contribution(MonetaryAmount::value_of("8.00").unwrap()).unwrap();
    /// assert_eq!(contribution.get_distribution("Annabelle").unwrap().amount, MonetaryAmount::value_of("4.00").unwrap());
    /// ```
    pub fn make_contribution_with(
        &mut self,
        amount: MonetaryAmount,
        policy: RoundingPolicy,
    ) -> Result<AccountContribution, RewardsError> {
        if !self.is_valid() {
            warn!(account = %self.number, beneficiaries = self.beneficiaries.len(), "Contribution refused: allocations do not total 100%");
            return Err(RewardsError::InvalidAccountState(format!(
                "cannot make contributions to account {}: beneficiary allocations do not total 100%",
                self.number
            )));
        }
        if amount.is_negative() {
            return Err(RewardsError::NegativeAmount(amount));
        }

        let weights: Vec<Percentage> = self
            .beneficiaries
            .values()
            .map(Beneficiary::allocation_percentage)
            .collect();
        let shares = allocation::split(amount, &weights, policy)?;

        let mut staged = Vec::with_capacity(shares.len());
        let mut distributions = Vec::with_capacity(shares.len());
        for (beneficiary, share) in self.beneficiaries.values().zip(shares) {
            let mut credited = beneficiary.clone();
            credited.credit(share)?;
            debug!(
                account = %self.number,
                beneficiary = credited.name(),
                share = %share,
                savings = %credited.savings(),
                "Distributed share"
            );
            distributions.push(Distribution {
                beneficiary: credited.name().to_string(),
                amount: share,
                percentage: credited.allocation_percentage(),
                total_savings: credited.savings(),
            });
            staged.push(credited);
        }

        for credited in staged {
            self.beneficiaries.insert(credited.name().to_string(), credited);
        }

        Ok(AccountContribution::new(self.number.clone(), amount, distributions))
    }
}

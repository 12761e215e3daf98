//! Reward domain errors

use thiserror::Error;

use core_kernel::{MonetaryAmount, MoneyError, PercentageError, PortError};

/// Errors that can occur in the reward domain
#[derive(Debug, Error)]
pub enum RewardsError {
    /// Beneficiary allocations do not total exactly 100%
    #[error("Invalid account state: {0}")]
    InvalidAccountState(String),

    /// No beneficiary with the given name on the account
    #[error("Beneficiary not found: {0}")]
    BeneficiaryNotFound(String),

    /// No distribution for the given beneficiary in the contribution
    #[error("Distribution not found: {0}")]
    DistributionNotFound(String),

    /// A beneficiary with the same name is already on the account
    #[error("Beneficiary already exists: {0}")]
    DuplicateBeneficiary(String),

    /// A negative amount was contributed or credited
    #[error("Negative amount not allowed: {0}")]
    NegativeAmount(MonetaryAmount),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Percentage(#[from] PercentageError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl RewardsError {
    /// Returns true for lookups that matched nothing, including collaborator lookups
    pub fn is_not_found(&self) -> bool {
        match self {
            RewardsError::BeneficiaryNotFound(_) | RewardsError::DistributionNotFound(_) => true,
            RewardsError::Port(port) => port.is_not_found(),
            _ => false,
        }
    }
}

//! Reward Domain Ports
//!
//! The collaborators [`RewardNetwork`](crate::network::RewardNetwork) needs
//! from the system of record. Each trait is object safe so the use case can
//! hold `Arc<dyn ...>` handles and adapters can be swapped at startup.
//!
//! # Usage
//!
//! ```rust,ignore
//! let accounts: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
//! let restaurants: Arc<dyn RestaurantRepository> = Arc::new(InMemoryRestaurantRepository::new());
//! let rewards: Arc<dyn RewardRepository> = Arc::new(InMemoryRewardRepository::new("RN"));
//!
//! let network = RewardNetwork::new(accounts, restaurants, rewards);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::account::Account;
use crate::contribution::AccountContribution;
use crate::dining::Dining;
use crate::restaurant::Restaurant;

/// Loads accounts and persists beneficiary savings
#[async_trait]
pub trait AccountRepository: DomainPort {
    /// Finds the account a credit card is registered to
    ///
    /// # Returns
    ///
    /// The account, or `PortError::NotFound`
    async fn find_by_credit_card(&self, credit_card_number: &str) -> Result<Account, PortError>;

    /// Persists the current savings of every beneficiary on the account
    async fn update_beneficiaries(&self, account: &Account) -> Result<(), PortError>;
}

/// Loads restaurants by merchant number
#[async_trait]
pub trait RestaurantRepository: DomainPort {
    /// # Returns
    ///
    /// The restaurant, or `PortError::NotFound`
    async fn find_by_merchant_number(&self, merchant_number: &str) -> Result<Restaurant, PortError>;
}

/// Records confirmed rewards
#[async_trait]
pub trait RewardRepository: DomainPort {
    /// Records a reward and returns its confirmation number
    async fn confirm_reward(
        &self,
        contribution: &AccountContribution,
        dining: &Dining,
    ) -> Result<String, PortError>;
}

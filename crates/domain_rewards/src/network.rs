//! The dining reward use case
//!
//! Turns a reported dining into a contribution to the diner's account and
//! records the reward.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::allocation::RoundingPolicy;
use crate::confirmation::RewardConfirmation;
use crate::dining::Dining;
use crate::error::RewardsError;
use crate::ports::{AccountRepository, RestaurantRepository, RewardRepository};

/// Rewards members for dining at participating restaurants
///
/// Rewards for the same credit card are processed one at a time, so two
/// rewards for one account never interleave.
pub struct RewardNetwork {
    accounts: Arc<dyn AccountRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    rewards: Arc<dyn RewardRepository>,
    rounding_policy: RoundingPolicy,
    card_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RewardNetwork {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        rewards: Arc<dyn RewardRepository>,
    ) -> Self {
        Self {
            accounts,
            restaurants,
            rewards,
            rounding_policy: RoundingPolicy::default(),
            card_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_rounding_policy(mut self, policy: RoundingPolicy) -> Self {
        self.rounding_policy = policy;
        self
    }

    pub fn rounding_policy(&self) -> RoundingPolicy {
        self.rounding_policy
    }

    /// Rewards an account for dining at a restaurant
    ///
    /// # Errors
    ///
    /// - `RewardsError::Port` with `PortError::NotFound` when the card or
    ///   merchant is unknown
    /// - `RewardsError::InvalidAccountState` when the account's beneficiary
    ///   allocations do not total 100%
    /// - `RewardsError::Port` when a repository fails
    ///
    /// Nothing is persisted when an error is returned before the beneficiary
    /// update. Savings are persisted before the reward is recorded: if the
    /// reward repository then fails, the credited savings stay persisted and
    /// no reward record exists.
    #[instrument(skip(self, dining), fields(merchant = %dining.merchant_number, amount = %dining.amount))]
    pub async fn reward_account_for(
        &self,
        dining: &Dining,
    ) -> Result<RewardConfirmation, RewardsError> {
        let card_lock = self.card_lock(&dining.credit_card_number).await;
        let result = {
            let _guard = card_lock.lock().await;
            self.reward_locked(dining).await
        };
        self.release_card_lock(&dining.credit_card_number, card_lock).await;
        result
    }

    /// Number of credit cards with a reward in progress or waiting
    pub async fn tracked_card_count(&self) -> usize {
        self.card_locks.lock().await.len()
    }

    async fn reward_locked(&self, dining: &Dining) -> Result<RewardConfirmation, RewardsError> {
        let mut account = self
            .accounts
            .find_by_credit_card(&dining.credit_card_number)
            .await?;
        let restaurant = self
            .restaurants
            .find_by_merchant_number(&dining.merchant_number)
            .await?;

        let benefit = restaurant.calculate_benefit_for(&account, dining)?;
        debug!(account = account.number(), benefit = %benefit, "Calculated benefit");

        let contribution = account.make_contribution_with(benefit, self.rounding_policy)?;
        self.accounts.update_beneficiaries(&account).await?;
        let confirmation_number = self.rewards.confirm_reward(&contribution, dining).await?;

        info!(
            account = account.number(),
            confirmation = %confirmation_number,
            reward = %contribution.amount(),
            "Reward confirmed"
        );

        Ok(RewardConfirmation {
            confirmation_number,
            account_contribution: contribution,
        })
    }

    async fn card_lock(&self, credit_card_number: &str) -> Arc<Mutex<()>> {
        let mut locks = self.card_locks.lock().await;
        locks
            .entry(credit_card_number.to_string())
            .or_default()
            .clone()
    }

    /// Drops the card's lock once no other reward holds or awaits it
    async fn release_card_lock(&self, credit_card_number: &str, card_lock: Arc<Mutex<()>>) {
        let mut locks = self.card_locks.lock().await;
        // One reference in the map and ours; clones are only taken under this map lock
        let idle = locks
            .get(credit_card_number)
            .is_some_and(|held| Arc::ptr_eq(held, &card_lock) && Arc::strong_count(&card_lock) == 2);
        if idle {
            locks.remove(credit_card_number);
        }
    }
}

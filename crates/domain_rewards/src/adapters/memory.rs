//! In-memory repositories

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{AccountId, DomainPort, PortError, RestaurantId};

use crate::account::Account;
use crate::confirmation::RewardRecord;
use crate::contribution::AccountContribution;
use crate::dining::Dining;
use crate::ports::{AccountRepository, RestaurantRepository, RewardRepository};
use crate::restaurant::Restaurant;

/// Keeps only the last four digits of a card number for logs and errors
fn mask_card(credit_card_number: &str) -> String {
    let digits = credit_card_number.chars().count();
    let visible: String = credit_card_number.chars().skip(digits.saturating_sub(4)).collect();
    format!("****{visible}")
}

/// Accounts keyed by account number
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new account, assigning its identity
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if the account number or credit card is already registered
    pub async fn insert(&self, mut account: Account) -> Result<AccountId, PortError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.number()) {
            return Err(PortError::conflict(format!(
                "account {} already exists",
                account.number()
            )));
        }
        if let Some(card) = account.credit_card_number() {
            if accounts.values().any(|a| a.credit_card_number() == Some(card)) {
                return Err(PortError::conflict(format!(
                    "credit card {} is already registered",
                    mask_card(card)
                )));
            }
        }
        let id = AccountId::assign();
        account.assign_id(id);
        accounts.insert(account.number().to_string(), account);
        Ok(id)
    }

    /// Returns a copy of the stored account
    pub async fn find_by_number(&self, number: &str) -> Result<Account, PortError> {
        self.accounts
            .read()
            .await
            .get(number)
            .cloned()
            .ok_or_else(|| PortError::not_found("Account", number))
    }
}

impl DomainPort for InMemoryAccountRepository {}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_credit_card(&self, credit_card_number: &str) -> Result<Account, PortError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.credit_card_number() == Some(credit_card_number))
            .cloned()
            .ok_or_else(|| PortError::not_found("Account", mask_card(credit_card_number)))
    }

    #[instrument(skip(self, account), fields(account = account.number()))]
    async fn update_beneficiaries(&self, account: &Account) -> Result<(), PortError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(account.number())
            .ok_or_else(|| PortError::not_found("Account", account.number()))?;

        let id = stored.id();
        *stored = account.clone();
        if let Some(id) = id {
            stored.assign_id(id);
        }
        debug!(beneficiaries = account.beneficiary_count(), "Updated beneficiary savings");
        Ok(())
    }
}

/// Restaurants keyed by merchant number
#[derive(Debug, Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: RwLock<HashMap<String, Restaurant>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new restaurant, assigning its identity
    pub async fn insert(&self, mut restaurant: Restaurant) -> Result<RestaurantId, PortError> {
        let mut restaurants = self.restaurants.write().await;
        if restaurants.contains_key(&restaurant.number) {
            return Err(PortError::conflict(format!(
                "restaurant {} already exists",
                restaurant.number
            )));
        }
        let id = RestaurantId::assign();
        restaurant.id = Some(id);
        restaurants.insert(restaurant.number.clone(), restaurant);
        Ok(id)
    }
}

impl DomainPort for InMemoryRestaurantRepository {}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn find_by_merchant_number(&self, merchant_number: &str) -> Result<Restaurant, PortError> {
        self.restaurants
            .read()
            .await
            .get(merchant_number)
            .cloned()
            .ok_or_else(|| PortError::not_found("Restaurant", merchant_number))
    }
}

/// Reward records with confirmation numbers of the form `<prefix>-<sequence>`
#[derive(Debug)]
pub struct InMemoryRewardRepository {
    prefix: String,
    sequence: AtomicU64,
    records: RwLock<Vec<RewardRecord>>,
}

impl InMemoryRewardRepository {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sequence: AtomicU64::new(0),
            records: RwLock::new(Vec::new()),
        }
    }

    /// All recorded rewards, in confirmation order
    pub async fn records(&self) -> Vec<RewardRecord> {
        self.records.read().await.clone()
    }
}

impl DomainPort for InMemoryRewardRepository {}

#[async_trait]
impl RewardRepository for InMemoryRewardRepository {
    async fn confirm_reward(
        &self,
        contribution: &AccountContribution,
        dining: &Dining,
    ) -> Result<String, PortError> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let confirmation_number = format!("{}-{:08}", self.prefix, sequence);
        let record = RewardRecord::new(
            confirmation_number.clone(),
            contribution,
            dining,
            Utc::now().date_naive(),
        );
        self.records.write().await.push(record);
        Ok(confirmation_number)
    }
}

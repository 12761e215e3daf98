//! Batch processing of dinings
//!
//! Seeds the in-memory repositories from a [`BatchFile`], rewards every
//! dining in order and reports the confirmations, the failures and the
//! resulting beneficiary savings.

use chrono::{NaiveDate, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use domain_rewards::adapters::{
    InMemoryAccountRepository, InMemoryRestaurantRepository, InMemoryRewardRepository,
};
use domain_rewards::{Restaurant, RewardNetwork};

use crate::config::RewardsConfig;
use crate::dto::{AccountSavingsView, BatchFile, BatchReport, ConfirmationView, FailureView};
use crate::error::CliError;

/// Parses a batch from JSON text
pub fn parse_batch(json: &str) -> Result<BatchFile, CliError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a batch file
pub fn load_batch(path: impl AsRef<Path>) -> Result<BatchFile, CliError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_batch(&json)
}

/// Rewards every dining in the batch, dating undated dinings today
pub async fn run_batch(batch: BatchFile, config: &RewardsConfig) -> Result<BatchReport, CliError> {
    run_batch_on(batch, config, Utc::now().date_naive()).await
}

/// Rewards every dining in the batch
///
/// # Errors
///
/// Fails only if the seed data is unusable: duplicate account numbers,
/// cards, merchant numbers or beneficiary names. Dinings that cannot be
/// rewarded are listed in `BatchReport::failures`.
#[instrument(skip(batch, config), fields(dinings = batch.dinings.len(), rounding = ?config.rounding))]
pub async fn run_batch_on(
    batch: BatchFile,
    config: &RewardsConfig,
    run_date: NaiveDate,
) -> Result<BatchReport, CliError> {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let restaurants = Arc::new(InMemoryRestaurantRepository::new());
    let rewards = Arc::new(InMemoryRewardRepository::new(config.confirmation_prefix.clone()));

    let mut account_numbers = Vec::with_capacity(batch.accounts.len());
    for seed in batch.accounts {
        let account = seed.into_account()?;
        account_numbers.push(account.number().to_string());
        accounts.insert(account).await?;
    }
    for seed in batch.restaurants {
        restaurants.insert(Restaurant::from(seed)).await?;
    }

    let network = RewardNetwork::new(accounts.clone(), restaurants, rewards)
        .with_rounding_policy(config.rounding);

    let mut report = BatchReport::default();
    for (index, seed) in batch.dinings.into_iter().enumerate() {
        let dining = seed.into_dining(run_date);
        match network.reward_account_for(&dining).await {
            Ok(confirmation) => report.confirmations.push(ConfirmationView::from(confirmation)),
            Err(e) => {
                warn!(index, merchant = %dining.merchant_number, error = %e, "Dining not rewarded");
                report.failures.push(FailureView {
                    index,
                    merchant_number: dining.merchant_number,
                    error: e.to_string(),
                });
            }
        }
    }

    for number in account_numbers {
        let account = accounts.find_by_number(&number).await?;
        report.accounts.push(AccountSavingsView::from(&account));
    }

    info!(
        confirmed = report.confirmations.len(),
        failed = report.failures.len(),
        "Batch complete"
    );
    Ok(report)
}

//! Reward Network Domain
//!
//! This crate implements the contribution allocation engine of a dining
//! reward network: members dine at participating restaurants, the restaurant
//! pays back a share of the bill, and that benefit is distributed among the
//! beneficiaries of the member's account.
//!
//! # Key Concepts
//!
//! - **Account**: A member account owning one or more beneficiaries
//! - **Beneficiary**: A named recipient with a fixed allocation percentage
//!   and accumulated savings
//! - **Contribution**: An amount distributed across all beneficiaries of an
//!   account, recorded as an [`AccountContribution`]
//! - **Reward**: The benefit a restaurant pays for a [`Dining`], confirmed
//!   by [`RewardNetwork::reward_account_for`]
//!
//! # Allocation Rules
//!
//! Allocation percentages must total exactly 100% before any contribution
//! is accepted. Each share is rounded to the cent; see [`RoundingPolicy`]
//! for how rounding drift is handled.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{MonetaryAmount, Percentage};
//! use domain_rewards::Account;
//!
//! let mut account = Account::new("123456789", "Keith and Keri Donald");
//! account.add_beneficiary("Annabelle", Percentage::value_of("50%").unwrap()).unwrap();
//! account.add_beneficiary("Corgan", Percentage::value_of("50%").unwrap()).unwrap();
//! assert!(account.is_valid());
//!
//! let contribution = account.make_contribution(MonetaryAmount::value_of("8.00").unwrap()).unwrap();
//! assert_eq!(contribution.distributed_total(), MonetaryAmount::value_of("8.00").unwrap());
//! ```

pub mod account;
pub mod adapters;
pub mod allocation;
pub mod beneficiary;
pub mod confirmation;
pub mod contribution;
pub mod dining;
pub mod error;
pub mod network;
pub mod ports;
pub mod restaurant;

pub use account::Account;
pub use allocation::RoundingPolicy;
pub use beneficiary::Beneficiary;
pub use confirmation::{RewardConfirmation, RewardRecord};
pub use contribution::{AccountContribution, Distribution};
pub use dining::Dining;
pub use error::RewardsError;
pub use network::RewardNetwork;
pub use ports::{AccountRepository, RestaurantRepository, RewardRepository};
pub use restaurant::{BenefitAvailabilityPolicy, Restaurant};

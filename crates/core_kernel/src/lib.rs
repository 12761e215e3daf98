//! Core Kernel - Foundational value types for the reward network
//!
//! This crate provides the building blocks shared by every other crate:
//! - Monetary amounts with exact decimal arithmetic
//! - Exact allocation percentages
//! - Typed entity identifiers
//! - Port infrastructure for storage collaborators

pub mod money;
pub mod percentage;
pub mod identifiers;
pub mod ports;

pub use money::{MonetaryAmount, MoneyError, MINOR_UNIT_DIGITS};
pub use percentage::{Percentage, PercentageError};
pub use identifiers::{AccountId, RestaurantId, RewardId};
pub use ports::{DomainPort, PortError};

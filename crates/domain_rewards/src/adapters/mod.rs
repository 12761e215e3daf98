//! Adapters for the reward domain ports
//!
//! # Available Adapters
//!
//! - **InMemoryAccountRepository**: accounts keyed by account number
//! - **InMemoryRestaurantRepository**: restaurants keyed by merchant number
//! - **InMemoryRewardRepository**: reward records with sequential confirmation numbers
//!
//! Used by the batch runner and by tests. A database-backed system of record
//! would implement the same traits.

pub mod memory;

pub use memory::{InMemoryAccountRepository, InMemoryRestaurantRepository, InMemoryRewardRepository};

//! Reward Network Batch Runner
//!
//! Runs a batch of dinings through [`domain_rewards::RewardNetwork`] backed
//! by in-memory repositories seeded from the same batch file.
//!
//! # Batch Format
//!
//! ```json
//! {
//!   "accounts": [{
//!     "number": "123456789",
//!     "name": "Keith and Keri Donald",
//!     "credit_card_number": "1234123412341234",
//!     "beneficiaries": [
//!       { "name": "Annabelle", "allocation_percentage": "50%" },
//!       { "name": "Corgan", "allocation_percentage": "50%" }
//!     ]
//!   }],
//!   "restaurants": [
//!     { "number": "1234567890", "name": "AppleBees", "benefit_percentage": "8%" }
//!   ],
//!   "dinings": [
//!     { "amount": "100.00", "credit_card_number": "1234123412341234", "merchant_number": "1234567890" }
//!   ]
//! }
//! ```

pub mod batch;
pub mod config;
pub mod dto;
pub mod error;

pub use batch::{load_batch, parse_batch, run_batch, run_batch_on};
pub use config::{LogFormat, RewardsConfig};
pub use error::CliError;

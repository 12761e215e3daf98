//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! reward network test suite.
//!
//! # Modules
//!
//! - `fixtures`: The reference account, restaurant and dinings
//! - `builders`: Builder patterns for test accounts
//! - `assertions`: Custom assertion helpers for contributions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

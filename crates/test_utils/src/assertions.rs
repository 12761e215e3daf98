//! Custom Test Assertions
//!
//! Assertion helpers for contributions that report the offending
//! distributions instead of a bare `false`.

use core_kernel::MonetaryAmount;
use domain_rewards::{Account, AccountContribution};

/// Asserts that a contribution's distributions total exactly its amount
pub fn assert_fully_distributed(contribution: &AccountContribution) {
    assert_eq!(
        contribution.distributed_total(),
        contribution.amount(),
        "Distributions {:?} do not total the contributed {}",
        contribution.distributions().collect::<Vec<_>>(),
        contribution.amount()
    );
}

/// Asserts that the distributions miss the amount by at most `max_cents`
pub fn assert_distributed_within(contribution: &AccountContribution, max_cents: i128) {
    let drift = contribution.rounding_difference().minor_units().abs();
    assert!(
        drift <= max_cents,
        "Rounding drift of {} cents exceeds {} (amount={}, distributed={})",
        drift,
        max_cents,
        contribution.amount(),
        contribution.distributed_total()
    );
}

/// Asserts a beneficiary's current savings
///
/// # Panics
///
/// Panics if the beneficiary does not exist or the savings differ
pub fn assert_savings(account: &Account, beneficiary: &str, expected: MonetaryAmount) {
    let actual = account
        .get_beneficiary(beneficiary)
        .unwrap_or_else(|e| panic!("{e}"))
        .savings();
    assert_eq!(
        actual, expected,
        "Savings of {beneficiary}: actual={actual}, expected={expected}"
    );
}

/// Asserts that every beneficiary has no savings
pub fn assert_no_savings(account: &Account) {
    for beneficiary in account.beneficiaries() {
        assert!(
            beneficiary.savings().is_zero(),
            "Expected no savings for {}, got {}",
            beneficiary.name(),
            beneficiary.savings()
        );
    }
}

//! Comprehensive tests for account contributions

use proptest::prelude::*;
use std::collections::BTreeMap;
use rust_decimal_macros::dec;

use core_kernel::{MonetaryAmount, Percentage, PercentageError};
use domain_rewards::{Account, RewardsError, RoundingPolicy};
use test_utils::{
    assert_distributed_within, assert_fully_distributed, assert_no_savings, assert_savings,
    contribution_strategy, negative_amount_strategy, under_allocation_strategy,
    valid_allocation_strategy, whole_percent_allocation_strategy, AccountFixtures,
    MoneyFixtures, TestAccountBuilder,
};

fn amount(text: &str) -> MonetaryAmount {
    MonetaryAmount::value_of(text).unwrap()
}

// ============================================================================
// Contribution Scenarios
// ============================================================================

mod contribution_scenarios {
    use super::*;

    #[test]
    fn test_even_split_between_two_beneficiaries() {
        let mut account = AccountFixtures::keith_and_keri();
        assert!(account.is_valid());

        let contribution = account.make_contribution(amount("8.00")).unwrap();

        assert_eq!(contribution.amount(), amount("8.00"));
        assert_eq!(contribution.distribution_count(), 2);
        assert_eq!(contribution.get_distribution("Annabelle").unwrap().amount, amount("4.00"));
        assert_eq!(contribution.get_distribution("Corgan").unwrap().amount, amount("4.00"));
        assert_savings(&account, "Annabelle", MoneyFixtures::half_reward());
        assert_savings(&account, "Corgan", MoneyFixtures::half_reward());
    }

    #[test]
    fn test_sole_beneficiary_receives_everything() {
        let mut account = TestAccountBuilder::new()
            .with_beneficiary("Annabelle", "100%")
            .build();

        let contribution = account.make_contribution(amount("8.00")).unwrap();

        assert_eq!(contribution.distribution_count(), 1);
        let distribution = contribution.get_distribution("Annabelle").unwrap();
        assert_eq!(distribution.amount, amount("8.00"));
        assert_eq!(distribution.total_savings, amount("8.00"));
        assert_savings(&account, "Annabelle", amount("8.00"));
    }

    #[test]
    fn test_savings_accumulate_across_contributions() {
        let mut account = AccountFixtures::keith_and_keri();
        account.make_contribution(amount("8.00")).unwrap();
        let second = account.make_contribution(amount("2.00")).unwrap();

        assert_eq!(second.get_distribution("Corgan").unwrap().total_savings, amount("5.00"));
        assert_savings(&account, "Annabelle", amount("5.00"));
    }

    #[test]
    fn test_zero_contribution() {
        let mut account = AccountFixtures::keith_and_keri();
        let contribution = account.make_contribution(MonetaryAmount::zero()).unwrap();

        assert_eq!(contribution.distribution_count(), 2);
        assert_fully_distributed(&contribution);
        assert_no_savings(&account);
    }

    #[test]
    fn test_uneven_percentages() {
        let mut account = TestAccountBuilder::new()
            .with_beneficiary("Annabelle", "25%")
            .with_beneficiary("Corgan", "75%")
            .build();

        let contribution = account.make_contribution(amount("10.00")).unwrap();

        assert_eq!(contribution.get_distribution("Annabelle").unwrap().amount, amount("2.50"));
        assert_eq!(contribution.get_distribution("Corgan").unwrap().amount, amount("7.50"));
        assert_fully_distributed(&contribution);
    }

    #[test]
    fn test_three_way_split_half_up_drifts_by_a_cent() {
        let third = Percentage::from_ratio(1, 3).unwrap();
        let mut account = TestAccountBuilder::new()
            .with_allocations(&[third, third, third])
            .build();
        assert!(account.is_valid());

        let contribution = account.make_contribution(amount("10.00")).unwrap();

        for distribution in contribution.distributions() {
            assert_eq!(distribution.amount, amount("3.33"));
        }
        assert_eq!(contribution.rounding_difference(), amount("0.01"));
    }

    #[test]
    fn test_half_up_is_not_additive_for_sub_cent_shares() {
        let mut twice = AccountFixtures::keith_and_keri();
        twice.make_contribution(amount("0.01")).unwrap();
        twice.make_contribution(amount("0.01")).unwrap();

        let mut once = AccountFixtures::keith_and_keri();
        once.make_contribution(amount("0.02")).unwrap();

        assert_savings(&twice, "Annabelle", amount("0.02"));
        assert_savings(&once, "Annabelle", amount("0.01"));
    }

    #[test]
    fn test_two_contributions_equal_one_double_contribution() {
        let mut twice = AccountFixtures::keith_and_keri();
        twice.make_contribution(amount("4.00")).unwrap();
        twice.make_contribution(amount("4.00")).unwrap();

        let mut once = AccountFixtures::keith_and_keri();
        once.make_contribution(amount("8.00")).unwrap();

        assert_eq!(twice, once);
    }

    #[test]
    fn test_three_way_split_largest_remainder_is_exact() {
        let third = Percentage::from_ratio(1, 3).unwrap();
        let mut account = TestAccountBuilder::new()
            .with_allocations(&[third, third, third])
            .build();

        let contribution = account
            .make_contribution_with(amount("10.00"), RoundingPolicy::LargestRemainder)
            .unwrap();

        assert_fully_distributed(&contribution);
        assert_eq!(contribution.get_distribution("B0").unwrap().amount, amount("3.34"));
        assert_eq!(contribution.get_distribution("B1").unwrap().amount, amount("3.33"));
        assert_eq!(contribution.get_distribution("B2").unwrap().amount, amount("3.33"));
    }
}

// ============================================================================
// Validity
// ============================================================================

mod validity_tests {
    use super::*;

    #[test]
    fn test_over_allocation_is_invalid() {
        let account = AccountFixtures::over_allocated();
        assert!(!account.is_valid());
    }

    #[test]
    fn test_percentage_addition_over_one_hundred_fails() {
        let result = Percentage::value_of("50%")
            .unwrap()
            .checked_add(&Percentage::value_of("60%").unwrap());
        assert!(matches!(result, Err(PercentageError::OutOfRange(_))));
    }

    #[test]
    fn test_invalid_account_refuses_contribution() {
        let mut account = AccountFixtures::over_allocated();
        let before = account.clone();

        let result = account.make_contribution(amount("8.00"));

        assert!(matches!(result, Err(RewardsError::InvalidAccountState(_))));
        assert_eq!(account, before);
        assert_no_savings(&account);
    }

    #[test]
    fn test_account_without_beneficiaries_refuses_contribution() {
        let mut account = TestAccountBuilder::new().build();
        let result = account.make_contribution(amount("8.00"));
        assert!(matches!(result, Err(RewardsError::InvalidAccountState(_))));
    }

    #[test]
    fn test_unknown_beneficiary_is_not_found() {
        let account = AccountFixtures::keith_and_keri();
        let result = account.get_beneficiary("Nonexistent");
        assert!(matches!(result, Err(RewardsError::BeneficiaryNotFound(ref name)) if name == "Nonexistent"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_beneficiaries_are_ordered_by_name() {
        let account = TestAccountBuilder::new()
            .with_beneficiary("Corgan", "50%")
            .with_beneficiary("Annabelle", "50%")
            .build();
        let names: Vec<&str> = account.beneficiaries().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Annabelle", "Corgan"]);
    }

    #[test]
    fn test_saved_beneficiary_keeps_savings() {
        let account = TestAccountBuilder::new()
            .with_saved_beneficiary("Annabelle", Percentage::one_hundred(), MonetaryAmount::new(dec!(12.34)))
            .build();
        assert_savings(&account, "Annabelle", amount("12.34"));
    }
}

// ============================================================================
// Beneficiary Removal
// ============================================================================

mod removal_tests {
    use super::*;

    fn pct(text: &str) -> Percentage {
        Percentage::value_of(text).unwrap()
    }

    #[test]
    fn test_remove_sole_beneficiary() {
        let mut account = TestAccountBuilder::new()
            .with_saved_beneficiary("Annabelle", Percentage::one_hundred(), MonetaryAmount::new(dec!(12.34)))
            .build();

        let removed = account.remove_beneficiary("Annabelle", &BTreeMap::new()).unwrap();

        assert_eq!(removed.name(), "Annabelle");
        assert_eq!(removed.savings(), amount("12.34"));
        assert_eq!(account.beneficiary_count(), 0);
        assert!(!account.is_valid());
    }

    #[test]
    fn test_remove_zero_allocation_beneficiary() {
        let mut account = TestAccountBuilder::new()
            .with_beneficiary("Annabelle", "50%")
            .with_beneficiary("Corgan", "50%")
            .with_beneficiary("Dormant", "0%")
            .build();
        assert!(account.is_valid());

        account.remove_beneficiary("Dormant", &BTreeMap::new()).unwrap();

        assert_eq!(account.beneficiary_count(), 2);
        assert!(account.is_valid());
        account.make_contribution(amount("8.00")).unwrap();
        assert_savings(&account, "Corgan", MoneyFixtures::half_reward());
    }

    #[test]
    fn test_remove_with_rebalance() {
        let mut account = TestAccountBuilder::new()
            .with_beneficiary("Annabelle", "50%")
            .with_beneficiary("Corgan", "25%")
            .with_beneficiary("Dylan", "25%")
            .build();

        let allocations = BTreeMap::from([
            ("Annabelle".to_string(), pct("50%")),
            ("Corgan".to_string(), pct("50%")),
        ]);
        account.remove_beneficiary("Dylan", &allocations).unwrap();

        assert!(account.is_valid());
        assert_eq!(account.get_beneficiary("Corgan").unwrap().allocation_percentage(), pct("50%"));
        assert!(account.get_beneficiary("Dylan").is_err());
    }

    #[test]
    fn test_remove_without_rebalance_leaves_account_invalid() {
        let mut account = AccountFixtures::keith_and_keri();

        account.remove_beneficiary("Corgan", &BTreeMap::new()).unwrap();

        assert!(!account.is_valid());
        let result = account.make_contribution(amount("8.00"));
        assert!(matches!(result, Err(RewardsError::InvalidAccountState(_))));
    }

    #[test]
    fn test_remove_unknown_beneficiary() {
        let mut account = AccountFixtures::keith_and_keri();
        let before = account.clone();

        let result = account.remove_beneficiary("Nonexistent", &BTreeMap::new());

        assert!(matches!(result, Err(RewardsError::BeneficiaryNotFound(ref name)) if name == "Nonexistent"));
        assert_eq!(account, before);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_half_up_drifts_at_most_a_cent_per_beneficiary(
        allocations in valid_allocation_strategy(8),
        contribution in contribution_strategy(),
    ) {
        let count = allocations.len() as i128;
        let mut account = TestAccountBuilder::new().with_allocations(&allocations).build();
        prop_assert!(account.is_valid());

        let result = account.make_contribution(contribution).unwrap();
        assert_distributed_within(&result, count);
    }

    #[test]
    fn prop_largest_remainder_is_exact(
        allocations in valid_allocation_strategy(8),
        contribution in contribution_strategy(),
    ) {
        let mut account = TestAccountBuilder::new().with_allocations(&allocations).build();
        let result = account
            .make_contribution_with(contribution, RoundingPolicy::LargestRemainder)
            .unwrap();
        prop_assert_eq!(result.distributed_total(), contribution);
    }

    #[test]
    fn prop_whole_percent_allocations_are_valid(allocations in whole_percent_allocation_strategy(10)) {
        let account = TestAccountBuilder::new().with_allocations(&allocations).build();
        prop_assert!(account.is_valid());
    }

    #[test]
    fn prop_under_allocated_account_is_unchanged(
        allocations in under_allocation_strategy(6),
        contribution in contribution_strategy(),
    ) {
        let mut account = TestAccountBuilder::new().with_allocations(&allocations).build();
        prop_assert!(!account.is_valid());

        let before = account.clone();
        let result = account.make_contribution(contribution);
        prop_assert!(matches!(result, Err(RewardsError::InvalidAccountState(_))));
        prop_assert_eq!(account, before);
    }

    #[test]
    fn prop_negative_contribution_is_rejected(contribution in negative_amount_strategy()) {
        let mut account = AccountFixtures::keith_and_keri();
        let result = account.make_contribution(contribution);
        prop_assert!(matches!(result, Err(RewardsError::NegativeAmount(_))));
        assert_no_savings(&account);
    }

    #[test]
    fn prop_exact_shares_are_additive(
        allocations in whole_percent_allocation_strategy(6),
        dollars in 0i64..10_000_000i64,
    ) {
        // Whole-dollar amounts against whole percents split into exact cents
        let single = MonetaryAmount::from_minor(dollars * 100);
        let double = MonetaryAmount::from_minor(dollars * 200);

        let mut twice = TestAccountBuilder::new().with_allocations(&allocations).build();
        twice.make_contribution(single).unwrap();
        twice.make_contribution(single).unwrap();

        let mut once = TestAccountBuilder::new().with_allocations(&allocations).build();
        once.make_contribution(double).unwrap();

        for beneficiary in once.beneficiaries() {
            prop_assert_eq!(
                twice.get_beneficiary(beneficiary.name()).unwrap().savings(),
                beneficiary.savings()
            );
        }
    }

    #[test]
    fn prop_savings_grow_by_distributed_amount(
        allocations in valid_allocation_strategy(5),
        first in contribution_strategy(),
        second in contribution_strategy(),
    ) {
        let mut account = TestAccountBuilder::new().with_allocations(&allocations).build();
        let a = account.make_contribution(first).unwrap();
        let b = account.make_contribution(second).unwrap();

        for beneficiary in account.beneficiaries() {
            let expected = a.get_distribution(beneficiary.name()).unwrap().amount
                + b.get_distribution(beneficiary.name()).unwrap().amount;
            prop_assert_eq!(beneficiary.savings(), expected);
        }
    }
}

#[test]
fn test_total_allocation_of_reference_account() {
    let account: Account = AccountFixtures::keith_and_keri();
    assert!(account.total_allocation().unwrap().is_one_hundred());
}

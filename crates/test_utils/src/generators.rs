//! Property-Based Test Generators
//!
//! Proptest strategies for amounts and allocation sets.

use core_kernel::{MonetaryAmount, Percentage};
use proptest::prelude::*;

/// Strategy for non-negative amounts in minor units, up to $10,000,000.00
pub fn contribution_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for non-negative contribution amounts
pub fn contribution_strategy() -> impl Strategy<Value = MonetaryAmount> {
    contribution_minor_strategy().prop_map(MonetaryAmount::from_minor)
}

/// Strategy for negative amounts
pub fn negative_amount_strategy() -> impl Strategy<Value = MonetaryAmount> {
    (-1_000_000_000i64..0i64).prop_map(MonetaryAmount::from_minor)
}

/// Strategy for whole percentages from 0% to 100%
pub fn whole_percentage_strategy() -> impl Strategy<Value = Percentage> {
    (0u64..=100u64).prop_map(|n| Percentage::from_ratio(n, 100).unwrap())
}

/// Strategy for 1 to `max_beneficiaries` allocations totalling exactly 100%
///
/// Each allocation is `w_i / W` for random positive weights, so thirds,
/// sevenths and other non-terminating fractions show up.
pub fn valid_allocation_strategy(max_beneficiaries: usize) -> impl Strategy<Value = Vec<Percentage>> {
    prop::collection::vec(1u64..1_000u64, 1..=max_beneficiaries.max(1)).prop_map(|weights| {
        let total: u64 = weights.iter().sum();
        weights
            .into_iter()
            .map(|w| Percentage::from_ratio(w, total).unwrap())
            .collect()
    })
}

/// Strategy for 1 to `max_beneficiaries` whole-percent allocations totalling exactly 100%
pub fn whole_percent_allocation_strategy(max_beneficiaries: usize) -> impl Strategy<Value = Vec<Percentage>> {
    prop::collection::vec(1u64..100u64, 1..=max_beneficiaries.max(1)).prop_map(|weights| {
        let total: u64 = weights.iter().sum();
        // Scale to whole percents, then give the largest the shortfall
        let mut percents: Vec<u64> = weights.iter().map(|w| w * 100 / total).collect();
        let shortfall = 100 - percents.iter().sum::<u64>();
        if let Some(max) = percents.iter_mut().max() {
            *max += shortfall;
        }
        percents
            .into_iter()
            .map(|p| Percentage::from_ratio(p, 100).unwrap())
            .collect()
    })
}

/// Strategy for allocations totalling strictly less than 100%
pub fn under_allocation_strategy(max_beneficiaries: usize) -> impl Strategy<Value = Vec<Percentage>> {
    prop::collection::vec(0u64..=99u64, 1..=max_beneficiaries.max(1)).prop_map(|percents| {
        let count = percents.len() as u64;
        // Cap each share so the total stays below 100%
        let cap = 99 / count;
        percents
            .into_iter()
            .map(|p| Percentage::from_ratio(p.min(cap), 100).unwrap())
            .collect()
    })
}

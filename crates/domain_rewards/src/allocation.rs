//! Splitting a contribution by allocation percentages

use serde::{Deserialize, Serialize};

use core_kernel::{MonetaryAmount, MoneyError, Percentage};

/// How a contribution is rounded when it is split across beneficiaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Each share is rounded half-up on its own. The shares may miss the
    /// contribution by up to half a cent per beneficiary.
    ///
    /// Contributions are additive (two contributions of A credit the same
    /// savings as one of 2A) only when every share is exact. On a 50/50
    /// account, two contributions of 0.01 credit each beneficiary 0.02,
    /// while one contribution of 0.02 credits each 0.01.
    #[default]
    HalfUp,
    /// Shares are floored, then the leftover cents go one at a time to the
    /// largest fractional remainders. The shares always total the
    /// contribution when the percentages total 100%.
    LargestRemainder,
}

/// Splits `amount` into one share per weight, in the order given
///
/// Ties between equal remainders go to the earlier weight.
pub fn split(
    amount: MonetaryAmount,
    weights: &[Percentage],
    policy: RoundingPolicy,
) -> Result<Vec<MonetaryAmount>, MoneyError> {
    match policy {
        RoundingPolicy::HalfUp => weights.iter().map(|w| amount.multiply_by(w)).collect(),
        RoundingPolicy::LargestRemainder => split_largest_remainder(amount, weights),
    }
}

fn split_largest_remainder(
    amount: MonetaryAmount,
    weights: &[Percentage],
) -> Result<Vec<MonetaryAmount>, MoneyError> {
    let total = amount.minor_units();
    let sign = total.signum();
    let magnitude = total.abs();

    // (floored share, remainder, denominator)
    let mut parts = Vec::with_capacity(weights.len());
    for weight in weights {
        let product = magnitude
            .checked_mul(i128::from(weight.numerator()))
            .ok_or(MoneyError::Overflow)?;
        let denominator = i128::from(weight.denominator());
        parts.push((product / denominator, product % denominator, denominator));
    }

    let floored: i128 = parts.iter().map(|(share, _, _)| share).sum();
    let mut leftover = magnitude - floored;

    let mut order: Vec<usize> = (0..parts.len()).collect();
    // r_a / d_a > r_b / d_b, compared without division; stable sort keeps ties in input order
    order.sort_by(|&a, &b| {
        let (_, ra, da) = parts[a];
        let (_, rb, db) = parts[b];
        let lhs = rb.unsigned_abs() * da.unsigned_abs();
        let rhs = ra.unsigned_abs() * db.unsigned_abs();
        lhs.cmp(&rhs)
    });

    for index in order {
        if leftover <= 0 {
            break;
        }
        if parts[index].1 > 0 {
            parts[index].0 += 1;
            leftover -= 1;
        }
    }

    parts
        .into_iter()
        .map(|(share, _, _)| MonetaryAmount::from_minor_units(sign * share))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> MonetaryAmount {
        MonetaryAmount::value_of(text).unwrap()
    }

    fn thirds() -> Vec<Percentage> {
        vec![Percentage::from_ratio(1, 3).unwrap(); 3]
    }

    #[test]
    fn test_half_up_three_way_split_loses_a_cent() {
        let shares = split(amount("10.00"), &thirds(), RoundingPolicy::HalfUp).unwrap();
        assert_eq!(shares, vec![amount("3.33"); 3]);
        assert_eq!(shares.iter().sum::<MonetaryAmount>(), amount("9.99"));
    }

    #[test]
    fn test_largest_remainder_three_way_split_is_exact() {
        let shares = split(amount("10.00"), &thirds(), RoundingPolicy::LargestRemainder).unwrap();
        assert_eq!(shares, vec![amount("3.34"), amount("3.33"), amount("3.33")]);
        assert_eq!(shares.iter().sum::<MonetaryAmount>(), amount("10.00"));
    }

    #[test]
    fn test_largest_remainder_favors_bigger_fraction() {
        // 0.05 split 30/70: 1.5 and 3.5 cents; both remainders are one half,
        // so the first weight wins the tie
        let weights = vec![
            Percentage::value_of("30%").unwrap(),
            Percentage::value_of("70%").unwrap(),
        ];
        let shares = split(amount("0.05"), &weights, RoundingPolicy::LargestRemainder).unwrap();
        assert_eq!(shares, vec![amount("0.02"), amount("0.03")]);

        // 0.10 split 1/3 and 2/3: 3.33 and 6.67 cents
        let weights = vec![
            Percentage::from_ratio(1, 3).unwrap(),
            Percentage::from_ratio(2, 3).unwrap(),
        ];
        let shares = split(amount("0.10"), &weights, RoundingPolicy::LargestRemainder).unwrap();
        assert_eq!(shares, vec![amount("0.03"), amount("0.07")]);
    }

    #[test]
    fn test_even_split_is_identical_under_both_policies() {
        let halves = vec![Percentage::value_of("50%").unwrap(); 2];
        let half_up = split(amount("8.00"), &halves, RoundingPolicy::HalfUp).unwrap();
        let exact = split(amount("8.00"), &halves, RoundingPolicy::LargestRemainder).unwrap();
        assert_eq!(half_up, exact);
        assert_eq!(half_up, vec![amount("4.00"), amount("4.00")]);
    }

    #[test]
    fn test_no_weights_yields_no_shares() {
        assert!(split(amount("8.00"), &[], RoundingPolicy::LargestRemainder).unwrap().is_empty());
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: RoundingPolicy = serde_json::from_str("\"largest_remainder\"").unwrap();
        assert_eq!(policy, RoundingPolicy::LargestRemainder);
        assert_eq!(serde_json::to_string(&RoundingPolicy::HalfUp).unwrap(), "\"half_up\"");
    }
}

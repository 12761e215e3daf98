//! Pre-built Test Fixtures
//!
//! The reference member, restaurant and dining used across the test suite.
//! Keith and Keri Donald dine for $100.00 at a restaurant paying 8%; the
//! resulting $8.00 reward is split evenly between Annabelle and Corgan.

use chrono::NaiveDate;
use core_kernel::{MonetaryAmount, Percentage};
use domain_rewards::{Account, Dining, Restaurant};
use rust_decimal_macros::dec;

/// Fixture for string business keys
pub struct KeyFixtures;

impl KeyFixtures {
    pub fn account_number() -> &'static str {
        "123456789"
    }

    pub fn credit_card_number() -> &'static str {
        "1234123412341234"
    }

    pub fn merchant_number() -> &'static str {
        "1234567890"
    }

    /// A card no account is registered to
    pub fn unknown_credit_card_number() -> &'static str {
        "9999888877776666"
    }

    /// A merchant number no restaurant is registered under
    pub fn unknown_merchant_number() -> &'static str {
        "0000000000"
    }
}

/// Fixture for monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn dining_amount() -> MonetaryAmount {
        MonetaryAmount::new(dec!(100.00))
    }

    /// Reward for `dining_amount` at 8%
    pub fn reward_amount() -> MonetaryAmount {
        MonetaryAmount::new(dec!(8.00))
    }

    /// Each beneficiary's half of `reward_amount`
    pub fn half_reward() -> MonetaryAmount {
        MonetaryAmount::new(dec!(4.00))
    }
}

/// Fixture for the reference account
pub struct AccountFixtures;

impl AccountFixtures {
    /// Account 123456789 with Annabelle and Corgan at 50% each and no savings
    pub fn keith_and_keri() -> Account {
        let mut account = Account::new(KeyFixtures::account_number(), "Keith and Keri Donald")
            .with_credit_card(KeyFixtures::credit_card_number());
        account
            .add_beneficiary("Annabelle", Percentage::from_ratio(1, 2).unwrap())
            .unwrap();
        account
            .add_beneficiary("Corgan", Percentage::from_ratio(1, 2).unwrap())
            .unwrap();
        account
    }

    /// Same member, but allocations total 110%
    pub fn over_allocated() -> Account {
        let mut account = Account::new(KeyFixtures::account_number(), "Keith and Keri Donald")
            .with_credit_card(KeyFixtures::credit_card_number());
        account
            .add_beneficiary("Annabelle", Percentage::value_of("50%").unwrap())
            .unwrap();
        account
            .add_beneficiary("Corgan", Percentage::value_of("60%").unwrap())
            .unwrap();
        account
    }
}

/// Fixture for the reference restaurant
pub struct RestaurantFixtures;

impl RestaurantFixtures {
    /// Merchant 1234567890 paying 8% of every dining
    pub fn applebees() -> Restaurant {
        Restaurant::new(
            KeyFixtures::merchant_number(),
            "AppleBees",
            Percentage::value_of("8%").unwrap(),
        )
    }
}

/// Fixture for dinings
pub struct DiningFixtures;

impl DiningFixtures {
    pub fn dining_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// $100.00 on the reference card at the reference restaurant
    pub fn reference_dining() -> Dining {
        Dining::new(
            MoneyFixtures::dining_amount(),
            KeyFixtures::credit_card_number(),
            KeyFixtures::merchant_number(),
            Self::dining_date(),
        )
    }

    pub fn with_amount(amount: MonetaryAmount) -> Dining {
        Dining::new(
            amount,
            KeyFixtures::credit_card_number(),
            KeyFixtures::merchant_number(),
            Self::dining_date(),
        )
    }
}

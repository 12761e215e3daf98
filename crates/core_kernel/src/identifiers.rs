//! Strongly-typed identifiers for reward network entities
//!
//! Entity identities are assigned by whichever repository stores the entity.
//! Business keys (account number, merchant number, confirmation number) stay
//! plain strings on the entities themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Assigns a new time-ordered identity
            pub fn assign() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an identity loaded from storage
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(
    /// Internal identity of a stored member account
    AccountId,
    "ACC"
);
entity_id!(
    /// Internal identity of a stored restaurant
    RestaurantId,
    "RST"
);
entity_id!(
    /// Internal identity of a recorded reward
    RewardId,
    "RWD"
);

//! Ports and Adapters Infrastructure
//!
//! The allocation engine never touches storage directly. Lookups of accounts
//! and restaurants, persistence of beneficiary savings and recording of
//! rewards are collaborators reached through port traits defined in the
//! domain crate. This module provides the pieces every port shares.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │      RewardNetwork (use case)            │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  AccountRepository / RestaurantRepository│
//! │  RewardRepository   (port traits)        │
//! └──────────────────────────────────────────┘
//!          ▲                      ▲
//!   ┌──────┴──────┐        ┌──────┴──────┐
//!   │  In-memory  │        │  Database / │
//!   │  adapters   │        │  remote SOR │
//!   └─────────────┘        └─────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the use case can
/// treat storage errors uniformly.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with key {key}")]
    NotFound {
        entity_type: String,
        key: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, key: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            key: key.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    ///
    /// Retrying is the caller's decision; nothing in the domain retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across tasks, so every implementation must be
/// thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Account", "123456789");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Account"));
        assert!(error.to_string().contains("123456789"));
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("pool exhausted").is_transient());
        assert!(!PortError::conflict("duplicate account number").is_transient());
        assert!(!PortError::internal("corrupt row").is_transient());
    }
}

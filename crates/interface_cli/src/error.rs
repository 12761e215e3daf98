//! Runner error handling

use thiserror::Error;

use core_kernel::PortError;
use domain_rewards::RewardsError;

/// Errors that stop a batch run
///
/// A dining that cannot be rewarded is reported in the batch report instead.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read batch file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid seed data: {0}")]
    Seed(#[from] RewardsError),

    #[error("Cannot seed repository: {0}")]
    Port(#[from] PortError),
}

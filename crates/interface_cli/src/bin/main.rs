//! Reward Network - Batch Runner Binary
//!
//! Rewards every dining in a JSON batch file and prints the report as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Batch path from configuration
//! REWARDS_BATCH_PATH=crates/interface_cli/data/sample_batch.json cargo run --bin reward-network
//!
//! # Batch path as the first argument
//! cargo run --bin reward-network -- crates/interface_cli/data/sample_batch.json
//! ```
//!
//! # Environment Variables
//!
//! * `REWARDS_BATCH_PATH` - Batch file (default: batch.json)
//! * `REWARDS_ROUNDING` - `half_up` or `largest_remainder` (default: half_up)
//! * `REWARDS_CONFIRMATION_PREFIX` - Confirmation number prefix (default: RN)
//! * `REWARDS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `REWARDS_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use anyhow::Context;
use interface_cli::{load_batch, run_batch, LogFormat, RewardsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let mut config = RewardsConfig::from_env().context("loading REWARDS_* configuration")?;
    if let Some(path) = std::env::args().nth(1) {
        config.batch_path = path;
    }

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        batch = %config.batch_path,
        rounding = ?config.rounding,
        "Starting reward batch"
    );

    let batch = load_batch(&config.batch_path)
        .with_context(|| format!("loading batch {}", config.batch_path))?;
    let report = run_batch(batch, &config).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so the report on stdout stays machine-readable.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

//! Runner configuration

use serde::Deserialize;

use domain_rewards::RoundingPolicy;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Runner configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    /// JSON batch of accounts, restaurants and dinings
    pub batch_path: String,
    /// How contributions are split across beneficiaries
    pub rounding: RoundingPolicy,
    /// Prefix of generated confirmation numbers
    pub confirmation_prefix: String,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            batch_path: "batch.json".to_string(),
            rounding: RoundingPolicy::default(),
            confirmation_prefix: "RN".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl RewardsConfig {
    /// Loads configuration from `REWARDS_`-prefixed environment variables
    ///
    /// Unset variables take their defaults; a set but invalid variable is an
    /// error for the whole configuration.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix("REWARDS"))
    }

    /// Loads configuration from an environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

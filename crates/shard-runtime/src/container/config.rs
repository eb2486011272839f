//! # Runtime Configuration
//!
//! Settings for the simulator binary. Environment variables provide the
//! defaults; command-line flags override them.

use std::env;
use std::path::PathBuf;

use shard_ledger::{LedgerConfig, LedgerError, RejectionPolicy, DEFAULT_STATE_FILE};
use thiserror::Error;

/// Default number of generated transactions echoed to the console.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Topology snapshot file.
    pub state_file: PathBuf,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Transactions shown after `generate`.
    pub preview_limit: usize,
    /// Settings for every node.
    pub ledger: LedgerConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            seed: None,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            ledger: LedgerConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// Ledger settings out of range.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SHARD_STATE_FILE`: Snapshot path (default: network_state.json)
    /// - `SHARD_SEED`: RNG seed (default: entropy)
    /// - `SHARD_PREVIEW_LIMIT`: Transactions echoed by `generate` (default: 5)
    /// - `SHARD_LOCAL_RATIO`: Probability a sample stays in-shard (default: 0.7)
    /// - `SHARD_REJECTION_POLICY`: `discard` or `requeue` (default: discard)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SHARD_STATE_FILE") {
            config.state_file = PathBuf::from(path);
        }
        if let Some(seed) = lookup("SHARD_SEED") {
            config.seed = Some(parse("SHARD_SEED", seed)?);
        }
        if let Some(limit) = lookup("SHARD_PREVIEW_LIMIT") {
            config.preview_limit = parse("SHARD_PREVIEW_LIMIT", limit)?;
        }
        if let Some(ratio) = lookup("SHARD_LOCAL_RATIO") {
            config.ledger.local_ratio = parse("SHARD_LOCAL_RATIO", ratio)?;
        }
        if let Some(policy) = lookup("SHARD_REJECTION_POLICY") {
            config.ledger.rejection_policy = match policy.to_lowercase().as_str() {
                "discard" => RejectionPolicy::Discard,
                "requeue" => RejectionPolicy::Requeue,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SHARD_REJECTION_POLICY",
                        value: policy,
                    })
                }
            };
        }

        config.ledger.validate()?;
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

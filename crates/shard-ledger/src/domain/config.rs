//! # Ledger Configuration

use super::errors::LedgerError;
use super::value_objects::RejectionPolicy;
use serde::{Deserialize, Serialize};

/// Default probability that a sampled transaction stays in its shard.
pub const DEFAULT_LOCAL_RATIO: f64 = 0.7;

/// Default upper bound (inclusive) for sampled amounts.
pub const DEFAULT_MAX_AMOUNT: u64 = 1000;

/// Default number of distinct synthetic accounts.
pub const DEFAULT_ACCOUNT_SPACE: u32 = 100;

/// Per-node ledger settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Probability that a sampled transaction targets the node's own shard.
    pub local_ratio: f64,
    /// Sampled amounts are drawn from `1..=max_amount`.
    pub max_amount: u64,
    /// Sampled accounts are drawn from `account-0 .. account-(n-1)`.
    pub account_space: u32,
    /// What `mine` does with drained transactions when commit is rejected.
    pub rejection_policy: RejectionPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            local_ratio: DEFAULT_LOCAL_RATIO,
            max_amount: DEFAULT_MAX_AMOUNT,
            account_space: DEFAULT_ACCOUNT_SPACE,
            rejection_policy: RejectionPolicy::Discard,
        }
    }
}

impl LedgerConfig {
    /// Create config for testing.
    pub fn for_testing() -> Self {
        Self {
            local_ratio: DEFAULT_LOCAL_RATIO,
            max_amount: 100,
            account_space: 10,
            rejection_policy: RejectionPolicy::Requeue,
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if !(0.0..=1.0).contains(&self.local_ratio) {
            return Err(LedgerError::InvalidConfig(format!(
                "local_ratio must be within [0, 1], got {}",
                self.local_ratio
            )));
        }
        if self.max_amount == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_amount must be positive".to_string(),
            ));
        }
        if self.account_space == 0 {
            return Err(LedgerError::InvalidConfig(
                "account_space must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

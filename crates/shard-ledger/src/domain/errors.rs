//! # Domain Errors
//!
//! Error types for the sharded ledger.
//!
//! Nothing in the core is fatal: every variant describes a local condition
//! the caller can recover from by re-issuing a corrected request.

use thiserror::Error;

/// Shard identifier.
pub type ShardId = u64;

/// Node identifier, unique across the whole network.
pub type NodeId = u64;

/// Account identifier (opaque string).
pub type AccountId = String;

/// Ledger error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No node with this identifier is registered.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with this identifier is already registered.
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// Candidate block does not extend the chain tip.
    #[error("Block rejected: expected number {expected}, got {got}")]
    BlockRejected {
        /// Number the chain would accept (height + 1)
        expected: u64,
        /// Number carried by the candidate
        got: u64,
    },

    /// A structural invariant does not hold.
    #[error("Ledger state inconsistency: {0}")]
    StateInconsistency(String),

    /// Topology snapshot could not be decoded or encoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Underlying storage failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Snapshot(err.to_string())
    }
}

//! # Shard Ledger
//!
//! Simulated sharded ledger: shards of independent in-process replicas that
//! partition incoming transactions, relay cross-shard ones to their
//! destination shard and mine pending transactions into numbered blocks.
//!
//! ## Flow
//!
//! ```text
//! ShardNode::ingest ──▶ TransactionPool ──┬─ to_shard == own ──▶ pending ──mine──▶ Block
//!                                         └─ otherwise ────────▶ relay
//!
//! ShardNetwork::deliver(tx, shard) ──▶ every member's ingest (tx becomes pending there)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! shard-ledger/
//! ├── domain/          # Transaction, Block, TransactionPool, LedgerChain, errors
//! ├── algorithms/      # Destination routing, sample generation
//! ├── node.rs          # ShardNode: identity + locked chain
//! ├── network.rs       # ShardNetwork: topology, delivery, snapshot/restore
//! ├── ports/           # TopologyStore trait (+ in-memory impl)
//! └── adapters/        # JSON file topology store
//! ```
//!
//! ## Non-goals
//!
//! No signing or hashing, no leader election, no real transport and no
//! fault simulation: delivery is a synchronous fan-out inside the process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod metrics;
pub mod network;
pub mod node;
pub mod ports;

// Re-exports
pub use adapters::{json_file::DEFAULT_STATE_FILE, JsonFileTopologyStore};
pub use algorithms::{choose_destination, group_cross_shard, sample_transactions};
pub use domain::{
    invariant_block_sequence, invariant_pool_partition, invariant_single_membership, AccountId,
    Block, DeliveryReport, LedgerChain, LedgerConfig, LedgerError, NodeDescriptor, NodeId,
    NodeStatus, RejectionPolicy, ShardId, TopologySnapshot, Transaction, TransactionPool,
};
pub use metrics::{MetricsSnapshot, NetworkMetrics};
pub use network::{default_address, ShardNetwork};
pub use node::ShardNode;
pub use ports::{InMemoryTopologyStore, TopologyStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

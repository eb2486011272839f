//! # Transaction Pool
//!
//! Per-node container that partitions incoming transactions by destination.
//!
//! ## Data Structures
//!
//! - `pending`: transactions destined for the owner's shard, mined locally
//! - `relay`: transactions destined elsewhere, awaiting outbound forwarding
//!
//! ## Invariants Enforced
//!
//! - Every ingested transaction lands in exactly one of the two queues
//! - Both queues keep ingestion order
//! - Only `drain_pending()` (mining) ever shrinks `pending`; nothing shrinks `relay`

use super::entities::Transaction;
use super::errors::ShardId;
use tracing::trace;

/// Pending/relay split for a single node.
#[derive(Debug, Clone)]
pub struct TransactionPool {
    /// Shard of the owning node; the classification key.
    owner_shard: ShardId,

    /// Locally destined transactions, in arrival order.
    pending: Vec<Transaction>,

    /// Transactions bound for other shards, in arrival order.
    relay: Vec<Transaction>,
}

impl TransactionPool {
    /// Creates an empty pool for a node of `owner_shard`.
    pub fn new(owner_shard: ShardId) -> Self {
        Self {
            owner_shard,
            pending: Vec::new(),
            relay: Vec::new(),
        }
    }

    /// Shard this pool classifies against.
    pub fn owner_shard(&self) -> ShardId {
        self.owner_shard
    }

    /// Classifies and appends each transaction of `batch`.
    pub fn ingest<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        for tx in batch {
            if tx.to_shard() == self.owner_shard {
                trace!(shard_id = self.owner_shard, nonce = tx.nonce(), "queued pending");
                self.pending.push(tx);
            } else {
                trace!(
                    shard_id = self.owner_shard,
                    to_shard = tx.to_shard(),
                    nonce = tx.nonce(),
                    "queued relay"
                );
                self.relay.push(tx);
            }
        }
    }

    /// Number of transactions awaiting local mining.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of transactions awaiting outbound relay.
    pub fn relay_count(&self) -> usize {
        self.relay.len()
    }

    /// Total transactions held.
    pub fn len(&self) -> usize {
        self.pending.len() + self.relay.len()
    }

    /// Returns true if both queues are empty.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.relay.is_empty()
    }

    /// Pending transactions, oldest first.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Relay transactions, oldest first.
    pub fn relay(&self) -> &[Transaction] {
        &self.relay
    }

    /// Removes and returns every pending transaction. Relay is untouched.
    pub fn drain_pending(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    /// Puts previously drained transactions back ahead of anything that
    /// arrived since, preserving their order.
    pub fn requeue_front(&mut self, txs: Vec<Transaction>) {
        if txs.is_empty() {
            return;
        }
        self.pending.splice(0..0, txs);
    }
}

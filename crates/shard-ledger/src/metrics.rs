//! Metrics collection for the sharded ledger

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Network-wide counters, shared by every node handle the network hands out.
#[derive(Debug, Default)]
pub struct NetworkMetrics {
    /// Transactions generated by samplers
    pub transactions_sampled: AtomicU64,

    /// Node-level deliveries of cross-shard transactions
    pub cross_shard_deliveries: AtomicU64,

    /// Deliveries aimed at a shard with no members
    pub empty_shard_deliveries: AtomicU64,

    /// Blocks appended by `mine`
    pub blocks_committed: AtomicU64,

    /// Candidates rejected by `mine`
    pub commits_rejected: AtomicU64,
}

/// Plain copy of [`NetworkMetrics`] for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Transactions generated by samplers
    pub transactions_sampled: u64,
    /// Node-level deliveries of cross-shard transactions
    pub cross_shard_deliveries: u64,
    /// Deliveries aimed at a shard with no members
    pub empty_shard_deliveries: u64,
    /// Blocks appended by `mine`
    pub blocks_committed: u64,
    /// Candidates rejected by `mine`
    pub commits_rejected: u64,
}

impl NetworkMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sampled batch
    pub fn record_sampled(&self, count: usize) {
        self.transactions_sampled
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a fan-out to `recipients` nodes
    pub fn record_delivery(&self, recipients: usize) {
        if recipients == 0 {
            self.empty_shard_deliveries.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cross_shard_deliveries
                .fetch_add(recipients as u64, Ordering::Relaxed);
        }
    }

    /// Record a mining outcome
    pub fn record_mine(&self, committed: bool) {
        if committed {
            self.blocks_committed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.commits_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            transactions_sampled: self.transactions_sampled.load(Ordering::Relaxed),
            cross_shard_deliveries: self.cross_shard_deliveries.load(Ordering::Relaxed),
            empty_shard_deliveries: self.empty_shard_deliveries.load(Ordering::Relaxed),
            blocks_committed: self.blocks_committed.load(Ordering::Relaxed),
            commits_rejected: self.commits_rejected.load(Ordering::Relaxed),
        }
    }
}

//! # Shard Node
//!
//! A ledger replica: immutable identity plus one [`LedgerChain`] behind a
//! lock. Ingestion and mining each hold the lock for their whole duration, so
//! a transaction is never observable as both drained into a block and still
//! pending. Distinct nodes share nothing and can be driven in parallel.

use crate::algorithms::sample_transactions;
use crate::domain::{
    Block, LedgerChain, LedgerConfig, LedgerError, NodeDescriptor, NodeId, NodeStatus,
    RejectionPolicy, ShardId, Transaction,
};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// One replica within a shard.
#[derive(Debug)]
pub struct ShardNode {
    id: NodeId,
    shard_id: ShardId,
    address: String,
    config: LedgerConfig,
    /// Next nonce handed to a sampled transaction.
    next_nonce: AtomicU64,
    chain: Mutex<LedgerChain>,
}

impl ShardNode {
    /// Create a node with default ledger settings.
    pub fn new(id: NodeId, shard_id: ShardId, address: impl Into<String>) -> Self {
        Self::with_config(id, shard_id, address, LedgerConfig::default())
    }

    /// Create a node with explicit ledger settings.
    pub fn with_config(
        id: NodeId,
        shard_id: ShardId,
        address: impl Into<String>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            id,
            shard_id,
            address: address.into(),
            config,
            next_nonce: AtomicU64::new(0),
            chain: Mutex::new(LedgerChain::new(shard_id)),
        }
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Shard this node belongs to.
    pub fn shard_id(&self) -> ShardId {
        self.shard_id
    }

    /// Opaque network address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Ledger settings.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Persistable identity.
    pub fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor {
            id: self.id,
            shard_id: self.shard_id,
            address: self.address.clone(),
        }
    }

    /// Classify `batch` into this node's pending and relay queues.
    pub fn ingest<I>(&self, batch: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut chain = self.chain.lock();
        let before = chain.pool().len();
        chain.ingest(batch);
        debug!(
            node_id = self.id,
            shard_id = self.shard_id,
            ingested = chain.pool().len() - before,
            pending = chain.pool().pending_count(),
            relay = chain.pool().relay_count(),
            "ingested batch"
        );
    }

    /// Generate `count` synthetic transactions originating on this node.
    ///
    /// `shards` is the full set of known shards, used to pick cross-shard
    /// destinations. The batch is returned, not ingested.
    pub fn sample_transactions<R: Rng + ?Sized>(
        &self,
        count: usize,
        shards: &[ShardId],
        rng: &mut R,
    ) -> Vec<Transaction> {
        let first_nonce = self.next_nonce.fetch_add(count as u64, Ordering::Relaxed);
        sample_transactions(self.shard_id, count, shards, first_nonce, &self.config, rng)
    }

    /// Drain pending into the next block and commit it.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        self.mine_with(|candidate| candidate)
    }

    /// Two-step mining: `finalize` sees the generated candidate and returns
    /// the block to commit (e.g. after validating or signing it).
    ///
    /// On rejection the drained transactions are discarded or requeued per
    /// [`LedgerConfig::rejection_policy`].
    pub fn mine_with<F>(&self, finalize: F) -> Result<Block, LedgerError>
    where
        F: FnOnce(Block) -> Block,
    {
        let mut chain = self.chain.lock();
        let expected = chain.current_height() + 1;
        let drafted = chain.generate_block();

        // Keep what was drained; `finalize` may rewrite the block contents
        let restore = match self.config.rejection_policy {
            RejectionPolicy::Requeue => Some(drafted.transactions().to_vec()),
            RejectionPolicy::Discard => None,
        };

        let candidate = finalize(drafted);
        let got = candidate.number();

        if chain.commit(candidate) {
            let block = chain.latest_block().clone();
            info!(
                node_id = self.id,
                shard_id = self.shard_id,
                number = block.number(),
                tx_count = block.len(),
                "block committed"
            );
            return Ok(block);
        }

        match restore {
            Some(txs) => {
                warn!(
                    node_id = self.id,
                    requeued = txs.len(),
                    "commit rejected, transactions requeued"
                );
                chain.pool_mut().requeue_front(txs);
            }
            None => warn!(node_id = self.id, "commit rejected, transactions discarded"),
        }

        Err(LedgerError::BlockRejected { expected, got })
    }

    /// Chain height.
    pub fn height(&self) -> u64 {
        self.chain.lock().current_height()
    }

    /// Pending queue length.
    pub fn pending_count(&self) -> usize {
        self.chain.lock().pool().pending_count()
    }

    /// Relay queue length.
    pub fn relay_count(&self) -> usize {
        self.chain.lock().pool().relay_count()
    }

    /// Consistent view of identity and queue sizes.
    pub fn status(&self) -> NodeStatus {
        let chain = self.chain.lock();
        NodeStatus {
            id: self.id,
            shard_id: self.shard_id,
            address: self.address.clone(),
            height: chain.current_height(),
            pending: chain.pool().pending_count(),
            relay: chain.pool().relay_count(),
        }
    }

    /// Run `f` against the chain while holding the node lock.
    pub fn with_chain<T>(&self, f: impl FnOnce(&LedgerChain) -> T) -> T {
        f(&self.chain.lock())
    }
}

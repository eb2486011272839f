//! # Ledger Chain
//!
//! Append-only block sequence owning the node's transaction pool.
//!
//! Mining is split in two steps so a candidate can be inspected before it is
//! accepted:
//!
//! ```text
//! generate_block()  ──drain pending──▶  Block { number: height + 1 }
//! commit(block)     ──number check───▶  appended | rejected (chain unchanged)
//! ```

use super::entities::{Block, Transaction};
use super::errors::ShardId;
use super::pool::TransactionPool;
use tracing::{debug, warn};

/// Per-node chain. Always holds at least the genesis block.
#[derive(Debug, Clone)]
pub struct LedgerChain {
    blocks: Vec<Block>,
    pool: TransactionPool,
}

impl LedgerChain {
    /// Genesis-only chain with an empty pool classifying against `owner_shard`.
    pub fn new(owner_shard: ShardId) -> Self {
        Self {
            blocks: vec![Block::genesis()],
            pool: TransactionPool::new(owner_shard),
        }
    }

    /// Blocks appended beyond genesis.
    pub fn current_height(&self) -> u64 {
        (self.blocks.len() - 1) as u64
    }

    /// Builds the next candidate from every pending transaction.
    ///
    /// The pending queue is drained whether or not the candidate is later
    /// committed.
    pub fn generate_block(&mut self) -> Block {
        let number = self.current_height() + 1;
        let transactions = self.pool.drain_pending();
        debug!(number, tx_count = transactions.len(), "generated block candidate");
        Block::new(number, transactions)
    }

    /// Appends `block` iff it extends the tip. Returns whether it was accepted.
    pub fn commit(&mut self, block: Block) -> bool {
        let expected = self.current_height() + 1;
        if block.number() != expected {
            warn!(expected, got = block.number(), "rejected block candidate");
            return false;
        }
        self.blocks.push(block);
        true
    }

    /// Delegates to the pool.
    pub fn ingest<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        self.pool.ingest(batch);
    }

    /// Read access to the pool.
    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }

    /// Mutable access to the pool (used to requeue after a rejection).
    pub fn pool_mut(&mut self) -> &mut TransactionPool {
        &mut self.pool
    }

    /// Tip of the chain (genesis on a fresh chain).
    pub fn latest_block(&self) -> &Block {
        // `blocks` is never empty
        &self.blocks[self.blocks.len() - 1]
    }

    /// Block at `number`, if committed.
    pub fn block(&self, number: u64) -> Option<&Block> {
        usize::try_from(number).ok().and_then(|i| self.blocks.get(i))
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

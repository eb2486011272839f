//! # Domain Invariants
//!
//! Structural rules that must always hold for pools, chains and topology.

use super::entities::Block;
use super::errors::{LedgerError, NodeId, ShardId};
use super::pool::TransactionPool;
use std::collections::HashSet;

/// Invariant: every pooled transaction sits in the queue its destination
/// dictates.
///
/// Pending holds only transactions for the owner's shard; relay holds only
/// transactions for other shards.
pub fn invariant_pool_partition(pool: &TransactionPool) -> Result<(), LedgerError> {
    let owner = pool.owner_shard();

    if let Some(tx) = pool.pending().iter().find(|tx| tx.to_shard() != owner) {
        return Err(LedgerError::StateInconsistency(format!(
            "pending transaction for shard {} in pool of shard {}",
            tx.to_shard(),
            owner
        )));
    }

    if pool.relay().iter().any(|tx| tx.to_shard() == owner) {
        return Err(LedgerError::StateInconsistency(format!(
            "local transaction queued for relay in pool of shard {}",
            owner
        )));
    }

    Ok(())
}

/// Invariant: block numbers run 0, 1, 2, ... with no gaps, genesis first.
pub fn invariant_block_sequence(blocks: &[Block]) -> Result<(), LedgerError> {
    if blocks.is_empty() {
        return Err(LedgerError::StateInconsistency(
            "chain has no genesis block".to_string(),
        ));
    }

    for (index, block) in blocks.iter().enumerate() {
        if block.number() != index as u64 {
            return Err(LedgerError::StateInconsistency(format!(
                "block at position {} carries number {}",
                index,
                block.number()
            )));
        }
    }

    Ok(())
}

/// Invariant: each node is listed once, under the shard it belongs to.
///
/// Entries are `(listed_under, node_id, node_shard)`.
pub fn invariant_single_membership(
    entries: &[(ShardId, NodeId, ShardId)],
) -> Result<(), LedgerError> {
    let mut seen = HashSet::new();

    for &(listed_under, node_id, node_shard) in entries {
        if listed_under != node_shard {
            return Err(LedgerError::StateInconsistency(format!(
                "node {} of shard {} listed under shard {}",
                node_id, node_shard, listed_under
            )));
        }
        if !seen.insert(node_id) {
            return Err(LedgerError::DuplicateNode(node_id));
        }
    }

    Ok(())
}

//! # Destination Routing
//!
//! Picks destination shards for generated traffic and groups outbound
//! transactions by the shard they must be delivered to.

use crate::domain::{ShardId, Transaction};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Choose a destination shard for a transaction originating on `own`.
///
/// Stays on `own` with probability `local_ratio`; otherwise draws uniformly
/// from `shards` without `own`. Falls back to `own` when no other shard
/// exists.
pub fn choose_destination<R: Rng + ?Sized>(
    own: ShardId,
    shards: &[ShardId],
    local_ratio: f64,
    rng: &mut R,
) -> ShardId {
    if rng.gen::<f64>() < local_ratio {
        return own;
    }

    let foreign: Vec<ShardId> = shards.iter().copied().filter(|s| *s != own).collect();
    foreign.choose(rng).copied().unwrap_or(own)
}

/// Group the cross-shard transactions of `batch` by destination, in
/// ascending shard order. Local transactions are skipped.
pub fn group_cross_shard(batch: &[Transaction]) -> BTreeMap<ShardId, Vec<&Transaction>> {
    let mut groups: BTreeMap<ShardId, Vec<&Transaction>> = BTreeMap::new();
    for tx in batch.iter().filter(|tx| tx.is_cross_shard()) {
        groups.entry(tx.to_shard()).or_default().push(tx);
    }
    groups
}

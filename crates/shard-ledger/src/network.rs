//! # Shard Network
//!
//! Topology of shards and their member nodes, and the logical fan-out used
//! to move cross-shard transactions to their destination.
//!
//! ```text
//! node.sample ──▶ node.ingest ──▶ relay queue
//!                      │
//!                      └─ cross-shard tx ──deliver(to_shard)──▶ every member
//!                                                             ingests as pending
//! ```
//!
//! Shards are kept in a `BTreeMap`, so every traversal (lookup, status,
//! snapshot) runs in ascending shard order and within a shard in insertion
//! order.

use crate::algorithms::group_cross_shard;
use crate::domain::{
    invariant_block_sequence, invariant_pool_partition, invariant_single_membership, Block,
    DeliveryReport, LedgerConfig, LedgerError, NodeId, NodeStatus, ShardId, TopologySnapshot,
    Transaction,
};
use crate::metrics::{MetricsSnapshot, NetworkMetrics};
use crate::node::ShardNode;
use crate::ports::TopologyStore;
use rand::Rng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::iter;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Address assigned to generated nodes: `192.168.1.<id>`.
pub fn default_address(id: NodeId) -> String {
    format!("192.168.1.{}", id)
}

/// Shard identifier → member nodes.
///
/// The network holds shared handles; whoever builds the nodes may keep its
/// own `Arc` and drive them directly.
#[derive(Debug, Default)]
pub struct ShardNetwork {
    shards: BTreeMap<ShardId, Vec<Arc<ShardNode>>>,
    metrics: NetworkMetrics,
}

impl ShardNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `shard_count` shards of `nodes_per_shard` nodes each.
    ///
    /// Node ids run from 1, filling shard 0 first.
    pub fn with_topology(shard_count: u64, nodes_per_shard: u64) -> Self {
        Self::with_topology_config(shard_count, nodes_per_shard, &LedgerConfig::default())
    }

    /// As [`with_topology`](Self::with_topology), with explicit node settings.
    pub fn with_topology_config(
        shard_count: u64,
        nodes_per_shard: u64,
        config: &LedgerConfig,
    ) -> Self {
        let mut network = Self::new();
        let mut next_id: NodeId = 1;

        for shard_id in 0..shard_count {
            let members = (0..nodes_per_shard)
                .map(|_| {
                    let id = next_id;
                    next_id += 1;
                    Arc::new(ShardNode::with_config(
                        id,
                        shard_id,
                        default_address(id),
                        config.clone(),
                    ))
                })
                .collect::<Vec<_>>();
            if !members.is_empty() {
                network.shards.insert(shard_id, members);
            }
        }

        info!(
            shards = network.shards.len(),
            nodes = network.node_count(),
            "network topology built"
        );
        network
    }

    /// Register `node` under its shard. Rejects a second node with the same id.
    pub fn add_node(&mut self, node: Arc<ShardNode>) -> Result<(), LedgerError> {
        if self.contains(node.id()) {
            warn!(node_id = node.id(), "node already registered");
            return Err(LedgerError::DuplicateNode(node.id()));
        }

        info!(node_id = node.id(), shard_id = node.shard_id(), "added node");
        self.shards.entry(node.shard_id()).or_default().push(node);
        Ok(())
    }

    /// True if a node with `id` is registered.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes().any(|node| node.id() == id)
    }

    /// Known shard identifiers, ascending.
    pub fn shards(&self) -> Vec<ShardId> {
        self.shards.keys().copied().collect()
    }

    /// Members of `shard_id`; empty if the shard is unknown.
    pub fn nodes_of(&self, shard_id: ShardId) -> Vec<Arc<ShardNode>> {
        self.members(shard_id).to_vec()
    }

    fn members(&self, shard_id: ShardId) -> &[Arc<ShardNode>] {
        self.shards.get(&shard_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node, ascending by shard.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<ShardNode>> {
        self.shards.values().flatten()
    }

    /// Total registered nodes.
    pub fn node_count(&self) -> usize {
        self.shards.values().map(Vec::len).sum()
    }

    /// True if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Look a node up by identifier.
    pub fn find_node(&self, id: NodeId) -> Option<Arc<ShardNode>> {
        self.nodes().find(|node| node.id() == id).cloned()
    }

    /// Like [`find_node`](Self::find_node), with `NodeNotFound` on a miss.
    pub fn node(&self, id: NodeId) -> Result<Arc<ShardNode>, LedgerError> {
        self.find_node(id).ok_or(LedgerError::NodeNotFound(id))
    }

    /// Fan `tx` out to every member of `to_shard`.
    ///
    /// An empty or unknown shard is reported, not failed.
    pub fn deliver(&self, tx: &Transaction, to_shard: ShardId) -> DeliveryReport {
        let members = self.members(to_shard);
        for node in members {
            node.ingest(iter::once(tx.clone()));
        }
        self.report_delivery(to_shard, members.len())
    }

    /// [`deliver`](Self::deliver) with the per-node ingests run concurrently.
    pub fn deliver_parallel(&self, tx: &Transaction, to_shard: ShardId) -> DeliveryReport {
        let members = self.members(to_shard);
        members
            .par_iter()
            .for_each(|node| node.ingest(iter::once(tx.clone())));
        self.report_delivery(to_shard, members.len())
    }

    fn report_delivery(&self, shard_id: ShardId, recipients: usize) -> DeliveryReport {
        self.metrics.record_delivery(recipients);
        if recipients == 0 {
            warn!(shard_id, "no nodes found in shard, delivery skipped");
        } else {
            debug!(shard_id, recipients, "delivered transaction to shard");
        }
        DeliveryReport {
            shard_id,
            recipients,
        }
    }

    /// Deliver every cross-shard transaction of `batch` to its destination.
    ///
    /// Returns the number of node-level deliveries. Origin relay queues are
    /// left as they are.
    pub fn relay_cross_shard(&self, batch: &[Transaction]) -> usize {
        group_cross_shard(batch)
            .into_iter()
            .map(|(shard_id, txs)| {
                txs.into_iter()
                    .map(|tx| self.deliver(tx, shard_id).recipients)
                    .sum::<usize>()
            })
            .sum()
    }

    /// Generate `count` transactions for node `id`, using this network's
    /// shard set for destinations. The batch is returned, not ingested.
    pub fn sample_for<R: Rng + ?Sized>(
        &self,
        id: NodeId,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let node = self.node(id)?;
        let batch = node.sample_transactions(count, &self.shards(), rng);
        self.metrics.record_sampled(batch.len());
        Ok(batch)
    }

    /// Mine node `id`, recording the outcome.
    pub fn mine(&self, id: NodeId) -> Result<Block, LedgerError> {
        let result = self.node(id)?.mine();
        self.metrics.record_mine(result.is_ok());
        result
    }

    /// Status of every node, ascending by shard.
    pub fn status(&self) -> Vec<NodeStatus> {
        self.nodes().map(|node| node.status()).collect()
    }

    /// Network-wide counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Check topology membership and every node's pool and chain.
    pub fn verify(&self) -> Result<(), LedgerError> {
        let entries: Vec<(ShardId, NodeId, ShardId)> = self
            .shards
            .iter()
            .flat_map(|(shard_id, nodes)| {
                nodes
                    .iter()
                    .map(move |node| (*shard_id, node.id(), node.shard_id()))
            })
            .collect();
        invariant_single_membership(&entries)?;

        for node in self.nodes() {
            node.with_chain(|chain| {
                invariant_pool_partition(chain.pool())?;
                invariant_block_sequence(chain.blocks())
            })?;
        }
        Ok(())
    }

    // =========================================================================
    // Topology persistence
    // =========================================================================

    /// Identity and membership of every node, in traversal order.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            nodes: self.nodes().map(|node| node.descriptor()).collect(),
        }
    }

    /// Rebuild a network from a snapshot. Chains and pools start empty.
    pub fn from_snapshot(
        snapshot: &TopologySnapshot,
        config: &LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let mut network = Self::new();
        for desc in &snapshot.nodes {
            network.add_node(Arc::new(ShardNode::with_config(
                desc.id,
                desc.shard_id,
                desc.address.clone(),
                config.clone(),
            )))?;
        }
        Ok(network)
    }

    /// Load the topology from `store`.
    ///
    /// A missing, unreadable or inconsistent snapshot yields an empty network
    /// with a warning instead of an error.
    pub fn restore(store: &dyn TopologyStore, config: &LedgerConfig) -> Self {
        Self::restore_existing(store, config).unwrap_or_default()
    }

    /// Like [`restore`](Self::restore), but `None` when there is no usable
    /// snapshot, so callers can tell "never initialized" from "initialized
    /// with no nodes".
    pub fn restore_existing(store: &dyn TopologyStore, config: &LedgerConfig) -> Option<Self> {
        let snapshot = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to load topology snapshot, starting empty");
                return None;
            }
        };

        match Self::from_snapshot(&snapshot, config) {
            Ok(network) => {
                info!(
                    shards = network.shards.len(),
                    nodes = network.node_count(),
                    "topology restored"
                );
                Some(network)
            }
            Err(err) => {
                warn!(error = %err, "topology snapshot rejected, starting empty");
                None
            }
        }
    }

    /// Save the current topology to `store`.
    pub fn persist(&self, store: &dyn TopologyStore) -> Result<(), LedgerError> {
        store.save(&self.snapshot())
    }
}

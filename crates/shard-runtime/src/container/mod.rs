//! # Simulator Container
//!
//! Holds the restored network, the topology store and the RNG, and exposes
//! one method per command. Methods return data; printing lives in
//! [`crate::report`].

pub mod config;

pub use config::{ConfigError, RuntimeConfig, DEFAULT_PREVIEW_LIMIT};

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use shard_ledger::{
    Block, LedgerError, MetricsSnapshot, NodeId, NodeStatus, ShardNetwork, TopologyStore,
    Transaction,
};
use tracing::info;

/// Result of `generate`.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Node the batch was generated for.
    pub node_id: NodeId,
    /// The batch, in generation order.
    pub transactions: Vec<Transaction>,
    /// Node-level deliveries made while relaying the cross-shard part.
    pub deliveries: usize,
}

/// Result of `run`.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    /// Wall-clock time of the whole run.
    pub duration: Duration,
    /// Shard count.
    pub shards: u64,
    /// Nodes per shard.
    pub nodes_per_shard: u64,
    /// Total nodes.
    pub total_nodes: usize,
    /// Transactions generated per node.
    pub tx_per_node: usize,
    /// Transactions generated overall.
    pub total_transactions: usize,
    /// Cross-shard transactions seen in each node's queues right after its
    /// own generation step (approximate: earlier deliveries are included).
    pub cross_shard_transactions: usize,
    /// Blocks committed.
    pub blocks_mined: usize,
    /// Per-node mining outcome, in node order.
    pub mined: Vec<(NodeId, Result<Block, LedgerError>)>,
    /// Network counters at the end of the run.
    pub metrics: MetricsSnapshot,
}

/// Simulator state for one process invocation.
pub struct Simulator {
    config: RuntimeConfig,
    store: Box<dyn TopologyStore>,
    network: ShardNetwork,
    /// False until a snapshot was restored or `init`/`start` ran.
    initialized: bool,
    rng: StdRng,
}

impl Simulator {
    /// Restore the topology from `store` and seed the RNG.
    pub fn load(config: RuntimeConfig, store: Box<dyn TopologyStore>) -> Self {
        let restored = ShardNetwork::restore_existing(store.as_ref(), &config.ledger);
        let initialized = restored.is_some();
        let network = restored.unwrap_or_default();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            store,
            network,
            initialized,
            rng,
        }
    }

    /// Runtime settings.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Current network.
    pub fn network(&self) -> &ShardNetwork {
        &self.network
    }

    /// True once a network exists, even one without nodes.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Save the current topology.
    pub fn save(&self) -> Result<(), LedgerError> {
        self.network.persist(self.store.as_ref())
    }

    /// Replace the network with an empty one.
    pub fn init(&mut self) {
        self.network = ShardNetwork::new();
        self.initialized = true;
        info!("blockchain network initialized");
    }

    /// Replace the network with `shards` × `nodes_per_shard` fresh nodes.
    pub fn start(&mut self, shards: u64, nodes_per_shard: u64) {
        self.network =
            ShardNetwork::with_topology_config(shards, nodes_per_shard, &self.config.ledger);
        self.initialized = true;
        shard_telemetry::log_event!(
            info,
            "runtime",
            "network started",
            shards = shards,
            nodes_per_shard = nodes_per_shard
        );
    }

    /// Generate `count` transactions for `node_id`, ingest them there and
    /// relay the cross-shard ones.
    pub fn generate(
        &mut self,
        node_id: NodeId,
        count: usize,
    ) -> Result<GenerateOutcome, LedgerError> {
        let transactions = self.network.sample_for(node_id, count, &mut self.rng)?;
        self.network.node(node_id)?.ingest(transactions.iter().cloned());
        let deliveries = self.network.relay_cross_shard(&transactions);

        Ok(GenerateOutcome {
            node_id,
            transactions,
            deliveries,
        })
    }

    /// Mine a block on `node_id`.
    pub fn mine(&self, node_id: NodeId) -> Result<Block, LedgerError> {
        self.network.mine(node_id)
    }

    /// Per-node status, ascending by shard.
    pub fn status(&self) -> Vec<NodeStatus> {
        self.network.status()
    }

    /// Full simulation: build and save the topology, generate `tx_per_node`
    /// transactions on every node (relaying cross-shard ones), then mine
    /// every node.
    pub fn run(
        &mut self,
        shards: u64,
        nodes_per_shard: u64,
        tx_per_node: usize,
    ) -> Result<SimulationSummary, LedgerError> {
        let started = Instant::now();

        self.start(shards, nodes_per_shard);
        self.save()?;

        let ids: Vec<NodeId> = self.network.nodes().map(|node| node.id()).collect();

        let mut total_transactions = 0;
        let mut cross_shard_transactions = 0;
        for &id in &ids {
            let outcome = self.generate(id, tx_per_node)?;
            total_transactions += outcome.transactions.len();
            cross_shard_transactions += self.network.node(id)?.with_chain(|chain| {
                let pool = chain.pool();
                pool.pending()
                    .iter()
                    .chain(pool.relay())
                    .filter(|tx| tx.is_cross_shard())
                    .count()
            });
        }

        // Nodes share no state, so they can mine concurrently
        let network = &self.network;
        let mined: Vec<(NodeId, Result<Block, LedgerError>)> = ids
            .par_iter()
            .map(|&id| (id, network.mine(id)))
            .collect();
        let blocks_mined = mined.iter().filter(|(_, result)| result.is_ok()).count();

        Ok(SimulationSummary {
            duration: started.elapsed(),
            shards,
            nodes_per_shard,
            total_nodes: ids.len(),
            tx_per_node,
            total_transactions,
            cross_shard_transactions,
            blocks_mined,
            mined,
            metrics: self.network.metrics(),
        })
    }
}

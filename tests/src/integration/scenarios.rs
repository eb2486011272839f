//! # End-to-End Scenarios
//!
//! Walkthroughs of the command sequence a user runs against the simulator:
//! build a topology, generate traffic on one node, relay it, mine.

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shard_ledger::{
        Block, InMemoryTopologyStore, LedgerConfig, LedgerError, NodeId, RejectionPolicy,
        ShardNetwork, ShardNode, Transaction,
    };
    use shard_runtime::{RuntimeConfig, Simulator};
    use std::sync::Arc;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn local_tx(shard: u64, nonce: u64) -> Transaction {
        Transaction::new("account-1", "account-2", BigUint::from(10u32), nonce, shard, shard)
    }

    fn ids(network: &ShardNetwork, shard: u64) -> Vec<NodeId> {
        network.nodes_of(shard).iter().map(|n| n.id()).collect()
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[test]
    fn test_two_by_two_topology() {
        let network = ShardNetwork::with_topology(2, 2);

        assert_eq!(network.shards(), vec![0, 1]);
        assert_eq!(ids(&network, 0), vec![1, 2]);
        assert_eq!(ids(&network, 1), vec![3, 4]);
        assert!(network.status().iter().all(|s| s.height == 0));
    }

    #[test]
    fn test_generate_partitions_before_relay() {
        let network = ShardNetwork::with_topology(2, 2);
        let mut rng = StdRng::seed_from_u64(11);

        let batch = network.sample_for(1, 10, &mut rng).unwrap();
        let node = network.node(1).unwrap();
        node.ingest(batch.clone());

        assert_eq!(node.pending_count() + node.relay_count(), 10);
        let cross = batch.iter().filter(|tx| tx.is_cross_shard()).count();
        assert_eq!(node.relay_count(), cross);

        network.relay_cross_shard(&batch);
        for peer in network.nodes_of(1) {
            assert_eq!(peer.pending_count(), cross);
        }
        assert_eq!(network.node(2).unwrap().pending_count(), 0);
    }

    #[test]
    fn test_mine_six_then_empty() {
        let network = ShardNetwork::with_topology(2, 2);
        let node = network.node(1).unwrap();
        let batch: Vec<Transaction> = (0..6).map(|n| local_tx(0, n)).collect();
        node.ingest(batch.clone());
        assert_eq!(node.pending_count(), 6);

        let first = network.mine(1).unwrap();
        assert_eq!(first.number(), 1);
        assert_eq!(first.transactions(), batch.as_slice());
        assert_eq!(node.height(), 1);
        assert_eq!(node.pending_count(), 0);

        let second = network.mine(1).unwrap();
        assert_eq!(second.number(), 2);
        assert!(second.is_empty());
        assert_eq!(node.height(), 2);
    }

    #[test]
    fn test_deliver_to_both_members() {
        let network = ShardNetwork::with_topology(2, 2);
        let tx = Transaction::new("account-5", "account-6", BigUint::from(1u8), 0, 0, 1);

        let report = network.deliver(&tx, 1);
        assert_eq!(report.recipients, 2);
        assert!(network.nodes_of(1).iter().all(|n| n.pending_count() == 1));
    }

    #[test]
    fn test_deliver_to_missing_shard() {
        let network = ShardNetwork::with_topology(2, 1);
        let tx = Transaction::new("account-5", "account-6", BigUint::from(1u8), 0, 0, 7);

        assert!(network.deliver(&tx, 7).is_empty());
        assert_eq!(network.metrics().empty_shard_deliveries, 1);
    }

    #[test]
    fn test_rejected_commit_requeues() {
        let config = LedgerConfig {
            rejection_policy: RejectionPolicy::Requeue,
            ..LedgerConfig::default()
        };
        let node = ShardNode::with_config(1, 0, "10.0.0.1", config);
        node.ingest((0..3).map(|n| local_tx(0, n)));

        let err = node
            .mine_with(|block| Block::new(block.number() + 5, block.into_transactions()))
            .unwrap_err();

        assert_eq!(err, LedgerError::BlockRejected { expected: 1, got: 6 });
        assert_eq!(node.height(), 0);
        assert_eq!(node.pending_count(), 3);
    }

    #[test]
    fn test_manual_topology_matches_generated() {
        let mut network = ShardNetwork::new();
        for (id, shard) in [(1, 0), (2, 0), (3, 1), (4, 1)] {
            network
                .add_node(Arc::new(ShardNode::new(id, shard, format!("192.168.1.{}", id))))
                .unwrap();
        }
        assert_eq!(network.snapshot(), ShardNetwork::with_topology(2, 2).snapshot());
    }

    #[test]
    fn test_seeded_simulations_agree() {
        let simulate = || {
            let config = RuntimeConfig {
                seed: Some(2024),
                ..Default::default()
            };
            let mut sim = Simulator::load(config, Box::new(InMemoryTopologyStore::new()));
            sim.start(3, 2);
            sim.generate(4, 25).unwrap().transactions
        };

        assert_eq!(simulate(), simulate());
    }

    #[test]
    fn test_full_run_is_consistent() {
        let mut sim = Simulator::load(
            RuntimeConfig {
                seed: Some(5),
                ..Default::default()
            },
            Box::new(InMemoryTopologyStore::new()),
        );

        let summary = sim.run(3, 2, 20).unwrap();
        assert_eq!(summary.total_nodes, 6);
        assert_eq!(summary.total_transactions, 120);
        assert_eq!(summary.blocks_mined, 6);
        assert_eq!(summary.metrics.transactions_sampled, 120);
        assert!(sim.network().verify().is_ok());
        assert!(sim.status().iter().all(|s| s.height == 1));
    }
}

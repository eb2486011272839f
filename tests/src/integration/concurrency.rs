//! # Concurrent Access
//!
//! Nodes are shared as `Arc<ShardNode>`; these tests drive ingest, relay and
//! mining from several threads and check that no transaction is lost or
//! duplicated.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use num_bigint::BigUint;
    use rayon::prelude::*;
    use shard_ledger::{ShardNetwork, ShardNode, Transaction};

    fn local_batch(shard: u64, start: u64, len: u64) -> Vec<Transaction> {
        (start..start + len)
            .map(|n| Transaction::new("account-1", "account-2", BigUint::from(1u8), n, shard, shard))
            .collect()
    }

    fn mined_total(node: &ShardNode) -> usize {
        node.with_chain(|chain| chain.blocks().iter().map(|b| b.len()).sum())
    }

    #[test]
    fn test_ingest_and_mine_conserve_transactions() {
        let node = Arc::new(ShardNode::new(1, 0, "10.0.0.1"));

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let node = Arc::clone(&node);
                thread::spawn(move || {
                    for round in 0..50 {
                        node.ingest(local_batch(0, (w * 1000 + round * 10) as u64, 10));
                    }
                })
            })
            .collect();

        let miner = {
            let node = Arc::clone(&node);
            thread::spawn(move || {
                for _ in 0..100 {
                    node.mine().unwrap();
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        miner.join().unwrap();

        assert_eq!(node.height(), 100);
        assert_eq!(mined_total(&node) + node.pending_count(), 4 * 50 * 10);
        assert!(node.with_chain(|chain| {
            shard_ledger::invariant_block_sequence(chain.blocks()).is_ok()
        }));
    }

    #[test]
    fn test_parallel_delivery_from_every_shard() {
        let network = ShardNetwork::with_topology(4, 3);

        (0..4u64).into_par_iter().for_each(|origin| {
            for to in 0..4u64 {
                if to != origin {
                    let tx = Transaction::new("a", "b", BigUint::from(2u8), origin, origin, to);
                    network.deliver_parallel(&tx, to);
                }
            }
        });

        assert!(network.nodes().all(|node| node.pending_count() == 3));
        assert_eq!(network.metrics().cross_shard_deliveries, 4 * 3 * 3);
        assert!(network.verify().is_ok());
    }

    #[test]
    fn test_parallel_mining_across_nodes() {
        let network = ShardNetwork::with_topology(2, 4);
        for node in network.nodes() {
            node.ingest(local_batch(node.shard_id(), 0, 5));
        }

        let heights: Vec<u64> = network
            .nodes()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|node| node.mine().map(|b| b.number()).unwrap_or(0))
            .collect();

        assert_eq!(heights, vec![1; 8]);
        assert!(network.nodes().all(|n| n.pending_count() == 0));
    }
}

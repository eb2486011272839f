//! # Shard-Sim Ledger Benchmarks
//!
//! | Operation | Scales with |
//! |-----------|-------------|
//! | Sample generation | batch size |
//! | Cross-shard delivery | members per shard |
//! | Mining | pending queue length |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shard_ledger::{ShardNetwork, ShardNode, Transaction};

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let network = ShardNetwork::with_topology(8, 1);

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sample_for", size), &size, |b, &size| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(network.sample_for(1, size, &mut rng)))
        });
    }

    group.finish();
}

fn bench_delivery(c: &mut Criterion) {
    let mut group = c.benchmark_group("delivery");
    let tx = Transaction::new("account-1", "account-2", BigUint::from(5u8), 0, 0, 1);

    for members in [4u64, 32, 128] {
        let network = ShardNetwork::with_topology(2, members);
        group.throughput(Throughput::Elements(members));
        group.bench_with_input(BenchmarkId::new("sequential", members), &members, |b, _| {
            b.iter(|| black_box(network.deliver(&tx, 1)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", members), &members, |b, _| {
            b.iter(|| black_box(network.deliver_parallel(&tx, 1)))
        });
    }

    group.finish();
}

fn bench_mining(c: &mut Criterion) {
    let mut group = c.benchmark_group("mining");

    for pending in [0u64, 100, 1_000] {
        let batch: Vec<Transaction> = (0..pending)
            .map(|n| Transaction::new("account-1", "account-2", BigUint::from(1u8), n, 0, 0))
            .collect();

        group.bench_with_input(BenchmarkId::new("mine", pending), &batch, |b, batch| {
            b.iter_batched(
                || {
                    let node = ShardNode::new(1, 0, "10.0.0.1");
                    node.ingest(batch.clone());
                    node
                },
                |node| black_box(node.mine()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sampling, bench_delivery, bench_mining);
criterion_main!(benches);

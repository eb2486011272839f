//! Console reporting.
//!
//! Every writer takes `impl Write` so output can be captured in tests; the
//! binary passes a locked stdout.

use std::io::{self, Write};

use shard_ledger::{Block, LedgerError, NodeId, NodeStatus, ShardNetwork, Transaction};

use crate::container::{GenerateOutcome, SimulationSummary};

/// Shards and their member node ids, ascending by shard.
pub fn write_network_info<W: Write>(out: &mut W, network: &ShardNetwork) -> io::Result<()> {
    writeln!(out, "=== Shard Network ===")?;
    for shard_id in network.shards() {
        let members = network.nodes_of(shard_id);
        writeln!(out, "Shard {}: {} nodes", shard_id, members.len())?;
        for node in members {
            writeln!(out, "  Node {} ({})", node.id(), node.address())?;
        }
    }
    writeln!(out, "=====================")
}

/// One transaction on a single line.
pub fn write_transaction<W: Write>(out: &mut W, index: usize, tx: &Transaction) -> io::Result<()> {
    writeln!(
        out,
        "Transaction {}: {} -> {}, Amount: {}, Shard: {} -> {}",
        index,
        tx.sender(),
        tx.recipient(),
        tx.amount(),
        tx.from_shard(),
        tx.to_shard()
    )
}

/// Generation result with the first `limit` transactions.
pub fn write_generated<W: Write>(
    out: &mut W,
    outcome: &GenerateOutcome,
    limit: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "Generated {} transactions for node {}",
        outcome.transactions.len(),
        outcome.node_id
    )?;
    for (index, tx) in outcome.transactions.iter().take(limit).enumerate() {
        write_transaction(out, index, tx)?;
    }
    if outcome.deliveries > 0 {
        writeln!(out, "Relayed to {} remote nodes", outcome.deliveries)?;
    }
    Ok(())
}

/// Outcome of mining `node_id`.
pub fn write_mined<W: Write>(
    out: &mut W,
    node_id: NodeId,
    result: &Result<Block, LedgerError>,
) -> io::Result<()> {
    match result {
        Ok(block) => writeln!(
            out,
            "Block #{} mined successfully on node {} ({} transactions)",
            block.number(),
            node_id,
            block.len()
        ),
        Err(err) => writeln!(out, "Failed to mine block on node {}: {}", node_id, err),
    }
}

/// Per-node height and queue sizes, grouped by shard.
pub fn write_status<W: Write>(out: &mut W, status: &[NodeStatus]) -> io::Result<()> {
    writeln!(out, "=== Node Status ===")?;
    let mut current_shard = None;
    for node in status {
        if current_shard != Some(node.shard_id) {
            writeln!(out, "Shard {}:", node.shard_id)?;
            current_shard = Some(node.shard_id);
        }
        writeln!(out, "  Node {}:", node.id)?;
        writeln!(out, "    Blockchain height: {}", node.height)?;
        writeln!(out, "    Pending transactions: {}", node.pending)?;
        writeln!(out, "    Relay transactions: {}", node.relay)?;
    }
    Ok(())
}

/// Totals of a full simulation run.
pub fn write_summary<W: Write>(out: &mut W, summary: &SimulationSummary) -> io::Result<()> {
    writeln!(out, "=== Simulation Summary ===")?;
    writeln!(out, "Simulation duration: {:?}", summary.duration)?;
    writeln!(out, "Shards: {}", summary.shards)?;
    writeln!(out, "Nodes per shard: {}", summary.nodes_per_shard)?;
    writeln!(out, "Total nodes: {}", summary.total_nodes)?;
    writeln!(out, "Transactions per node: {}", summary.tx_per_node)?;
    writeln!(out, "Total transactions generated: {}", summary.total_transactions)?;
    writeln!(
        out,
        "Approximate cross-shard transactions: {}",
        summary.cross_shard_transactions
    )?;
    writeln!(out, "Blocks mined: {}", summary.blocks_mined)?;

    let metrics = &summary.metrics;
    writeln!(out, "Cross-shard deliveries: {}", metrics.cross_shard_deliveries)?;
    writeln!(out, "Deliveries to empty shards: {}", metrics.empty_shard_deliveries)?;
    writeln!(out, "Rejected commits: {}", metrics.commits_rejected)?;
    writeln!(out, "==========================")
}

//! # Shard-Sim
//!
//! Command-line driver for the sharded ledger simulator.
//!
//! Every invocation restores the topology snapshot, runs one command against
//! the in-process network and, for commands that change the topology, saves
//! the snapshot again. Ledger state (chains and queues) lives only for the
//! duration of the process.
//!
//! ```text
//! shard-sim start 2 2        # 2 shards × 2 nodes, saved to network_state.json
//! shard-sim generate 1 10    # 10 transactions on node 1, cross-shard ones relayed
//! shard-sim mine 1
//! shard-sim run 2 2 10       # all of the above for every node in one process
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use shard_ledger::{JsonFileTopologyStore, NodeId};
use shard_runtime::report;
use shard_runtime::{RuntimeConfig, Simulator};
use shard_telemetry::{init_logging, TelemetryConfig};

/// Sharded ledger simulator
#[derive(Parser, Debug)]
#[command(name = "shard-sim")]
#[command(version, about = "Simulates a sharded ledger with cross-shard relaying")]
struct Args {
    /// Topology snapshot file (overrides SHARD_STATE_FILE)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// RNG seed for reproducible transactions (overrides SHARD_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize an empty network
    Init,

    /// Start a network with the given shards and nodes per shard
    Start {
        /// Number of shards
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        shards: u64,
        /// Nodes in each shard
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        nodes: u64,
    },

    /// Generate sample transactions for a node
    Generate {
        /// Target node
        node_id: NodeId,
        /// Number of transactions
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,
    },

    /// Mine a block on a node
    Mine {
        /// Target node
        node_id: NodeId,
    },

    /// Show network status
    Status,

    /// Run a complete simulation
    Run {
        /// Number of shards
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        shards: u64,
        /// Nodes in each shard
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        nodes: u64,
        /// Transactions generated per node
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        tx_count: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if args.verbose {
        telemetry = telemetry.with_level("debug");
    }
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let mut config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;
    if let Some(path) = args.state_file {
        config.state_file = path;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    info!(
        state_file = %config.state_file.display(),
        seed = ?config.seed,
        "shard-sim starting"
    );

    let store = JsonFileTopologyStore::new(config.state_file.clone());
    let mut simulator = Simulator::load(config, Box::new(store));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&mut simulator, args.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute<W: Write>(simulator: &mut Simulator, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Init => {
            writeln!(out, "Initializing network...")?;
            simulator.init();
            simulator.save().context("Failed to save topology")?;
            writeln!(out, "Network initialized")?;
        }

        Command::Start { shards, nodes } => {
            writeln!(
                out,
                "Starting network with {} shards and {} nodes per shard",
                shards, nodes
            )?;
            simulator.start(shards, nodes);
            report::write_network_info(out, simulator.network())?;
            simulator.save().context("Failed to save topology")?;
        }

        Command::Generate { node_id, count } => {
            let count = usize::try_from(count).context("Transaction count too large")?;
            writeln!(out, "Generating {} transactions for node {}", count, node_id)?;
            if !simulator.is_initialized() {
                writeln!(out, "Network not initialized. Run 'start' first.")?;
                return Ok(());
            }
            match simulator.generate(node_id, count) {
                Ok(outcome) => {
                    let limit = simulator.config().preview_limit;
                    report::write_generated(out, &outcome, limit)?;
                }
                Err(err) => writeln!(out, "{}", err)?,
            }
        }

        Command::Mine { node_id } => {
            writeln!(out, "Mining block on node {}", node_id)?;
            if !simulator.is_initialized() {
                writeln!(out, "Network not initialized. Run 'start' first.")?;
                return Ok(());
            }
            let result = simulator.mine(node_id);
            report::write_mined(out, node_id, &result)?;
        }

        Command::Status => {
            writeln!(out, "Network status:")?;
            if !simulator.is_initialized() {
                writeln!(out, "Network not initialized.")?;
                return Ok(());
            }
            report::write_network_info(out, simulator.network())?;
            report::write_status(out, &simulator.status())?;
        }

        Command::Run {
            shards,
            nodes,
            tx_count,
        } => {
            let tx_count = usize::try_from(tx_count).context("Transaction count too large")?;
            writeln!(
                out,
                "Running simulation with {} shards, {} nodes per shard, {} transactions per node",
                shards, nodes, tx_count
            )?;

            let summary = simulator
                .run(shards, nodes, tx_count)
                .context("Simulation failed")?;

            report::write_network_info(out, simulator.network())?;
            for (node_id, result) in &summary.mined {
                report::write_mined(out, *node_id, result)?;
            }
            report::write_status(out, &simulator.status())?;
            report::write_summary(out, &summary)?;
        }
    }

    Ok(())
}

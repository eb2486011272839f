//! # Shard Runtime Library
//!
//! Command layer of the `shard-sim` binary, exposed as a library so the
//! commands can be driven from tests without a terminal.
//!
//! - `container/` - Runtime configuration and the [`Simulator`]
//! - `report` - Console rendering of command results

#![warn(missing_docs)]

pub mod container;
pub mod report;

pub use container::{
    ConfigError, GenerateOutcome, RuntimeConfig, SimulationSummary, Simulator,
    DEFAULT_PREVIEW_LIMIT,
};

//! # Shard Telemetry
//!
//! Logging setup for the Shard-Sim binaries. Library crates only emit
//! `tracing` events; this crate decides where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shard_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SHARD_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SHARD_JSON_LOGS` | `false` | JSON output |
//! | `SHARD_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `SHARD_SERVICE_NAME` | `shard-sim` | Service name |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Global subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),

    /// Invalid filter or setting
    #[error("Invalid configuration: {0}")]
    Config(String),
}

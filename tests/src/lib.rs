//! # Shard-Sim Test Suite
//!
//! Cross-crate tests for the ledger and the runtime.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (sampling, delivery, mining)
//! └── src/integration/
//!     ├── scenarios.rs   # Topology, generate, mine and deliver walkthroughs
//!     ├── snapshot.rs    # File-backed topology persistence
//!     └── concurrency.rs # Parallel ingest and mining on shared nodes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p shard-tests
//! cargo test -p shard-tests integration::snapshot::
//! cargo bench -p shard-tests
//! ```

pub mod integration;

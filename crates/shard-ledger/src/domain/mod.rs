//! # Domain Module
//!
//! Core ledger types: transactions, blocks, the pending/relay pool and the
//! per-node chain.

pub mod chain;
pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod pool;
pub mod value_objects;

pub use chain::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use pool::*;
pub use value_objects::*;

//! # Ports Module
//!
//! Traits for collaborators outside the core.

pub mod outbound;

pub use outbound::{InMemoryTopologyStore, TopologyStore};

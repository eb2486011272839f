//! # Outbound Ports
//!
//! Persistence of the network topology. Only node identity and shard
//! membership cross this boundary; chains and pools never do.

use crate::domain::{LedgerError, TopologySnapshot};
use parking_lot::RwLock;

/// Topology store - outbound port.
pub trait TopologyStore: Send + Sync {
    /// Load the last saved snapshot. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<TopologySnapshot>, LedgerError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &TopologySnapshot) -> Result<(), LedgerError>;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryTopologyStore {
    snapshot: RwLock<Option<TopologySnapshot>>,
}

impl InMemoryTopologyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: TopologySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }
}

impl TopologyStore for InMemoryTopologyStore {
    fn load(&self) -> Result<Option<TopologySnapshot>, LedgerError> {
        Ok(self.snapshot.read().clone())
    }

    fn save(&self, snapshot: &TopologySnapshot) -> Result<(), LedgerError> {
        *self.snapshot.write() = Some(snapshot.clone());
        Ok(())
    }
}

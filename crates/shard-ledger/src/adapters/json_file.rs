//! # JSON Topology File
//!
//! Implements `TopologyStore` as a pretty-printed JSON document on disk.
//! Uses `fs2` advisory locks so a concurrent reader never sees a
//! half-written snapshot.

use crate::domain::{LedgerError, TopologySnapshot};
use crate::ports::outbound::TopologyStore;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default snapshot file name.
pub const DEFAULT_STATE_FILE: &str = "network_state.json";

/// Topology snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTopologyStore {
    path: PathBuf,
}

impl JsonFileTopologyStore {
    /// Store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TopologyStore for JsonFileTopologyStore {
    fn load(&self) -> Result<Option<TopologySnapshot>, LedgerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no topology snapshot");
            return Ok(None);
        }

        let mut file = File::open(&self.path)?;
        FileExt::lock_shared(&file)?;
        let mut contents = String::new();
        let read = file.read_to_string(&mut contents);
        FileExt::unlock(&file)?;
        read?;

        let snapshot: TopologySnapshot = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), nodes = snapshot.len(), "loaded topology snapshot");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &TopologySnapshot) -> Result<(), LedgerError> {
        let data = serde_json::to_string_pretty(snapshot)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)?;
        FileExt::lock_exclusive(&file)?;
        let written = file
            .set_len(0)
            .and_then(|_| file.write_all(data.as_bytes()))
            .and_then(|_| file.flush());
        FileExt::unlock(&file)?;
        written?;

        debug!(path = %self.path.display(), nodes = snapshot.len(), "saved topology snapshot");
        Ok(())
    }
}

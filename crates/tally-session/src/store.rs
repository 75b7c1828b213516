//! # Storage Collaborator
//!
//! The seam between the session and wherever the back-office data lives.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()          → the whole BackOfficeState                            │
//! │  save_all(state) → durably writes the whole state, synchronously        │
//! │                                                                         │
//! │  The session calls save_all after every mutation that touches durable   │
//! │  data, and never after a rejected one.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adapters
//! - [`JsonFileStore`]: one JSON document on disk, replaced atomically
//! - [`MemoryStore`]: in-process, counts saves (tests and dry runs)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StoreError;
use crate::state::BackOfficeState;

/// Loads and saves the back-office state.
pub trait StateStore {
    fn load(&self) -> Result<BackOfficeState, StoreError>;

    fn save_all(&mut self, state: &BackOfficeState) -> Result<(), StoreError>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// State kept as a single JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    /// A missing or empty file is a fresh install: empty state.
    fn load(&self) -> Result<BackOfficeState, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "State file not found, starting empty");
                return Ok(BackOfficeState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(BackOfficeState::default());
        }

        let state: BackOfficeState =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = ?self.path,
            products = state.products.len(),
            sales = state.sales.len(),
            "Loaded back-office state"
        );
        Ok(state)
    }

    fn save_all(&mut self, state: &BackOfficeState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();
        fs::write(&temp, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        info!(path = ?self.path, sales = state.sales.len(), "Back-office state saved");
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// State kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: BackOfficeState,
    saves: usize,
}

impl MemoryStore {
    pub fn new(state: BackOfficeState) -> Self {
        MemoryStore { state, saves: 0 }
    }

    /// Number of `save_all` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// The last saved state.
    pub fn state(&self) -> &BackOfficeState {
        &self.state
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<BackOfficeState, StoreError> {
        Ok(self.state.clone())
    }

    fn save_all(&mut self, state: &BackOfficeState) -> Result<(), StoreError> {
        self.state = state.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Catalog, Product};

    fn sample_state() -> BackOfficeState {
        BackOfficeState::new(Catalog::new(vec![Product::new(1, "Coke", 10)]), Vec::new())
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let state = store.load().unwrap();
        assert!(state.products.is_empty());
        assert!(state.sales.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut store = JsonFileStore::new(&path);

        store.save_all(&sample_state()).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.products.get(1).map(|p| p.qty), Some(10));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new(sample_state());
        assert_eq!(store.save_count(), 0);

        let mut state = store.load().unwrap();
        state.products.restore_stock(1, 2);
        store.save_all(&state).unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.state().products.get(1).map(|p| p.qty), Some(12));
    }
}

//! Configuration structures for ArborDB.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the file-backed node store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the index file.
    pub path: PathBuf,
    /// Enable fsync after writes.
    pub fsync_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("database.arbor"),
            fsync_enabled: true,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the given path with defaults elsewhere.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

//! Snapshot source configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the snapshot schedule source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// JSON file holding the extracted schedule data.
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schedule.json"),
        }
    }
}

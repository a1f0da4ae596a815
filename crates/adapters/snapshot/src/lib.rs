//! # vita-blackouts-adapter-snapshot
//!
//! Schedule source reading the operator's schedule data from a JSON file.
//!
//! ## Accepted formats
//!
//! | Shape | Example |
//! |-------|---------|
//! | Bare fact object | `{"data": {…}, "update": "…", "today": 1792098000}` |
//! | Variable map | `{"DisconSchedule.fact": {"data": {…}, …}}` |
//!
//! The variable map is what a script-literal extractor yields for the
//! operator's page; the bare object is what a hand-written snapshot usually
//! holds.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `vita-blackouts-app` and
//! `vita-blackouts-domain`.

mod config;
mod error;

pub use config::SnapshotConfig;
pub use error::SnapshotError;

use std::path::Path;

use vita_blackouts_app::ports::ScheduleSource;
use vita_blackouts_domain::error::BlackoutError;
use vita_blackouts_domain::schedule::FactSchedule;

/// Name of the client-side variable holding the schedule on the operator's page.
pub const FACT_VARIABLE: &str = "DisconSchedule.fact";

/// [`ScheduleSource`] backed by a JSON file on disk.
pub struct SnapshotSource {
    config: SnapshotConfig,
}

impl SnapshotSource {
    /// Create a source reading the file named in `config`.
    #[must_use]
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    async fn read(&self) -> Result<FactSchedule, SnapshotError> {
        let path = self.path();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
        let fact = parse_snapshot(&content, path)?;
        tracing::debug!(path = %path.display(), days = fact.data.len(), "snapshot read");
        Ok(fact)
    }
}

impl ScheduleSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn fetch(&self) -> Result<FactSchedule, BlackoutError> {
        Ok(self.read().await?)
    }

    async fn probe(&self) -> Result<(), BlackoutError> {
        let path = self.path();
        tokio::fs::metadata(path)
            .await
            .map(drop)
            .map_err(|source| {
                SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                }
                .into()
            })
    }
}

/// Parse snapshot JSON in either accepted shape.
///
/// # Errors
///
/// Returns [`SnapshotError::Parse`] for malformed JSON or a fact object that
/// does not match the schedule structure, and [`SnapshotError::MissingFact`]
/// when no schedule data is present at all.
pub fn parse_snapshot(content: &str, path: &Path) -> Result<FactSchedule, SnapshotError> {
    let parse_error = |source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
    if let Some(fact) = value.get_mut(FACT_VARIABLE) {
        value = fact.take();
    }
    if value.get("data").is_none() {
        return Err(SnapshotError::MissingFact {
            path: path.to_path_buf(),
        });
    }
    serde_json::from_value(value).map_err(parse_error)
}

//! Snapshot adapter error types.

use std::path::PathBuf;

use vita_blackouts_domain::error::BlackoutError;

/// Errors specific to the snapshot adapter.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid schedule JSON.
    #[error("failed to parse snapshot {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON holds neither a fact object nor a `DisconSchedule.fact` entry.
    #[error("snapshot {} has no schedule data", path.display())]
    MissingFact { path: PathBuf },
}

impl SnapshotError {
    /// Convert into a [`BlackoutError::Source`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> BlackoutError {
        BlackoutError::Source(Box::new(self))
    }
}

impl From<SnapshotError> for BlackoutError {
    fn from(err: SnapshotError) -> Self {
        err.into_domain()
    }
}

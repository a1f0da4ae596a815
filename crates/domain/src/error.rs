//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BlackoutError`] via `#[from]` (or `into_domain` for adapters).

use crate::time::Timestamp;

/// Top-level error for every operation exposed by the domain and app layers.
#[derive(Debug, thiserror::Error)]
pub enum BlackoutError {
    /// A period with `start > end` was handed to the merger.
    #[error("invalid interval")]
    InvalidInterval(#[from] InvalidInterval),

    /// The operator data has no entry for the requested group/day.
    #[error("schedule not found")]
    NotFound(#[from] ScheduleNotFound),

    /// Input failed a domain validation rule.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An upstream source (file, network, …) failed.
    #[error("schedule source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A blackout period whose start lies after its end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("period starts at {start} but ends at {end}")]
pub struct InvalidInterval {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// No schedule entry exists for a group on a given day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no schedule for group {group} on day {day_key}")]
pub struct ScheduleNotFound {
    /// Operator key of the group (e.g. `GPV6.1`).
    pub group: String,
    /// Operator day key (unix timestamp of the local midnight).
    pub day_key: String,
}

/// Validation failures on operator data and user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown power-off group {0:?}")]
    UnknownGroup(String),

    #[error("invalid hour slot {0:?}, expected 1..=24")]
    InvalidSlot(String),

    #[error("invalid day timestamp {0}")]
    InvalidDay(i64),
}

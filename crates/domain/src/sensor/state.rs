//! Power state: what the blackout sensor reports.

use serde::{Deserialize, Serialize};

/// Discrete state of the blackout sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    /// No schedule has been evaluated yet.
    #[default]
    Unknown,
    /// The schedule could not be fetched and nothing is cached.
    Unavailable,
}

impl PowerState {
    /// Whether the sensor has a usable schedule behind it.
    #[must_use]
    pub fn is_available(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("Power ON"),
            Self::Off => f.write_str("Power OFF"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `blackouts.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use vita_blackouts_adapter_snapshot::SnapshotConfig;
use vita_blackouts_app::poller::PollerConfig;
use vita_blackouts_domain::error::ValidationError;
use vita_blackouts_domain::group::PowerOffGroup;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which rotation group to track.
    pub group: GroupConfig,
    /// Poll loop timing.
    pub polling: PollingConfig,
    /// Schedule interpretation.
    pub schedule: ScheduleConfig,
    /// Snapshot source settings.
    pub source: SnapshotConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Rotation group selection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Dotted group label (e.g. `6.1`).
    pub name: String,
}

/// Poll loop timing, in seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub update_interval_secs: u64,
    pub retry_interval_secs: u64,
    pub tick_secs: u64,
}

/// Schedule interpretation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Count "possible outage" slots as blackouts.
    pub include_possible: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `blackouts.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("blackouts.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("BLACKOUTS_GROUP") {
            self.group.name = val;
        }
        if let Some(secs) = var("BLACKOUTS_UPDATE_INTERVAL").and_then(|val| val.parse().ok()) {
            self.polling.update_interval_secs = secs;
        }
        if let Some(val) = var("BLACKOUTS_SNAPSHOT") {
            self.source.path = PathBuf::from(val);
        }
        if let Some(val) = var("BLACKOUTS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.group()?;
        if self.polling.update_interval_secs == 0
            || self.polling.retry_interval_secs == 0
            || self.polling.tick_secs == 0
        {
            return Err(ConfigError::Validation(
                "polling intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured rotation group.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Group`] for an unknown group label.
    pub fn group(&self) -> Result<PowerOffGroup, ConfigError> {
        Ok(self.group.name.parse()?)
    }

    /// Poll loop timing as the poller expects it.
    #[must_use]
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            update_interval: Duration::from_secs(self.polling.update_interval_secs),
            retry_interval: Duration::from_secs(self.polling.retry_interval_secs),
            tick: Duration::from_secs(self.polling.tick_secs),
        }
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            name: "6.1".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        let defaults = PollerConfig::default();
        Self {
            update_interval_secs: defaults.update_interval.as_secs(),
            retry_interval_secs: defaults.retry_interval.as_secs(),
            tick_secs: defaults.tick.as_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "blackoutsd=info,vita_blackouts=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Unknown rotation group.
    #[error("invalid group")]
    Group(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

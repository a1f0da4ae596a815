//! Blackout sensor: the state shown to the user for one rotation group.
//!
//! The sensor reads `Power OFF` while "now" lies inside a merged blackout
//! period and `Power ON` otherwise. Periods and the next state change are
//! exposed as attributes.

mod attribute_value;
mod state;

pub use attribute_value::AttributeValue;
pub use state::PowerState;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::merge::merge;
use crate::period::BlackoutPeriod;
use crate::schedule::Schedule;
use crate::time::Timestamp;

/// `Off` when `now` falls inside any period, `On` otherwise.
#[must_use]
pub fn power_state<'a>(
    periods: impl IntoIterator<Item = &'a BlackoutPeriod>,
    now: Timestamp,
) -> PowerState {
    if periods.into_iter().any(|p| p.contains(now)) {
        PowerState::Off
    } else {
        PowerState::On
    }
}

/// Earliest on/off transition strictly after `now`.
///
/// Periods are merged first, so an outage running from today's schedule
/// into tomorrow's changes state only once. Malformed periods yield `None`.
#[must_use]
pub fn next_change(periods: &[BlackoutPeriod], now: Timestamp) -> Option<Timestamp> {
    merge(periods)
        .ok()?
        .into_iter()
        .flat_map(|p| [p.start, p.end])
        .find(|boundary| *boundary > now)
}

/// Point-in-time reading of the blackout sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub state: PowerState,
    pub attributes: HashMap<String, AttributeValue>,
    pub evaluated_at: Timestamp,
}

impl SensorSnapshot {
    /// Evaluate the sensor against `schedule` at `now`.
    ///
    /// Without a schedule the state is [`PowerState::Unknown`].
    #[must_use]
    pub fn evaluate(schedule: Option<&Schedule>, now: Timestamp) -> Self {
        let Some(schedule) = schedule else {
            return Self {
                state: PowerState::Unknown,
                attributes: HashMap::new(),
                evaluated_at: now,
            };
        };

        let mut attributes = HashMap::new();
        attributes.insert("group".to_string(), AttributeValue::from(schedule.group.as_str()));
        attributes.insert("today".to_string(), periods_attribute(&schedule.today));
        attributes.insert("tomorrow".to_string(), periods_attribute(&schedule.tomorrow));
        attributes.insert(
            "today_outage_minutes".to_string(),
            AttributeValue::Int(schedule.today.iter().map(|p| p.duration().num_minutes()).sum()),
        );
        attributes.insert(
            "fetched_at".to_string(),
            AttributeValue::String(schedule.fetched_at.to_rfc3339()),
        );
        let periods: Vec<BlackoutPeriod> = schedule.periods().copied().collect();
        if let Some(change) = next_change(&periods, now) {
            attributes.insert(
                "next_change".to_string(),
                AttributeValue::String(change.to_rfc3339()),
            );
        }
        if let Some(updated) = &schedule.updated {
            attributes.insert("updated".to_string(), AttributeValue::String(updated.clone()));
        }

        Self {
            state: power_state(&periods, now),
            attributes,
            evaluated_at: now,
        }
    }

    /// Reading for a sensor whose schedule could not be obtained.
    #[must_use]
    pub fn unavailable(now: Timestamp) -> Self {
        Self {
            state: PowerState::Unavailable,
            attributes: HashMap::new(),
            evaluated_at: now,
        }
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

fn periods_attribute(periods: &[BlackoutPeriod]) -> AttributeValue {
    AttributeValue::Json(
        periods
            .iter()
            .map(|p| {
                serde_json::json!({
                    "start": p.start.to_rfc3339(),
                    "end": p.end.to_rfc3339(),
                })
            })
            .collect(),
    )
}

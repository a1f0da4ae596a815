//! Blackout period: a contiguous span during which power is scheduled off.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Which operator schedule a period was published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    #[default]
    Today,
    Tomorrow,
}

/// A half-open time span `[start, end)` with power scheduled off.
///
/// Ordering compares `start`, then `end`, then `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlackoutPeriod {
    /// Inclusive.
    pub start: Timestamp,
    /// Exclusive.
    pub end: Timestamp,
    pub day: Day,
}

impl BlackoutPeriod {
    #[must_use]
    pub const fn new(start: Timestamp, end: Timestamp, day: Day) -> Self {
        Self { start, end, day }
    }

    /// Length of the period. Negative for malformed periods.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether the period covers no time at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `at` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
    }

    #[test]
    fn should_include_start_and_exclude_end() {
        let period = BlackoutPeriod::new(at(8, 0), at(10, 0), Day::Today);
        assert!(period.contains(at(8, 0)));
        assert!(period.contains(at(9, 59)));
        assert!(!period.contains(at(10, 0)));
        assert!(!period.contains(at(7, 59)));
    }

    #[test]
    fn should_compute_duration() {
        let period = BlackoutPeriod::new(at(8, 0), at(10, 30), Day::Today);
        assert_eq!(period.duration(), TimeDelta::minutes(150));
    }

    #[test]
    fn should_report_zero_length_as_empty() {
        assert!(BlackoutPeriod::new(at(8, 0), at(8, 0), Day::Today).is_empty());
        assert!(!BlackoutPeriod::new(at(8, 0), at(8, 30), Day::Today).is_empty());
    }

    #[test]
    fn should_order_by_start_first() {
        let early = BlackoutPeriod::new(at(6, 0), at(12, 0), Day::Tomorrow);
        let late = BlackoutPeriod::new(at(7, 0), at(8, 0), Day::Today);
        assert!(early < late);
    }

    #[test]
    fn should_serialize_day_lowercase() {
        let period = BlackoutPeriod::new(at(8, 0), at(9, 0), Day::Tomorrow);
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["day"], "tomorrow");
        assert_eq!(json["start"], "2026-10-16T08:00:00Z");
    }
}

//! Operator schedule data and its conversion into merged blackout periods.
//!
//! The operator embeds a `DisconSchedule.fact` object in its shutdowns page.
//! Once extracted into JSON it has this shape:
//!
//! ```json
//! {
//!   "data": { "1792098000": { "GPV6.1": { "1": "yes", "2": "no", "24": "first" } } },
//!   "update": "16.10.2026 09:12",
//!   "today": 1792098000
//! }
//! ```
//!
//! Day keys are unix timestamps of local midnight in Kyiv. Hour slot `"h"`
//! covers `[h-1:00, h:00)` of that day on the local clock.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{BlackoutError, ScheduleNotFound, ValidationError};
use crate::group::PowerOffGroup;
use crate::merge::merge;
use crate::period::{BlackoutPeriod, Day};
use crate::time::{self, Timestamp};

/// Power status the operator publishes for one hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Power on for the whole hour.
    Yes,
    /// Power off for the whole hour.
    No,
    /// Power off during the first half hour.
    First,
    /// Power off during the second half hour.
    Second,
    /// Possible outage for the whole hour.
    Maybe,
    /// Possible outage during the first half hour.
    #[serde(rename = "mfirst")]
    MaybeFirst,
    /// Possible outage during the second half hour.
    #[serde(rename = "msecond")]
    MaybeSecond,
    /// Anything else the operator may start publishing.
    #[serde(other)]
    Unknown,
}

impl SlotStatus {
    /// Minute range `[from, to)` within the hour during which power is off.
    ///
    /// Possible outages only count when `include_possible` is set.
    #[must_use]
    pub fn outage_minutes(self, include_possible: bool) -> Option<(i64, i64)> {
        match self {
            Self::No => Some((0, 60)),
            Self::First => Some((0, 30)),
            Self::Second => Some((30, 60)),
            Self::Maybe if include_possible => Some((0, 60)),
            Self::MaybeFirst if include_possible => Some((0, 30)),
            Self::MaybeSecond if include_possible => Some((30, 60)),
            _ => None,
        }
    }
}

/// Hour slot (`"1"`..=`"24"`) to status for one group on one day.
pub type HourlySlots = BTreeMap<String, SlotStatus>;

/// The operator's `DisconSchedule.fact` structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSchedule {
    /// Day key → group key → hourly slots.
    pub data: HashMap<String, HashMap<String, HourlySlots>>,
    /// Operator's human-readable "last updated" stamp.
    #[serde(default)]
    pub update: Option<String>,
    /// Day key of the current day.
    pub today: i64,
}

impl FactSchedule {
    /// Unix day key for `day`, when that day is published.
    ///
    /// Tomorrow is the earliest published day after today. Days around a DST
    /// change are 23 or 25 hours long, so it is not always `today + 86400`.
    #[must_use]
    pub fn day_key(&self, day: Day) -> Option<i64> {
        match day {
            Day::Today => Some(self.today),
            Day::Tomorrow => self
                .data
                .keys()
                .filter_map(|key| key.parse::<i64>().ok())
                .filter(|key| *key > self.today)
                .min(),
        }
    }

    fn entry(&self, day: Day, group: PowerOffGroup) -> Result<(i64, &HourlySlots), ScheduleNotFound> {
        let group_key = group.schedule_key();
        let Some(key) = self.day_key(day) else {
            return Err(ScheduleNotFound {
                group: group_key,
                day_key: format!("after {}", self.today),
            });
        };
        match self.data.get(&key.to_string()).and_then(|groups| groups.get(&group_key)) {
            Some(slots) => Ok((key, slots)),
            None => Err(ScheduleNotFound {
                group: group_key,
                day_key: key.to_string(),
            }),
        }
    }

    /// Look up the hourly slots of `group` on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleNotFound`] when either the day or the group is
    /// missing from the data.
    pub fn group_day(&self, day: Day, group: PowerOffGroup) -> Result<&HourlySlots, ScheduleNotFound> {
        self.entry(day, group).map(|(_, slots)| slots)
    }

    /// Raw, unmerged periods for `group` on `day`, one per outage slot.
    ///
    /// Slots are read on the operator's wall clock, so on DST-change days
    /// they keep matching local hours.
    ///
    /// # Errors
    ///
    /// Returns [`BlackoutError::NotFound`] when the group/day is missing and
    /// [`BlackoutError::Validation`] for malformed slot keys or a day key
    /// whose hours fall outside the representable range.
    pub fn raw_periods(
        &self,
        day: Day,
        group: PowerOffGroup,
        include_possible: bool,
    ) -> Result<Vec<BlackoutPeriod>, BlackoutError> {
        let (key, slots) = self.entry(day, group)?;
        let date = time::local_date(key).ok_or(ValidationError::InvalidDay(key))?;
        let at = |minutes| time::wall_clock(date, minutes).ok_or(ValidationError::InvalidDay(key));

        let mut periods = Vec::new();
        for (slot, status) in slots {
            let hour = parse_slot(slot)?;
            if let Some((from, to)) = status.outage_minutes(include_possible) {
                let hour_start = (hour - 1) * 60;
                periods.push(BlackoutPeriod::new(
                    at(hour_start + from)?,
                    at(hour_start + to)?,
                    day,
                ));
            }
        }
        Ok(periods)
    }
}

fn parse_slot(slot: &str) -> Result<i64, ValidationError> {
    slot.trim()
        .parse::<i64>()
        .ok()
        .filter(|hour| (1..=24).contains(hour))
        .ok_or_else(|| ValidationError::InvalidSlot(slot.to_string()))
}

/// Merged blackout schedule of one group, as of one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub group: PowerOffGroup,
    pub today: Vec<BlackoutPeriod>,
    pub tomorrow: Vec<BlackoutPeriod>,
    /// Operator's "last updated" stamp, when published.
    pub updated: Option<String>,
    pub fetched_at: Timestamp,
}

impl Schedule {
    /// Build the merged schedule of `group` from operator data.
    ///
    /// Tomorrow's schedule is often not published yet; a missing entry
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BlackoutError::NotFound`] when today's entry is missing,
    /// plus any validation or merge error from the slot data.
    pub fn from_fact(
        fact: &FactSchedule,
        group: PowerOffGroup,
        include_possible: bool,
        fetched_at: Timestamp,
    ) -> Result<Self, BlackoutError> {
        let today = merge(&fact.raw_periods(Day::Today, group, include_possible)?)?;
        let tomorrow = match fact.raw_periods(Day::Tomorrow, group, include_possible) {
            Ok(raw) => merge(&raw)?,
            Err(BlackoutError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err),
        };

        Ok(Self {
            group,
            today,
            tomorrow,
            updated: fact.update.clone(),
            fetched_at,
        })
    }

    /// All periods, today's first.
    pub fn periods(&self) -> impl Iterator<Item = &BlackoutPeriod> {
        self.today.iter().chain(&self.tomorrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DAY_SECS;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    // 2026-10-15T21:00:00Z, i.e. local midnight in Kyiv (UTC+3).
    const TODAY: i64 = 1_792_098_000;

    fn fact(json: &serde_json::Value) -> FactSchedule {
        serde_json::from_value(json.clone()).unwrap()
    }

    fn sample() -> FactSchedule {
        fact(&serde_json::json!({
            "data": {
                TODAY.to_string(): {
                    "GPV6.1": { "1": "yes", "2": "no", "3": "no", "4": "first", "10": "second", "11": "maybe" },
                    "GPV6.2": { "1": "no" }
                },
                (TODAY + DAY_SECS).to_string(): {
                    "GPV6.1": { "23": "maybe", "24": "no" }
                }
            },
            "update": "16.10.2026 09:12",
            "today": TODAY
        }))
    }

    fn local(hour: i64, minute: i64) -> Timestamp {
        time::from_unix(TODAY).unwrap() + TimeDelta::hours(hour) + TimeDelta::minutes(minute)
    }

    #[test]
    fn should_deserialize_unknown_status_as_unknown() {
        let slots: HourlySlots = serde_json::from_str(r#"{"1": "surprise"}"#).unwrap();
        assert_eq!(slots["1"], SlotStatus::Unknown);
    }

    #[test]
    fn should_map_statuses_to_minute_ranges() {
        assert_eq!(SlotStatus::Yes.outage_minutes(true), None);
        assert_eq!(SlotStatus::No.outage_minutes(false), Some((0, 60)));
        assert_eq!(SlotStatus::First.outage_minutes(false), Some((0, 30)));
        assert_eq!(SlotStatus::Second.outage_minutes(false), Some((30, 60)));
        assert_eq!(SlotStatus::Maybe.outage_minutes(false), None);
        assert_eq!(SlotStatus::Maybe.outage_minutes(true), Some((0, 60)));
        assert_eq!(SlotStatus::MaybeSecond.outage_minutes(true), Some((30, 60)));
        assert_eq!(SlotStatus::Unknown.outage_minutes(true), None);
    }

    #[test]
    fn should_find_group_day() {
        let fact = sample();
        let slots = fact.group_day(Day::Today, PowerOffGroup::SixTwo).unwrap();
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn should_report_missing_group_as_not_found() {
        let fact = sample();
        let err = fact
            .group_day(Day::Today, PowerOffGroup::OneOne)
            .unwrap_err();
        assert_eq!(err.group, "GPV1.1");
        assert_eq!(err.day_key, TODAY.to_string());
    }

    #[test]
    fn should_report_missing_day_as_not_found() {
        let fact = sample();
        let err = fact
            .group_day(Day::Tomorrow, PowerOffGroup::SixTwo)
            .unwrap_err();
        assert_eq!(err.day_key, (TODAY + DAY_SECS).to_string());
    }

    #[test]
    fn should_report_unpublished_tomorrow_as_not_found() {
        let fact = fact(&serde_json::json!({
            "data": { TODAY.to_string(): { "GPV6.1": { "1": "no" } } },
            "today": TODAY
        }));
        assert_eq!(fact.day_key(Day::Tomorrow), None);
        let err = fact
            .group_day(Day::Tomorrow, PowerOffGroup::SixOne)
            .unwrap_err();
        assert_eq!(err.day_key, format!("after {TODAY}"));
    }

    #[test]
    fn should_ignore_past_days_when_resolving_tomorrow() {
        let fact = fact(&serde_json::json!({
            "data": {
                (TODAY - DAY_SECS).to_string(): { "GPV6.1": {} },
                TODAY.to_string(): { "GPV6.1": {} },
                (TODAY + DAY_SECS).to_string(): { "GPV6.1": {} }
            },
            "today": TODAY
        }));
        assert_eq!(fact.day_key(Day::Tomorrow), Some(TODAY + DAY_SECS));
    }

    // 2026-10-25 is 25 hours long in Kyiv: 04:00 EEST becomes 03:00 EET.
    const FALL_BACK_DAY: i64 = 1_792_875_600;
    const AFTER_FALL_BACK: i64 = 1_792_965_600;

    fn fall_back_fact() -> FactSchedule {
        fact(&serde_json::json!({
            "data": {
                FALL_BACK_DAY.to_string(): { "GPV6.1": { "1": "no", "5": "no", "24": "first" } },
                AFTER_FALL_BACK.to_string(): { "GPV6.1": { "1": "no" } }
            },
            "today": FALL_BACK_DAY
        }))
    }

    fn utc(d: u32, h: u32, mi: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, d, h, mi, 0).unwrap()
    }

    #[test]
    fn should_find_tomorrow_after_a_25_hour_day() {
        let fact = fall_back_fact();
        assert_eq!(fact.day_key(Day::Tomorrow), Some(AFTER_FALL_BACK));

        let schedule =
            Schedule::from_fact(&fact, PowerOffGroup::SixOne, false, time::now()).unwrap();
        assert_eq!(
            schedule.tomorrow,
            vec![BlackoutPeriod::new(utc(25, 22, 0), utc(25, 23, 0), Day::Tomorrow)]
        );
    }

    #[test]
    fn should_place_slots_on_local_clock_across_fall_back() {
        let raw = fall_back_fact()
            .raw_periods(Day::Today, PowerOffGroup::SixOne, false)
            .unwrap();
        // 00:00-01:00 EEST, 04:00-05:00 EET and 23:00-23:30 EET.
        assert!(raw.contains(&BlackoutPeriod::new(utc(24, 21, 0), utc(24, 22, 0), Day::Today)));
        assert!(raw.contains(&BlackoutPeriod::new(utc(25, 2, 0), utc(25, 3, 0), Day::Today)));
        assert!(raw.contains(&BlackoutPeriod::new(utc(25, 21, 0), utc(25, 21, 30), Day::Today)));
    }

    #[test]
    fn should_drop_hour_skipped_by_spring_forward() {
        // 2026-03-29 00:00 EET; 03:00 EET jumps to 04:00 EEST.
        let day = 1_774_735_200;
        let fact = fact(&serde_json::json!({
            "data": { day.to_string(): { "GPV6.1": { "4": "second", "5": "no" } } },
            "today": day
        }));
        let schedule =
            Schedule::from_fact(&fact, PowerOffGroup::SixOne, false, time::now()).unwrap();
        assert_eq!(
            schedule.today,
            vec![BlackoutPeriod::new(
                Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 3, 29, 2, 0, 0).unwrap(),
                Day::Today,
            )]
        );
    }

    #[test]
    fn should_reject_day_at_end_of_time_without_panicking() {
        let today = DateTime::<Utc>::MAX_UTC.timestamp() - 3600;
        let fact = fact(&serde_json::json!({
            "data": { today.to_string(): { "GPV6.1": { "24": "no" } } },
            "today": today
        }));
        let result = Schedule::from_fact(&fact, PowerOffGroup::SixOne, false, time::now());
        assert!(matches!(
            result,
            Err(BlackoutError::Validation(ValidationError::InvalidDay(day))) if day == today
        ));
    }

    #[test]
    fn should_build_raw_periods_per_slot() {
        let fact = sample();
        let raw = fact
            .raw_periods(Day::Today, PowerOffGroup::SixOne, false)
            .unwrap();
        assert_eq!(raw.len(), 4);
        assert!(raw.contains(&BlackoutPeriod::new(local(1, 0), local(2, 0), Day::Today)));
        assert!(raw.contains(&BlackoutPeriod::new(local(3, 0), local(3, 30), Day::Today)));
        assert!(raw.contains(&BlackoutPeriod::new(local(9, 30), local(10, 0), Day::Today)));
    }

    #[test]
    fn should_reject_slot_outside_day() {
        let fact = fact(&serde_json::json!({
            "data": { TODAY.to_string(): { "GPV6.1": { "25": "no" } } },
            "today": TODAY
        }));
        let err = fact
            .raw_periods(Day::Today, PowerOffGroup::SixOne, false)
            .unwrap_err();
        assert!(matches!(
            err,
            BlackoutError::Validation(ValidationError::InvalidSlot(ref s)) if s == "25"
        ));
    }

    #[test]
    fn should_merge_slots_into_schedule() {
        let fetched_at = Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap();
        let schedule = Schedule::from_fact(&sample(), PowerOffGroup::SixOne, false, fetched_at).unwrap();

        assert_eq!(
            schedule.today,
            vec![
                BlackoutPeriod::new(local(1, 0), local(3, 30), Day::Today),
                BlackoutPeriod::new(local(9, 30), local(10, 0), Day::Today),
            ]
        );
        assert_eq!(
            schedule.tomorrow,
            vec![BlackoutPeriod::new(local(47, 0), local(48, 0), Day::Tomorrow)]
        );
        assert_eq!(schedule.updated.as_deref(), Some("16.10.2026 09:12"));
        assert_eq!(schedule.fetched_at, fetched_at);
    }

    #[test]
    fn should_count_possible_outages_when_enabled() {
        let schedule =
            Schedule::from_fact(&sample(), PowerOffGroup::SixOne, true, time::now()).unwrap();
        assert_eq!(
            schedule.today[1],
            BlackoutPeriod::new(local(9, 30), local(11, 0), Day::Today)
        );
        assert_eq!(
            schedule.tomorrow,
            vec![BlackoutPeriod::new(local(46, 0), local(48, 0), Day::Tomorrow)]
        );
    }

    #[test]
    fn should_leave_tomorrow_empty_when_unpublished() {
        let schedule =
            Schedule::from_fact(&sample(), PowerOffGroup::SixTwo, false, time::now()).unwrap();
        assert_eq!(schedule.today.len(), 1);
        assert!(schedule.tomorrow.is_empty());
    }

    #[test]
    fn should_fail_when_today_is_missing() {
        let result = Schedule::from_fact(&sample(), PowerOffGroup::TwoOne, false, time::now());
        assert!(matches!(result, Err(BlackoutError::NotFound(_))));
    }

    #[test]
    fn should_iterate_today_before_tomorrow() {
        let schedule =
            Schedule::from_fact(&sample(), PowerOffGroup::SixOne, false, time::now()).unwrap();
        let days: Vec<Day> = schedule.periods().map(|p| p.day).collect();
        assert_eq!(days, vec![Day::Today, Day::Today, Day::Tomorrow]);
    }
}

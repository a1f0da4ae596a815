//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// UTC timestamp used for period bounds, fetch times and evaluation times.
pub type Timestamp = DateTime<Utc>;

/// Seconds in a calendar day without a DST change.
pub const DAY_SECS: i64 = 86_400;

/// Time zone of the operator's wall clock. Day keys are local midnights and
/// hour slots are local hours in this zone.
pub const OPERATOR_TZ: Tz = chrono_tz::Europe::Kyiv;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Convert a unix timestamp (seconds) into a [`Timestamp`].
///
/// Returns `None` when the value is outside chrono's representable range.
#[must_use]
pub fn from_unix(secs: i64) -> Option<Timestamp> {
    DateTime::from_timestamp(secs, 0)
}

/// Local calendar date of a unix day key.
///
/// Returns `None` when the key, or its local reading, is out of range.
#[must_use]
pub fn local_date(key: i64) -> Option<NaiveDate> {
    let utc = from_unix(key)?.naive_utc();
    let offset = OPERATOR_TZ.offset_from_utc_datetime(&utc).fix();
    utc.checked_add_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
        .map(|local| local.date())
}

/// Instant at which the operator's clock reads `minutes` past midnight of
/// `date`. Values of 1440 and above roll into the following day.
///
/// On the fall-back day the repeated hour resolves to its first occurrence.
/// Wall-clock times skipped by the spring-forward jump collapse onto the jump.
#[must_use]
pub fn wall_clock(date: NaiveDate, minutes: i64) -> Option<Timestamp> {
    let naive = date
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::minutes(minutes))?;
    let local = OPERATOR_TZ.from_local_datetime(&naive).earliest().or_else(|| {
        let hour = naive.checked_sub_signed(TimeDelta::minutes(minutes.rem_euclid(60)))?;
        (1..=2).find_map(|step| {
            let after = hour.checked_add_signed(TimeDelta::hours(step))?;
            OPERATOR_TZ.from_local_datetime(&after).earliest()
        })
    })?;
    Some(local.with_timezone(&Utc))
}

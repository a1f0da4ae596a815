//! Interval merging: collapses raw blackout periods into the minimal
//! disjoint set covering the same time.
//!
//! Periods are half-open, so two periods where one ends exactly when the
//! next starts are *touching* and get merged into one.

use crate::error::InvalidInterval;
use crate::period::BlackoutPeriod;

/// Merge overlapping and touching periods.
///
/// The result is sorted by `start`, and for consecutive outputs `a`, `b`
/// holds `b.start > a.end`. Zero-length periods cover no time and never
/// appear in the output. A merged period keeps the `day` of the earliest
/// period it absorbed.
///
/// The input is only read; the result is built from copies.
///
/// # Errors
///
/// Returns [`InvalidInterval`] for the first period with `start > end`,
/// before any sorting takes place.
pub fn merge(periods: &[BlackoutPeriod]) -> Result<Vec<BlackoutPeriod>, InvalidInterval> {
    if let Some(bad) = periods.iter().find(|p| p.start > p.end) {
        return Err(InvalidInterval {
            start: bad.start,
            end: bad.end,
        });
    }

    let mut sorted = periods.to_vec();
    sorted.sort();

    let mut merged: Vec<BlackoutPeriod> = Vec::with_capacity(sorted.len());
    for current in sorted {
        match merged.last_mut() {
            Some(last) if current.start <= last.end => {
                last.end = last.end.max(current.end);
            }
            _ => merged.push(current),
        }
    }

    merged.retain(|p| !p.is_empty());
    Ok(merged)
}

//! Schedule service: fetches operator data and turns it into the merged
//! schedule of the configured group.

use vita_blackouts_domain::error::BlackoutError;
use vita_blackouts_domain::group::PowerOffGroup;
use vita_blackouts_domain::schedule::Schedule;
use vita_blackouts_domain::time::Timestamp;

use crate::ports::ScheduleSource;

/// Application service for one group's blackout schedule.
pub struct ScheduleService<S> {
    source: S,
    group: PowerOffGroup,
    include_possible: bool,
}

impl<S: ScheduleSource> ScheduleService<S> {
    /// Create a new service reading from `source` for `group`.
    ///
    /// When `include_possible` is set, "maybe" slots count as outages.
    pub fn new(source: S, group: PowerOffGroup, include_possible: bool) -> Self {
        Self {
            source,
            group,
            include_possible,
        }
    }

    /// The group this service tracks.
    #[must_use]
    pub fn group(&self) -> PowerOffGroup {
        self.group
    }

    /// Fetch fresh data and build the merged schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BlackoutError::Source`] when the fetch fails,
    /// [`BlackoutError::NotFound`] when today's schedule of the group is
    /// missing, or a validation/merge error for malformed data.
    pub async fn refresh(&self, now: Timestamp) -> Result<Schedule, BlackoutError> {
        let fact = self.source.fetch().await?;
        tracing::debug!(
            source = self.source.name(),
            days = fact.data.len(),
            today = fact.today,
            "schedule data fetched"
        );

        let schedule = Schedule::from_fact(&fact, self.group, self.include_possible, now)?;
        tracing::info!(
            group = %self.group,
            today = schedule.today.len(),
            tomorrow = schedule.tomorrow.len(),
            updated = schedule.updated.as_deref().unwrap_or("-"),
            "schedule refreshed"
        );
        Ok(schedule)
    }

    /// Check that the source is reachable.
    ///
    /// # Errors
    ///
    /// Propagates the source's probe failure.
    pub async fn probe(&self) -> Result<(), BlackoutError> {
        self.source.probe().await
    }
}

//! Schedule source port: where the operator's schedule data comes from.
//!
//! A source hands over the operator's `DisconSchedule.fact` data already in
//! structured form. How it obtains it (rendered page, saved snapshot, …) is
//! the adapter's business.

use std::future::Future;

use vita_blackouts_domain::error::BlackoutError;
use vita_blackouts_domain::schedule::FactSchedule;

/// Supplies the operator's schedule for all groups.
pub trait ScheduleSource: Send + Sync {
    /// Short name used in logs (e.g. `"snapshot"`).
    fn name(&self) -> &'static str;

    /// Fetch the current schedule data.
    fn fetch(&self) -> impl Future<Output = Result<FactSchedule, BlackoutError>> + Send;

    /// Check that the source is reachable before polling starts.
    ///
    /// The default implementation performs a full fetch and discards it.
    fn probe(&self) -> impl Future<Output = Result<(), BlackoutError>> + Send {
        async move { self.fetch().await.map(drop) }
    }
}

impl<T: ScheduleSource> ScheduleSource for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn fetch(&self) -> impl Future<Output = Result<FactSchedule, BlackoutError>> + Send {
        (**self).fetch()
    }

    fn probe(&self) -> impl Future<Output = Result<(), BlackoutError>> + Send {
        (**self).probe()
    }
}

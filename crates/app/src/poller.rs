//! Schedule poller: refreshes the schedule periodically and publishes the
//! sensor reading on every tick.
//!
//! All polling state lives in a [`PollerContext`] owned by the poller task.
//! It is created with the task and dropped when the task is aborted.

use std::time::Duration;

use chrono::TimeDelta;
use tokio::task::JoinHandle;

use vita_blackouts_domain::schedule::Schedule;
use vita_blackouts_domain::sensor::SensorSnapshot;
use vita_blackouts_domain::time::{self, Timestamp};

use crate::ports::{ScheduleSource, SensorPublisher};
use crate::services::schedule_service::ScheduleService;

/// Timing of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Time between successful schedule refreshes.
    pub update_interval: Duration,
    /// Time before retrying after a failed refresh.
    pub retry_interval: Duration,
    /// Time between sensor evaluations.
    pub tick: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(4 * 60 * 60),
            retry_interval: Duration::from_secs(5 * 60),
            tick: Duration::from_secs(60),
        }
    }
}

/// Polling state: the last good schedule and refresh bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct PollerContext {
    schedule: Option<Schedule>,
    last_attempt: Option<Timestamp>,
    failures: u32,
}

impl PollerContext {
    /// The last successfully refreshed schedule, if any.
    #[must_use]
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Consecutive failed refreshes since the last success.
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether a refresh should run at `now`.
    #[must_use]
    pub fn refresh_due(&self, now: Timestamp, config: &PollerConfig) -> bool {
        let Some(last) = self.last_attempt else {
            return true;
        };
        let wait = if self.failures > 0 {
            config.retry_interval
        } else {
            config.update_interval
        };
        let wait = TimeDelta::from_std(wait).unwrap_or(TimeDelta::MAX);
        now - last >= wait
    }

    /// Sensor reading at `now`.
    ///
    /// A failed refresh with nothing cached reads as unavailable; a stale
    /// schedule is still used while refreshes keep failing.
    #[must_use]
    pub fn snapshot(&self, now: Timestamp) -> SensorSnapshot {
        match &self.schedule {
            None if self.failures > 0 => SensorSnapshot::unavailable(now),
            schedule => SensorSnapshot::evaluate(schedule.as_ref(), now),
        }
    }
}

/// Background task driving a [`ScheduleService`] and a [`SensorPublisher`].
pub struct SchedulePoller<S, P> {
    service: ScheduleService<S>,
    publisher: P,
    config: PollerConfig,
    context: PollerContext,
}

impl<S, P> SchedulePoller<S, P>
where
    S: ScheduleSource + 'static,
    P: SensorPublisher + Send + Sync + 'static,
{
    /// Create a poller with an empty context.
    pub fn new(service: ScheduleService<S>, publisher: P, config: PollerConfig) -> Self {
        Self {
            service,
            publisher,
            config,
            context: PollerContext::default(),
        }
    }

    /// Current polling state.
    #[must_use]
    pub fn context(&self) -> &PollerContext {
        &self.context
    }

    /// Spawn the poll loop. Abort the returned handle to stop it.
    pub fn start(self) -> JoinHandle<()> {
        tracing::info!(
            group = %self.service.group(),
            update_interval_secs = self.config.update_interval.as_secs(),
            tick_secs = self.config.tick.as_secs(),
            "schedule poller started"
        );
        tokio::spawn(self.run())
    }

    /// Continuous loop: iterate, wait for the tick, repeat.
    async fn run(mut self) {
        loop {
            self.iterate(time::now()).await;
            tokio::time::sleep(self.config.tick).await;
        }
    }

    /// Run one poll step at `now`: refresh when due, then evaluate and
    /// publish the sensor reading.
    pub async fn iterate(&mut self, now: Timestamp) -> SensorSnapshot {
        if self.context.refresh_due(now, &self.config) {
            self.refresh(now).await;
        }

        let snapshot = self.context.snapshot(now);
        if let Err(err) = self.publisher.publish(snapshot.clone()).await {
            tracing::warn!(%err, "failed to publish sensor snapshot");
        }
        snapshot
    }

    async fn refresh(&mut self, now: Timestamp) {
        self.context.last_attempt = Some(now);
        match self.service.refresh(now).await {
            Ok(schedule) => {
                self.context.schedule = Some(schedule);
                self.context.failures = 0;
            }
            Err(err) => {
                self.context.failures += 1;
                tracing::warn!(
                    %err,
                    failures = self.context.failures,
                    cached = self.context.schedule.is_some(),
                    "schedule refresh failed, retrying later"
                );
            }
        }
    }
}

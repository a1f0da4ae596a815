//! Sensor bus: fans each published reading out to subscribers and keeps the
//! most recent one for late readers.

use std::future::Future;

use tokio::sync::{broadcast, watch};

use vita_blackouts_domain::error::BlackoutError;
use vita_blackouts_domain::sensor::SensorSnapshot;

use crate::ports::SensorPublisher;

/// In-process [`SensorPublisher`].
///
/// Every reading goes to a [`broadcast`] channel for the reporter and other
/// consumers, and replaces the value returned by [`latest`](Self::latest).
/// A reading with nobody subscribed is still remembered as the latest.
pub struct InProcessSensorBus {
    readings: broadcast::Sender<SensorSnapshot>,
    latest: watch::Sender<Option<SensorSnapshot>>,
}

impl InProcessSensorBus {
    /// Create a bus buffering up to `capacity` readings per slow subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (readings, _) = broadcast::channel(capacity);
        let (latest, _) = watch::channel(None);
        Self { readings, latest }
    }

    /// Receive readings published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SensorSnapshot> {
        self.readings.subscribe()
    }

    /// The last published reading, if the poller has produced one yet.
    #[must_use]
    pub fn latest(&self) -> Option<SensorSnapshot> {
        self.latest.borrow().clone()
    }
}

impl SensorPublisher for InProcessSensorBus {
    fn publish(
        &self,
        snapshot: SensorSnapshot,
    ) -> impl Future<Output = Result<(), BlackoutError>> + Send {
        tracing::trace!(state = %snapshot.state, "sensor reading published");
        self.latest.send_replace(Some(snapshot.clone()));
        // Fails only when nobody listens; the latest reading is kept anyway.
        let _ = self.readings.send(snapshot);
        async { Ok(()) }
    }
}

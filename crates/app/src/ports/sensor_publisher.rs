//! Sensor publisher port: hands sensor snapshots to the downstream layer.

use std::future::Future;

use vita_blackouts_domain::error::BlackoutError;
use vita_blackouts_domain::sensor::SensorSnapshot;

/// Publishes sensor readings to whoever renders them.
pub trait SensorPublisher {
    /// Publish a snapshot to all current subscribers.
    fn publish(
        &self,
        snapshot: SensorSnapshot,
    ) -> impl Future<Output = Result<(), BlackoutError>> + Send;
}

impl<T: SensorPublisher + Send + Sync> SensorPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        snapshot: SensorSnapshot,
    ) -> impl Future<Output = Result<(), BlackoutError>> + Send {
        (**self).publish(snapshot)
    }
}

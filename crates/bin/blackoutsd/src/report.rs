//! Sensor reporter: the downstream end of the sensor bus.
//!
//! Renders each state change as one human-readable log line.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use vita_blackouts_domain::sensor::{AttributeValue, PowerState, SensorSnapshot};

/// One-line description of a snapshot, e.g. `Power OFF until … (group 6.1)`.
#[must_use]
pub fn render(snapshot: &SensorSnapshot) -> String {
    match (snapshot.state, text(snapshot, "group")) {
        (PowerState::On | PowerState::Off, Some(group)) => match text(snapshot, "next_change") {
            Some(next) => format!("{} until {next} (group {group})", snapshot.state),
            None => format!("{} (group {group})", snapshot.state),
        },
        (state, _) => format!("sensor {state}"),
    }
}

fn text<'a>(snapshot: &'a SensorSnapshot, key: &str) -> Option<&'a str> {
    match snapshot.get_attribute(key) {
        Some(AttributeValue::String(value)) => Some(value.as_str()),
        _ => None,
    }
}

/// Remembers the last reported state so only changes get logged.
#[derive(Debug, Default)]
struct StateChanges {
    last: Option<PowerState>,
}

impl StateChanges {
    /// Rendered line for `snapshot` when its state differs from the last one.
    fn observe(&mut self, snapshot: &SensorSnapshot) -> Option<String> {
        if self.last == Some(snapshot.state) {
            return None;
        }
        self.last = Some(snapshot.state);
        Some(render(snapshot))
    }
}

/// Consume snapshots until the bus closes, logging state changes.
pub async fn run(mut rx: broadcast::Receiver<SensorSnapshot>) {
    let mut changes = StateChanges::default();
    loop {
        match rx.recv().await {
            Ok(snapshot) => match changes.observe(&snapshot) {
                Some(line) => tracing::info!("{line}"),
                None => tracing::trace!(state = %snapshot.state, "sensor unchanged"),
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "sensor reporter lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

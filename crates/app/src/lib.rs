//! # vita-blackouts-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `ScheduleSource`: fetch the operator's schedule data
//!   - `SensorPublisher`: hand sensor snapshots to the downstream layer
//! - Define **use cases**:
//!   - `ScheduleService`: fetch, look up the group, merge periods
//!   - `SchedulePoller`: periodic refresh and sensor evaluation
//! - Provide **in-process infrastructure** (sensor bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `vita-blackouts-domain` only (plus `tokio` for channels and
//! timers). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod poller;
pub mod ports;
pub mod sensor_bus;
pub mod services;

//! # blackoutsd: blackout sensor daemon
//!
//! Composition root that wires the schedule source, the poller and the
//! sensor bus together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Construct the schedule source (adapter) and the schedule service
//! - Start the poller and the reporter consuming its snapshots
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod report;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use vita_blackouts_adapter_snapshot::SnapshotSource;
use vita_blackouts_app::poller::SchedulePoller;
use vita_blackouts_app::sensor_bus::InProcessSensorBus;
use vita_blackouts_app::services::schedule_service::ScheduleService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let group = config.group()?;

    // Source
    let source = SnapshotSource::new(config.source.clone());
    tracing::info!(path = %source.path().display(), "using snapshot source");

    // Service
    let service = ScheduleService::new(source, group, config.schedule.include_possible);
    if let Err(err) = service.probe().await {
        tracing::warn!(%err, "schedule source not reachable yet, polling anyway");
    }

    // Sensor bus
    let bus = Arc::new(InProcessSensorBus::new(16));
    let reporter = tokio::spawn(report::run(bus.subscribe()));

    // Poller
    let poller = SchedulePoller::new(service, Arc::clone(&bus), config.poller_config()).start();
    tracing::info!(%group, "blackoutsd running");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    poller.abort();
    reporter.abort();
    match bus.latest() {
        Some(last) => tracing::info!(last = %report::render(&last), "blackoutsd stopped"),
        None => tracing::info!("blackoutsd stopped"),
    }

    Ok(())
}

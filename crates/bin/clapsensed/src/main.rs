//! # clapsensed — clapsense daemon
//!
//! Composition root that wires the host bus, the clap source, and the
//! adapter together and runs the add-on.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the in-process host bus and the clap source
//! - Load the adapter with its pre-provisioned `clap-sensor-0` device
//! - Log every host notification until shut down (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use clapsense_adapter_sim::SimClapSource;
use clapsense_app::host_bus::InProcessHostBus;
use clapsense_app::loader::{self, Manifest};
use clapsense_app::ports::{ClapSource, DeviceHost};
use clapsense_domain::event::HostEventKind;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = Arc::new(InProcessHostBus::new(256));
    let mut events = host.subscribe();

    let source = Arc::new(SimClapSource::new(64));

    let manifest = Manifest {
        name: config.adapter.package_name.clone(),
        display_name: None,
    };
    let _adapter = loader::load(
        &manifest,
        Arc::clone(&host) as Arc<dyn DeviceHost>,
        Arc::clone(&source) as Arc<dyn ClapSource>,
    )
    .await?;

    let _clapper = config.simulation.enabled.then(|| {
        tracing::info!(
            interval_secs = config.simulation.interval_secs,
            "synthetic clapper enabled"
        );
        source.spawn_interval(Duration::from_secs(config.simulation.interval_secs))
    });

    loop {
        tokio::select! {
            () = shutdown() => break,
            event = events.recv() => match event {
                Ok(event) => log_host_event(&event.kind),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "host events dropped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    tracing::info!("clapsensed shutting down");
    Ok(())
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        // Without a signal handler, park forever rather than spin.
        std::future::pending::<()>().await;
    }
}

fn log_host_event(kind: &HostEventKind) {
    match kind {
        HostEventKind::DeviceAdded { device } => {
            tracing::info!(device = %device.id, name = %device.name, "device added");
        }
        HostEventKind::DeviceRemoved { device_id } => {
            tracing::info!(device = %device_id, "device removed");
        }
        HostEventKind::PropertyChanged {
            device_id,
            property,
        } => {
            tracing::info!(
                device = %device_id,
                property = %property.name,
                value = ?property.value,
                "property changed"
            );
        }
    }
}

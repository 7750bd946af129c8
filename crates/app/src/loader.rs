//! Add-on entry point — builds an adapter with its pre-provisioned sensor.

use std::sync::Arc;

use serde::Deserialize;

use clapsense_domain::description::{DeviceDescription, PropertyDescription};
use clapsense_domain::error::ClapSenseError;
use clapsense_domain::id::DeviceId;

use crate::adapter::ClapSensorAdapter;
use crate::ports::{ClapSource, DeviceHost};

/// Add-on manifest metadata handed to the loader by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Package name, used as the adapter's owning package.
    pub name: String,
    /// Optional human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Load the clap-sensor add-on: start sensing, construct the adapter, and
/// register one pre-provisioned device `clap-sensor-0` with a single boolean
/// property `on` (initially `false`).
///
/// # Errors
///
/// Returns an error when the clap source fails to start or the initial
/// device cannot be registered.
pub async fn load(
    manifest: &Manifest,
    host: Arc<dyn DeviceHost>,
    source: Arc<dyn ClapSource>,
) -> Result<ClapSensorAdapter, ClapSenseError> {
    source.start()?;

    let mut adapter = ClapSensorAdapter::new(manifest.name.clone(), host, source);

    let description = DeviceDescription::builder()
        .name("Clap Sensor")
        .type_tag("binarySensor")
        .property(PropertyDescription::boolean("on", false))
        .build()?;
    adapter
        .add_device(DeviceId::from("clap-sensor-0"), description)
        .await?;

    tracing::info!(
        adapter = %adapter.id(),
        package = %adapter.package_name(),
        "clap-sensor add-on loaded"
    );
    Ok(adapter)
}

//! `ClapSensorAdapter` — device registry plus the host-driven two-phase
//! pairing protocol.
//!
//! Pairing is two-phase: the host first records intent (`pair_device` /
//! `unpair_device`), then drives the action (`start_pairing` /
//! `remove_thing`). The pending slot is a single tagged value rather than a
//! pair of nullable fields, so the protocol's states are explicit:
//! [`PendingAction::Idle`], [`PendingAction::Pair`], [`PendingAction::Unpair`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clapsense_domain::description::DeviceDescription;
use clapsense_domain::error::{ClapSenseError, DeviceNotFoundError, DuplicateDeviceError};
use clapsense_domain::id::DeviceId;

use crate::device::ClapSensor;
use crate::ports::{ClapSource, DeviceHost};

/// The adapter's single-slot pairing-intent buffer.
///
/// A cancel call does *not* clear this slot — only the matching
/// `start_pairing` / `remove_thing` consumes it. That asymmetry is inherited
/// host behaviour: a later unrelated `start_pairing` may act on a stale
/// pending request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PendingAction {
    /// No pairing or unpairing request is pending.
    #[default]
    Idle,
    /// `pair_device` was called; the device is created on `start_pairing`.
    Pair {
        id: DeviceId,
        description: DeviceDescription,
    },
    /// `unpair_device` was called; the device is removed on `remove_thing`.
    Unpair { id: DeviceId },
}

impl PendingAction {
    /// Consume a pending pair request, leaving other states untouched.
    fn take_pair(&mut self) -> Option<(DeviceId, DeviceDescription)> {
        match std::mem::take(self) {
            Self::Pair { id, description } => Some((id, description)),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Consume a pending unpair request, leaving other states untouched.
    fn take_unpair(&mut self) -> Option<DeviceId> {
        match std::mem::take(self) {
            Self::Unpair { id } => Some(id),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Whether no request is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// The top-level registry: owns devices, mediates host pairing requests,
/// and forwards notifications to the host channel.
pub struct ClapSensorAdapter {
    id: String,
    name: String,
    package_name: String,
    devices: HashMap<DeviceId, ClapSensor>,
    pending: PendingAction,
    host: Arc<dyn DeviceHost>,
    source: Arc<dyn ClapSource>,
}

impl ClapSensorAdapter {
    /// Create an adapter owned by the given package.
    #[must_use]
    pub fn new(
        package_name: impl Into<String>,
        host: Arc<dyn DeviceHost>,
        source: Arc<dyn ClapSource>,
    ) -> Self {
        Self {
            id: "clap-sensor".to_string(),
            name: "Clap Sensor".to_string(),
            package_name: package_name.into(),
            devices: HashMap::new(),
            pending: PendingAction::default(),
            host,
            source,
        }
    }

    /// The adapter's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The adapter's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The add-on package that owns this adapter.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// All currently registered devices, keyed by id.
    #[must_use]
    pub fn devices(&self) -> &HashMap<DeviceId, ClapSensor> {
        &self.devices
    }

    /// Look up a device by id.
    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&ClapSensor> {
        self.devices.get(id)
    }

    /// The current pairing-intent state.
    #[must_use]
    pub fn pending(&self) -> &PendingAction {
        &self.pending
    }

    /// Construct and register a device.
    ///
    /// Emits a `device_added` notification on success.
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::Duplicate`] when `id` is already registered,
    /// or a construction error from [`ClapSensor::new`].
    #[tracing::instrument(skip(self, description), fields(adapter = %self.id))]
    pub async fn add_device(
        &mut self,
        id: DeviceId,
        description: DeviceDescription,
    ) -> Result<&ClapSensor, ClapSenseError> {
        if self.devices.contains_key(&id) {
            return Err(DuplicateDeviceError { id }.into());
        }
        let device = ClapSensor::new(id.clone(), &description, &self.host, self.source.as_ref())?;
        self.host.device_added(device.snapshot());
        Ok(self.devices.entry(id).or_insert(device))
    }

    /// Unregister a device, returning it.
    ///
    /// Emits a `device_removed` notification on success.
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::NotFound`] when `id` is not registered.
    #[tracing::instrument(skip(self), fields(adapter = %self.id))]
    pub async fn remove_device(&mut self, id: &DeviceId) -> Result<ClapSensor, ClapSenseError> {
        let device = self
            .devices
            .remove(id)
            .ok_or_else(|| DeviceNotFoundError { id: id.clone() })?;
        self.host.device_removed(id);
        Ok(device)
    }

    /// Record the intent to pair a device. The device itself is only created
    /// by the next [`start_pairing`](Self::start_pairing).
    pub fn pair_device(&mut self, id: DeviceId, description: DeviceDescription) {
        self.pending = PendingAction::Pair { id, description };
    }

    /// Record the intent to unpair a device. The device is only removed by
    /// the next [`remove_thing`](Self::remove_thing).
    pub fn unpair_device(&mut self, id: DeviceId) {
        self.pending = PendingAction::Unpair { id };
    }

    /// Host-driven half of pairing: consume a pending pair request, if any,
    /// and attempt to add the device. Failures are logged and swallowed —
    /// the host only sees the side-effect log line.
    ///
    /// The timeout is accepted for interface compatibility but not enforced;
    /// pairing-window expiry is the host's job.
    pub async fn start_pairing(&mut self, timeout: Duration) {
        tracing::info!(
            adapter = %self.id,
            name = %self.name,
            timeout_secs = timeout.as_secs(),
            "pairing started"
        );
        if let Some((id, description)) = self.pending.take_pair() {
            match self.add_device(id.clone(), description).await {
                Ok(_) => tracing::info!(device = %id, "device was paired"),
                Err(err) => tracing::error!(device = %id, error = %err, "pairing failed"),
            }
        }
    }

    /// Logging no-op. Deliberately leaves any pending request in place; see
    /// [`PendingAction`].
    pub fn cancel_pairing(&self) {
        tracing::info!(adapter = %self.id, name = %self.name, "pairing cancelled");
    }

    /// Host-driven half of unpairing: consume a pending unpair request, if
    /// any, and attempt to remove the device. Failures are logged and
    /// swallowed.
    pub async fn remove_thing(&mut self, device_id: &DeviceId) {
        tracing::info!(
            adapter = %self.id,
            name = %self.name,
            device = %device_id,
            "remove thing started"
        );
        if let Some(id) = self.pending.take_unpair() {
            match self.remove_device(&id).await {
                Ok(_) => tracing::info!(device = %id, "device was unpaired"),
                Err(err) => tracing::error!(device = %id, error = %err, "unpairing failed"),
            }
        }
    }

    /// Logging no-op. Deliberately leaves any pending request in place; see
    /// [`PendingAction`].
    pub fn cancel_remove_thing(&self, device_id: &DeviceId) {
        tracing::info!(
            adapter = %self.id,
            name = %self.name,
            device = %device_id,
            "remove thing cancelled"
        );
    }

    /// Reset utility for repeatable test setup: clears the pending slot and
    /// removes every registered device (emitting `device_removed` for each).
    pub fn clear_state(&mut self) {
        self.pending = PendingAction::Idle;
        for (id, _device) in self.devices.drain() {
            self.host.device_removed(&id);
        }
    }
}

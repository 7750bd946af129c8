//! `ToggleProperty` — a boolean property toggled by clap events.
//!
//! The property's cached value changes from two sides: external callers via
//! [`ToggleProperty::set_value`], and the clap-event stream consumed by a
//! background task spawned at construction. Every completed change is
//! followed by exactly one host notification carrying the new value. Racing
//! writers are resolved last-writer-wins; the value is a plain boolean, so
//! staleness is cosmetic and no locking beyond the value mutex is needed.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use clapsense_domain::description::PropertyDescription;
use clapsense_domain::error::ClapSenseError;
use clapsense_domain::event::ClapEvent;
use clapsense_domain::id::{DeviceId, PropertyName};
use clapsense_domain::snapshot::PropertySnapshot;
use clapsense_domain::value::{PropertyType, PropertyValue};

use crate::ports::DeviceHost;

/// Capability handle a property uses to reach its owning device's host.
///
/// This replaces the `property.device.notifyPropertyChanged(...)` chain of
/// the base-class model: the property never sees the device, only the
/// device's id and the host channel.
pub struct PropertyLink {
    device_id: DeviceId,
    host: Arc<dyn DeviceHost>,
}

impl PropertyLink {
    /// Create a link for the device with the given id.
    #[must_use]
    pub fn new(device_id: DeviceId, host: Arc<dyn DeviceHost>) -> Self {
        Self { device_id, host }
    }
}

struct PropertyInner {
    name: PropertyName,
    type_tag: PropertyType,
    unit: Option<String>,
    description: Option<String>,
    value: Mutex<PropertyValue>,
    link: PropertyLink,
}

impl PropertyInner {
    fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot {
            name: self.name.clone(),
            type_tag: self.type_tag,
            unit: self.unit.clone(),
            description: self.description.clone(),
            value: self.value(),
        }
    }

    fn value(&self) -> PropertyValue {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, value: PropertyValue) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }

    fn toggle(&self) {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .toggle();
    }

    fn notify(&self) {
        self.link
            .host
            .property_changed(&self.link.device_id, self.snapshot());
    }
}

/// A boolean property whose value flips on each detected clap.
pub struct ToggleProperty {
    inner: Arc<PropertyInner>,
    listener: JoinHandle<()>,
}

impl ToggleProperty {
    /// Build a property from its description and start its clap listener.
    ///
    /// The cached value is set to the (coerced) initial value from the
    /// description and one host notification is emitted immediately, so the
    /// host's state reflects the just-created property.
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::InvalidValue`] when the description's
    /// initial value does not match its declared type.
    pub fn spawn(
        description: &PropertyDescription,
        link: PropertyLink,
        claps: broadcast::Receiver<ClapEvent>,
    ) -> Result<Self, ClapSenseError> {
        let initial = description.type_tag.coerce(description.value.clone())?;
        let inner = Arc::new(PropertyInner {
            name: description.name.clone(),
            type_tag: description.type_tag,
            unit: description.unit.clone(),
            description: description.description.clone(),
            value: Mutex::new(initial),
            link,
        });
        inner.notify();

        let listener = tokio::spawn(listen(Arc::clone(&inner), claps));
        Ok(Self { inner, listener })
    }

    /// The property's name, unique within its device.
    #[must_use]
    pub fn name(&self) -> &PropertyName {
        &self.inner.name
    }

    /// The current cached value.
    #[must_use]
    pub fn value(&self) -> PropertyValue {
        self.inner.value()
    }

    /// The current state as reported to the host.
    #[must_use]
    pub fn snapshot(&self) -> PropertySnapshot {
        self.inner.snapshot()
    }

    /// Set the property's value.
    ///
    /// The stored value is the *coerced* result, which may differ from the
    /// requested one — callers must read the returned value, not assume an
    /// echo. On success exactly one host notification is emitted; on failure
    /// the cached value is untouched and nothing is notified.
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::InvalidValue`] when `value` does not match
    /// the declared type.
    pub async fn set_value(&self, value: PropertyValue) -> Result<PropertyValue, ClapSenseError> {
        let resolved = self.inner.type_tag.coerce(value)?;
        self.inner.store(resolved.clone());
        self.inner.notify();
        Ok(resolved)
    }
}

impl Drop for ToggleProperty {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Consume clap events for the lifetime of the property: toggle, notify.
async fn listen(inner: Arc<PropertyInner>, mut claps: broadcast::Receiver<ClapEvent>) {
    loop {
        match claps.recv().await {
            Ok(_clap) => {
                tracing::info!(property = %inner.name, "clap");
                inner.toggle();
                inner.notify();
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // Claps arrive at unbounded rate and are not debounced;
                // a lagged receiver just picks up from where it is.
                tracing::warn!(property = %inner.name, missed, "clap events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

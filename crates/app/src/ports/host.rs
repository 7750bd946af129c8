//! Host port — the notification channel from the adapter toward the gateway.

use clapsense_domain::id::DeviceId;
use clapsense_domain::snapshot::{DeviceSnapshot, PropertySnapshot};

/// Receives adapter notifications on behalf of the host gateway.
///
/// All methods are fire-and-forget: delivery to a host with no listeners
/// succeeds silently, and no method can fail or block. This mirrors the
/// one-notification-per-change contract — callers emit exactly one call per
/// completed state change, and the host takes it from there.
pub trait DeviceHost: Send + Sync {
    /// A device became live and should be exposed to the gateway.
    fn device_added(&self, device: DeviceSnapshot);

    /// A device was removed from the adapter's registry.
    fn device_removed(&self, device_id: &DeviceId);

    /// A property's cached value changed.
    fn property_changed(&self, device_id: &DeviceId, property: PropertySnapshot);
}

impl<T: DeviceHost + ?Sized> DeviceHost for std::sync::Arc<T> {
    fn device_added(&self, device: DeviceSnapshot) {
        (**self).device_added(device);
    }

    fn device_removed(&self, device_id: &DeviceId) {
        (**self).device_removed(device_id);
    }

    fn property_changed(&self, device_id: &DeviceId, property: PropertySnapshot) {
        (**self).property_changed(device_id, property);
    }
}

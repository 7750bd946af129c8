//! Events — host notifications and inbound clap signals.
//!
//! [`HostEvent`] is the outbound side: every device registration, removal, or
//! property change produces exactly one. [`ClapEvent`] is the inbound side:
//! the clap-detection source publishes one per detected clap, and properties
//! consume them from a channel instead of registering a callback.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId};
use crate::snapshot::{DeviceSnapshot, PropertySnapshot};
use crate::time::{self, Timestamp};

/// A notification delivered to the host gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    pub id: EventId,
    pub at: Timestamp,
    #[serde(flatten)]
    pub kind: HostEventKind,
}

impl HostEvent {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(kind: HostEventKind) -> Self {
        Self {
            id: EventId::new(),
            at: time::now(),
            kind,
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEventKind {
    /// A device became live and is now exposed to the gateway.
    DeviceAdded { device: DeviceSnapshot },
    /// A device was removed from the adapter's registry.
    DeviceRemoved { device_id: DeviceId },
    /// A property's cached value changed (externally or via a clap toggle).
    PropertyChanged {
        device_id: DeviceId,
        property: PropertySnapshot,
    },
}

/// One detected clap, delivered from the sensing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClapEvent {
    pub at: Timestamp,
}

impl ClapEvent {
    /// Create a clap event stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self { at: time::now() }
    }
}

impl Default for ClapEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_new_events_with_unique_ids() {
        let a = HostEvent::new(HostEventKind::DeviceRemoved {
            device_id: DeviceId::from("d1"),
        });
        let b = HostEvent::new(HostEventKind::DeviceRemoved {
            device_id: DeviceId::from("d1"),
        });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn should_tag_kind_in_json() {
        let event = HostEvent::new(HostEventKind::DeviceRemoved {
            device_id: DeviceId::from("clap-sensor-0"),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "deviceRemoved");
        assert_eq!(json["device_id"], "clap-sensor-0");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = HostEvent::new(HostEventKind::DeviceRemoved {
            device_id: DeviceId::from("d1"),
        });
        let json = serde_json::to_string(&event).unwrap();
        let parsed: HostEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}

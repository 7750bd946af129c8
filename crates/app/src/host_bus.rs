//! In-process host-notification bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use clapsense_domain::event::{HostEvent, HostEventKind};
use clapsense_domain::id::DeviceId;
use clapsense_domain::snapshot::{DeviceSnapshot, PropertySnapshot};

use crate::ports::DeviceHost;

/// In-process [`DeviceHost`] using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessHostBus {
    sender: broadcast::Sender<HostEvent>,
}

impl InProcessHostBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to host events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, kind: HostEventKind) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(HostEvent::new(kind));
    }
}

impl DeviceHost for InProcessHostBus {
    fn device_added(&self, device: DeviceSnapshot) {
        self.publish(HostEventKind::DeviceAdded { device });
    }

    fn device_removed(&self, device_id: &DeviceId) {
        self.publish(HostEventKind::DeviceRemoved {
            device_id: device_id.clone(),
        });
    }

    fn property_changed(&self, device_id: &DeviceId, property: PropertySnapshot) {
        self.publish(HostEventKind::PropertyChanged {
            device_id: device_id.clone(),
            property,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessHostBus::new(16);
        let mut rx = bus.subscribe();

        bus.device_removed(&DeviceId::from("d1"));

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received.kind,
            HostEventKind::DeviceRemoved {
                device_id: DeviceId::from("d1")
            }
        );
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessHostBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.device_removed(&DeviceId::from("d1"));

        let r1 = rx1.recv().await.unwrap();
        let r2 = rx2.recv().await.unwrap();
        assert_eq!(r1.id, r2.id);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessHostBus::new(16);
        bus.device_removed(&DeviceId::from("d1"));
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessHostBus::new(16);

        bus.device_removed(&DeviceId::from("before"));

        let mut rx = bus.subscribe();
        bus.device_removed(&DeviceId::from("after"));

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received.kind,
            HostEventKind::DeviceRemoved {
                device_id: DeviceId::from("after")
            }
        );
    }
}

//! Connection-level demultiplexer for GATT driver callbacks.
//!
//! The driver calls in from its own thread, serialized; each event kind is fanned out to whoever
//! subscribed at that moment. Events with no subscriber are dropped.
use radio_core::OperationError;
use radio_model::{DeviceServices, GattService, OperationType};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::GATT_SUCCESS;

const DEFAULT_CAPACITY: usize = 16;

type ServicesEvent = Result<DeviceServices, OperationError>;

#[derive(Clone, Debug)]
pub struct GattCallback {
    services_discovered: broadcast::Sender<ServicesEvent>,
}

impl GattCallback {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (services_discovered, _) = broadcast::channel(capacity);
        Self {
            services_discovered,
        }
    }

    /// Subscribe to "services discovered" completion events.
    pub fn on_services_discovered(&self) -> broadcast::Receiver<ServicesEvent> {
        self.services_discovered.subscribe()
    }

    /// Driver entry point: service discovery finished with `status`.
    pub fn services_discovered(&self, status: u8, services: Vec<GattService>) {
        let event = if status == GATT_SUCCESS {
            debug!(target: "radio.gatt.callback", services = services.len(), "services discovered");
            Ok(DeviceServices::new(services))
        } else {
            debug!(target: "radio.gatt.callback", status, "service discovery failed");
            Err(OperationError::Gatt {
                op: OperationType::ServiceDiscovery,
                status,
            })
        };
        self.publish(event);
    }

    /// Driver entry point: the link dropped. Pending operations fail with the disconnection status.
    pub fn disconnected(&self, status: u8) {
        debug!(target: "radio.gatt.callback", status, "disconnected");
        self.publish(Err(OperationError::Disconnected {
            op: OperationType::ServiceDiscovery,
            status,
        }));
    }

    fn publish(&self, event: ServicesEvent) {
        if self.services_discovered.send(event).is_err() {
            trace!(target: "radio.gatt.callback", "event dropped; no subscriber");
        }
    }
}

impl Default for GattCallback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_failure_status() {
        let callback = GattCallback::new();
        let mut events = callback.on_services_discovered();

        callback.services_discovered(0x85, vec![]);

        assert_eq!(
            events.recv().await.unwrap(),
            Err(OperationError::Gatt {
                op: OperationType::ServiceDiscovery,
                status: 0x85
            })
        );
    }

    #[tokio::test]
    async fn events_before_subscription_are_not_replayed() {
        let callback = GattCallback::new();
        callback.services_discovered(GATT_SUCCESS, vec![]);

        let mut events = callback.on_services_discovered();
        callback.disconnected(0x08);

        assert!(matches!(
            events.recv().await.unwrap(),
            Err(OperationError::Disconnected { status: 0x08, .. })
        ));
    }
}

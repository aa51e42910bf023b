//! Service discovery on a connected peripheral.
//!
//! Some GATT stacks receive every service, characteristic and descriptor but never deliver the final
//! "discovery complete" callback. When the deadline passes, the services the client already holds are
//! inspected directly:
//! - none: discovery timed out;
//! - some: the stack may still be filling them in, so wait one grace interval and return what it holds then.
//!
//! Stacks that deliver the whole tree at once report zero services until discovery completes, so a
//! non-empty read is reliable evidence the work finished.
use std::sync::Arc;

use radio_core::{
    GraceProbe, OperationHandle, OperationUnit, RadioLease, RadioOperation, RunContext,
    StateAccessor,
};
use radio_model::{DeviceServices, OperationType};
use tracing::debug;

use crate::{DiscoveryConfig, GattCallback, GattClient};

/// Reads the services a GATT client currently holds.
#[derive(Debug)]
pub struct ServicesAccessor<C> {
    client: Arc<C>,
}

impl<C> ServicesAccessor<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> StateAccessor for ServicesAccessor<C>
where
    C: GattClient,
{
    type Snapshot = DeviceServices;

    fn read(&self) -> DeviceServices {
        DeviceServices::new(self.client.services())
    }

    fn has_progress(&self, snapshot: &DeviceServices) -> bool {
        !snapshot.is_empty()
    }
}

pub struct ServicesDiscoverOperation<C> {
    client: Arc<C>,
    callback: GattCallback,
    config: DiscoveryConfig,
}

impl<C> ServicesDiscoverOperation<C>
where
    C: GattClient,
{
    pub fn new(client: Arc<C>, callback: GattCallback, config: DiscoveryConfig) -> Self {
        Self {
            client,
            callback,
            config,
        }
    }
}

impl<C> RadioOperation for ServicesDiscoverOperation<C>
where
    C: GattClient,
{
    type Output = DeviceServices;

    fn op(&self) -> OperationType {
        OperationType::ServiceDiscovery
    }

    fn run(self, lease: RadioLease, ctx: &RunContext) -> OperationHandle<DeviceServices> {
        let events = self.callback.on_services_discovered();
        let client = Arc::clone(&self.client);
        let start = move || client.discover_services();

        let unit = OperationUnit::new(
            OperationType::ServiceDiscovery,
            start,
            events,
            GraceProbe::new(ServicesAccessor::new(self.client)),
            self.config.timeouts,
            ctx.clone(),
        );
        debug!(
            target: "radio.gatt.discover",
            id = %unit.id(),
            timeout_ms = self.config.timeouts.timeout_ms,
            "discovering services"
        );
        unit.execute(lease)
    }
}

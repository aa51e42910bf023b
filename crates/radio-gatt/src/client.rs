use std::sync::Arc;

use radio_model::GattService;

/// Status reported by the GATT stack when an operation succeeded.
pub const GATT_SUCCESS: u8 = 0x00;

/// Synchronous side of a connected GATT client.
pub trait GattClient: Send + Sync + 'static {
    /// Ask the stack to begin service discovery.
    ///
    /// Returns `false` when the stack refused to start.
    fn discover_services(&self) -> bool;

    /// Services the stack currently holds for the peripheral, read directly.
    fn services(&self) -> Vec<GattService>;
}

impl<C> GattClient for Arc<C>
where
    C: GattClient + ?Sized,
{
    fn discover_services(&self) -> bool {
        (**self).discover_services()
    }

    fn services(&self) -> Vec<GattService> {
        (**self).services()
    }
}

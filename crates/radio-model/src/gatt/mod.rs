mod services;
pub use services::{
    CharacteristicProperties, DeviceServices, GattCharacteristic, GattDescriptor, GattService,
    ServiceKind,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a service was advertised as primary or only included by another service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    Primary,
    Secondary,
}

/// Characteristic property bits as reported by the peripheral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacteristicProperties(pub u8);

impl CharacteristicProperties {
    pub const BROADCAST: u8 = 0x01;
    pub const READ: u8 = 0x02;
    pub const WRITE_NO_RESPONSE: u8 = 0x04;
    pub const WRITE: u8 = 0x08;
    pub const NOTIFY: u8 = 0x10;
    pub const INDICATE: u8 = 0x20;

    #[inline]
    pub fn contains(&self, bits: u8) -> bool {
        self.0 & bits == bits
    }

    #[inline]
    pub fn readable(&self) -> bool {
        self.contains(Self::READ)
    }

    #[inline]
    pub fn writable(&self) -> bool {
        self.contains(Self::WRITE) || self.contains(Self::WRITE_NO_RESPONSE)
    }

    #[inline]
    pub fn notifies(&self) -> bool {
        self.contains(Self::NOTIFY) || self.contains(Self::INDICATE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GattDescriptor {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GattCharacteristic {
    pub uuid: Uuid,
    /// Distinguishes characteristics sharing a UUID within one service.
    pub instance_id: u32,
    pub properties: CharacteristicProperties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptors: Vec<GattDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GattService {
    pub uuid: Uuid,
    pub instance_id: u32,
    pub kind: ServiceKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristics: Vec<GattCharacteristic>,
    /// UUIDs of services included by this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Uuid>,
}

impl GattService {
    pub fn characteristic(&self, uuid: &Uuid) -> Option<&GattCharacteristic> {
        self.characteristics.iter().find(|c| &c.uuid == uuid)
    }
}

/// Immutable snapshot of the services discovered on a peripheral.
///
/// Produced either by the "services discovered" callback or by reading the GATT client directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceServices {
    services: Vec<GattService>,
}

impl DeviceServices {
    pub fn new(services: Vec<GattService>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[GattService] {
        &self.services
    }

    pub fn into_services(self) -> Vec<GattService> {
        self.services
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// First service with the given UUID.
    pub fn service(&self, uuid: &Uuid) -> Option<&GattService> {
        self.services.iter().find(|s| &s.uuid == uuid)
    }

    /// First characteristic with the given UUID across all services, in discovery order.
    pub fn characteristic(&self, uuid: &Uuid) -> Option<&GattCharacteristic> {
        self.services.iter().find_map(|s| s.characteristic(uuid))
    }
}

impl From<Vec<GattService>> for DeviceServices {
    fn from(services: Vec<GattService>) -> Self {
        Self::new(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn characteristic(uuid: Uuid, properties: u8) -> GattCharacteristic {
        GattCharacteristic {
            uuid,
            instance_id: 0,
            properties: CharacteristicProperties(properties),
            descriptors: vec![],
        }
    }

    #[test]
    fn lookup_by_uuid() {
        let battery = Uuid::new_v4();
        let level = Uuid::new_v4();
        let services = DeviceServices::new(vec![
            GattService {
                uuid: Uuid::new_v4(),
                instance_id: 0,
                kind: ServiceKind::Primary,
                characteristics: vec![],
                included: vec![],
            },
            GattService {
                uuid: battery,
                instance_id: 1,
                kind: ServiceKind::Primary,
                characteristics: vec![characteristic(
                    level,
                    CharacteristicProperties::READ | CharacteristicProperties::NOTIFY,
                )],
                included: vec![],
            },
        ]);

        assert_eq!(services.len(), 2);
        assert_eq!(services.service(&battery).map(|s| s.instance_id), Some(1));

        let c = services.characteristic(&level).expect("characteristic should exist");
        assert!(c.properties.readable());
        assert!(c.properties.notifies());
        assert!(!c.properties.writable());
        assert!(services.characteristic(&Uuid::new_v4()).is_none());

        let owned = services.into_services();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[1].uuid, battery);
    }

    #[test]
    fn empty_snapshot_omits_optional_lists() {
        let service = GattService {
            uuid: Uuid::nil(),
            instance_id: 0,
            kind: ServiceKind::Secondary,
            characteristics: vec![],
            included: vec![],
        };
        let json = serde_json::to_string(&service).unwrap();
        assert!(!json.contains("characteristics"));
        assert!(!json.contains("included"));
        assert!(DeviceServices::default().is_empty());
    }
}

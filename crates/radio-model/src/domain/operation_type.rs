use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Kind of hardware operation executed against the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    /// Discover the services, characteristics and descriptors of a connected peripheral.
    ServiceDiscovery,
    CharacteristicRead,
    CharacteristicWrite,
    DescriptorRead,
    DescriptorWrite,
    ReadRssi,
    MtuRequest,
}

impl OperationType {
    /// Returns a short symbolic identifier used in logs and errors:
    /// - `"service_discovery"`
    /// - `"characteristic_read"`
    /// - `"characteristic_write"`
    /// - `"descriptor_read"`
    /// - `"descriptor_write"`
    /// - `"read_rssi"`
    /// - `"mtu_request"`
    pub fn kind(&self) -> &'static str {
        match self {
            OperationType::ServiceDiscovery => "service_discovery",
            OperationType::CharacteristicRead => "characteristic_read",
            OperationType::CharacteristicWrite => "characteristic_write",
            OperationType::DescriptorRead => "descriptor_read",
            OperationType::DescriptorWrite => "descriptor_write",
            OperationType::ReadRssi => "read_rssi",
            OperationType::MtuRequest => "mtu_request",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl FromStr for OperationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "service_discovery" => Ok(OperationType::ServiceDiscovery),
            "characteristic_read" => Ok(OperationType::CharacteristicRead),
            "characteristic_write" => Ok(OperationType::CharacteristicWrite),
            "descriptor_read" => Ok(OperationType::DescriptorRead),
            "descriptor_write" => Ok(OperationType::DescriptorWrite),
            "read_rssi" => Ok(OperationType::ReadRssi),
            "mtu_request" => Ok(OperationType::MtuRequest),
            _ => Err(ModelError::UnknownOperationType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbolic_kind() {
        assert_eq!(
            " Service_Discovery ".parse::<OperationType>(),
            Ok(OperationType::ServiceDiscovery)
        );
        assert_eq!("read_rssi".parse::<OperationType>(), Ok(OperationType::ReadRssi));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "bond".parse::<OperationType>().unwrap_err();
        assert_eq!(err, ModelError::UnknownOperationType("bond".into()));
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&OperationType::MtuRequest).unwrap();
        assert_eq!(json, r#""mtuRequest""#);
    }
}

use radio_model::TimeoutConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryConfig {
    /// Deadline for the "services discovered" callback and grace for the recovery probe.
    pub timeouts: TimeoutConfig,
}

impl DiscoveryConfig {
    pub fn new(timeouts: TimeoutConfig) -> Self {
        Self { timeouts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: DiscoveryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DiscoveryConfig::default());
    }

    #[test]
    fn grace_is_configurable() {
        let cfg: DiscoveryConfig =
            serde_json::from_str(r#"{"timeouts":{"timeoutMs":10000,"graceMs":1500}}"#).unwrap();
        assert_eq!(cfg.timeouts.timeout_ms, 10_000);
        assert_eq!(cfg.timeouts.grace_ms, 1_500);
    }
}

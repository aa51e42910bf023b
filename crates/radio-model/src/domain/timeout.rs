use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DurationMs;

/// Bounded wait settings for a radio operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeoutConfig {
    /// How long to wait for the completion event before probing hardware state.
    pub timeout_ms: DurationMs,
    /// Extra wait after the probe saw partial progress, before the state is read again.
    ///
    /// Tuned per platform; hardware fills the state shortly before (or without) signalling completion.
    pub grace_ms: DurationMs,
}

impl TimeoutConfig {
    pub const DEFAULT_TIMEOUT_MS: DurationMs = 20_000;
    pub const DEFAULT_GRACE_MS: DurationMs = 5_000;

    pub fn new(timeout: Duration, grace: Duration) -> Self {
        Self {
            timeout_ms: timeout.as_millis() as DurationMs,
            grace_ms: grace.as_millis() as DurationMs,
        }
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[inline]
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
            grace_ms: Self::DEFAULT_GRACE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TimeoutConfig::default();
        assert_eq!(cfg.timeout(), Duration::from_secs(20));
        assert_eq!(cfg.grace(), Duration::from_secs(5));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: TimeoutConfig = serde_json::from_str(r#"{"timeoutMs":10000}"#).unwrap();
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.grace_ms, TimeoutConfig::DEFAULT_GRACE_MS);
    }
}

use serde::Deserialize;

use crate::logger::{error::LoggerError, format::LoggerFormat};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"info,radio.core=trace"`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || atty::is(atty::Stream::Stdout);
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    pub const ENV_LEVEL: &'static str = "RADIO_LOG";
    pub const ENV_FORMAT: &'static str = "RADIO_LOG_FORMAT";

    /// Defaults overridden by `RADIO_LOG` (filter) and `RADIO_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Ok(level) = std::env::var(Self::ENV_LEVEL) {
            cfg.level = level;
        }
        if let Ok(format) = std::env::var(Self::ENV_FORMAT) {
            cfg.format = format.parse()?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg: LoggerConfig = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "info");
        assert!(cfg.with_targets);
    }
}

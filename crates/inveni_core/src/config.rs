//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe the tunables the host app passes at startup.
//! - Parse and validate JSON config supplied by the host.
//!
//! # Invariants
//! - Missing fields fall back to `CoreConfig::default()`.
//! - A config returned by `from_json_str` has passed `validate()`.

use crate::logging::default_log_level;
use crate::model::event::Coordinate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Map center used before any event exists.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate::new(37.7749, -122.4194);
pub const DEFAULT_FIX_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logging.
    pub log_dir: Option<String>,
    pub fix_timeout_ms: u64,
    pub default_center: Coordinate,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            fix_timeout_ms: DEFAULT_FIX_TIMEOUT_MS,
            default_center: DEFAULT_MAP_CENTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidFixTimeout,
    InvalidDefaultCenter(Coordinate),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::InvalidFixTimeout => write!(f, "fix_timeout_ms must be greater than 0"),
            Self::InvalidDefaultCenter(center) => {
                write!(f, "default_center is out of range: {center}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fix_timeout_ms == 0 {
            return Err(ConfigError::InvalidFixTimeout);
        }
        if !self.default_center.is_valid() {
            return Err(ConfigError::InvalidDefaultCenter(self.default_center));
        }
        Ok(())
    }

    pub fn fix_timeout(&self) -> Duration {
        Duration::from_millis(self.fix_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_FIX_TIMEOUT_MS, DEFAULT_MAP_CENTER};
    use crate::model::event::Coordinate;
    use std::time::Duration;

    #[test]
    fn empty_object_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config.fix_timeout_ms, DEFAULT_FIX_TIMEOUT_MS);
        assert_eq!(config.default_center, DEFAULT_MAP_CENTER);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn parses_explicit_fields() {
        let config = CoreConfig::from_json_str(
            r#"{
                "log_level": "warn",
                "log_dir": "/tmp/inveni-logs",
                "fix_timeout_ms": 2500,
                "default_center": { "latitude": 45.46, "longitude": 9.19 }
            }"#,
        )
        .expect("explicit config should parse");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/inveni-logs"));
        assert_eq!(config.fix_timeout(), Duration::from_millis(2500));
        assert_eq!(config.default_center, Coordinate::new(45.46, 9.19));
    }

    #[test]
    fn rejects_zero_timeout_and_bad_center() {
        let err = CoreConfig::from_json_str(r#"{ "fix_timeout_ms": 0 }"#)
            .expect_err("zero timeout must fail");
        assert_eq!(err, ConfigError::InvalidFixTimeout);

        let err = CoreConfig::from_json_str(
            r#"{ "default_center": { "latitude": 120.0, "longitude": 0.0 } }"#,
        )
        .expect_err("out of range center must fail");
        assert!(matches!(err, ConfigError::InvalidDefaultCenter(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CoreConfig::from_json_str("{ not json").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

//! Naming oracle connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "deepseek-coder:6.7b".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: f32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: 0.0,
        }
    }
}

impl OracleConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "oracle.host",
                format!("expected an http(s) URL, got {:?}", self.host),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("oracle.model", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("oracle.timeout_secs", "must be at least 1"));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ConfigError::invalid(
                "oracle.temperature",
                format!("must be a non-negative number, got {}", self.temperature),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = OracleConfig::default();
        assert_eq!(config.host, "http://localhost:11434");
        assert_eq!(config.model, "deepseek-coder:6.7b");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.temperature.abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_host() {
        let config = OracleConfig {
            host: "localhost:11434".to_string(),
            ..OracleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "oracle.host"
        ));
    }

    #[test]
    fn rejects_zero_timeout_and_negative_temperature() {
        let config = OracleConfig {
            timeout_secs: 0,
            ..OracleConfig::default()
        };
        assert!(config.validate().is_err());
        let config = OracleConfig {
            temperature: -0.5,
            ..OracleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

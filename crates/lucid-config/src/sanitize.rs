//! Sanitizer rule configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One `pattern → replacement` prefix rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleConfig {
    pub pattern: String,
    /// Empty removes the prefix.
    #[serde(default)]
    pub replacement: String,
}

/// An empty rule list means the built-in radare2 rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SanitizeConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl SanitizeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rule) = self.rules.iter().find(|r| r.pattern.is_empty()) {
            return Err(ConfigError::invalid(
                "sanitize.rules",
                format!("empty pattern (replacement {:?})", rule.replacement),
            ));
        }
        Ok(())
    }
}

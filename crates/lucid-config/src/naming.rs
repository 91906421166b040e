//! Naming strategy selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which naming strategy drives the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// One request per symbol.
    #[default]
    Sequential,
    /// One request per function.
    Batched,
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Batched => f.write_str("batched"),
        }
    }
}

const fn default_summary() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamingConfig {
    #[serde(default)]
    pub mode: NamingMode,

    /// Sequential mode only: let later questions see earlier answers.
    #[serde(default)]
    pub carry_history: bool,

    /// Ask for a summary first and print it as a leading comment.
    #[serde(default = "default_summary")]
    pub summary: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            mode: NamingMode::default(),
            carry_history: false,
            summary: default_summary(),
        }
    }
}

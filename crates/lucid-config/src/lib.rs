//! # lucid-config
//!
//! Layered configuration loading for lucid using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LUCID_*` prefix, `__` as separator)
//! 2. Project-level `.lucid/config.toml`
//! 3. User-level `~/.config/lucid/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! `LUCID_ORACLE__MODEL` -> `oracle.model`, `LUCID_NAMING__MODE` -> `naming.mode`.
//!
//! # Usage
//!
//! ```no_run
//! use lucid_config::LucidConfig;
//!
//! let config = LucidConfig::load_with_dotenv().expect("config");
//! println!("asking {} at {}", config.oracle.model, config.oracle.host);
//! ```

mod error;
mod naming;
mod oracle;
mod sanitize;

pub use error::ConfigError;
pub use naming::{NamingConfig, NamingMode};
pub use oracle::OracleConfig;
pub use sanitize::{RuleConfig, SanitizeConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".lucid/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LucidConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

impl LucidConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; see [`load_with_dotenv`](Self::load_with_dotenv).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or
    /// deserialized, and [`ConfigError::InvalidValue`] if a value is out of
    /// range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the working directory, then [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from `figment`.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LUCID_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lucid").join("config.toml"))
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oracle.validate()?;
        self.sanitize.validate()
    }
}

//! Inkmap Settings Crate
//!
//! Handles the mapping configuration file and its persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, ConfigFormat, OutputSettings, RuleDefaults, RuleEntry};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::{default_config_path, SettingsPersistence};

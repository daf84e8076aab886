//! Settings Persistence
//!
//! Handles loading and saving the mapping configuration from/to its file in the
//! platform configuration directory. A missing file is created with defaults; a file that
//! exists but does not parse is reported rather than overwritten.

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use inkmap_core::RuleTable;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "inkmap";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory holding Inkmap's persisted configuration
pub fn config_dir() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}

/// Default location of the configuration file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config bound to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let corrupted = |reason: String| -> SettingsError {
            ConfigError::Corrupted {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        };
        let config = Config::load_from_file(path).map_err(|e| match e {
            SettingsError::Json(e) => corrupted(e.to_string()),
            SettingsError::TomlParse(e) => corrupted(e.to_string()),
            other => other,
        })?;
        Ok(Self {
            config,
            path: path.to_path_buf(),
        })
    }

    /// Load settings from `path`, writing a default file first when none exists
    pub fn load_or_create(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            return Self::load_from_file(path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        let persistence = Self::new(path);
        persistence.save()?;
        tracing::info!(path = %path.display(), "Created default mapping configuration");
        Ok(persistence)
    }

    /// Load settings from the platform default location
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_or_create(&default_config_path()?)
    }

    /// Save settings to the bound file
    pub fn save(&self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.config.validate()
    }

    /// Rule snapshot for one conversion
    pub fn rule_table(&self) -> RuleTable {
        self.config.rule_table()
    }
}

//! Error types for the settings crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, checking, or writing the mapping configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A mapping entry or default carries an unusable value.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The platform has no configuration directory, or it could not be created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SettingsError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Problems with a configuration file as a whole.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The file exists but does not parse.
    #[error("Corrupted configuration {}: {reason}", path.display())]
    Corrupted { path: PathBuf, reason: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_name_the_file() {
        let err = SettingsError::read(
            "/etc/inkmap/config.json",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to read /etc/inkmap/config.json: not found"
        );
        assert!(std::error::Error::source(&err).is_some());

        let err = SettingsError::write(
            "out/config.toml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write out/config.toml: denied");
    }

    #[test]
    fn test_invalid_setting_display() {
        let err = SettingsError::invalid("element_mappings[2].width", "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'element_mappings[2].width': must be > 0"
        );
    }

    #[test]
    fn test_config_error_display_and_conversion() {
        let err = ConfigError::Corrupted {
            path: PathBuf::from("mapping.json"),
            reason: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Corrupted configuration mapping.json: expected value at line 1"
        );

        let settings_err: SettingsError = ConfigError::UnsupportedFormat("ini".to_string()).into();
        assert!(matches!(
            settings_err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }
}

//! Mapping configuration for Inkmap
//!
//! Provides configuration file handling and validation for the mapping rules.
//! Supports JSON and TOML file formats, selected by file extension.
//!
//! Configuration is organized into sections:
//! - Defaults applied to rule entries that leave a field unset
//! - Element mappings (one entry per rule, in priority-neutral table order)
//! - Output preferences (pretty printing, default output file)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use inkmap_core::{MappingRule, RuleTable, Size, SvgElementType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ELEMENT_TYPE: &str = "ia.display.view";
pub const DEFAULT_PROPS_PATH: &str = "Symbol-Views/Equipment-Views/Status";
pub const DEFAULT_SIZE: f64 = 14.0;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat(
                "config file must be .json or .toml".to_string(),
            )),
        }
    }
}

/// Values used by rule entries that leave a field unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefaults {
    /// Output component type
    pub element_type: String,
    /// Property path of the component
    pub props_path: String,
    /// Component width
    pub width: f64,
    /// Component height
    pub height: f64,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            element_type: DEFAULT_ELEMENT_TYPE.to_string(),
            props_path: DEFAULT_PROPS_PATH.to_string(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

/// One `element_mappings` entry as written in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub svg_type: SvgElementType,
    /// Empty means the entry is the default rule for its `svg_type`
    #[serde(default)]
    pub label_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub x_offset: f64,
    #[serde(default)]
    pub y_offset: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub final_prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub final_suffix: String,
}

impl RuleEntry {
    pub fn new(svg_type: SvgElementType, label_prefix: impl Into<String>) -> Self {
        Self {
            svg_type,
            label_prefix: label_prefix.into(),
            element_type: None,
            props_path: None,
            width: None,
            height: None,
            x_offset: 0.0,
            y_offset: 0.0,
            final_prefix: String::new(),
            final_suffix: String::new(),
        }
    }

    pub fn with_props_path(mut self, props_path: impl Into<String>) -> Self {
        self.props_path = Some(props_path.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Materialize the rule, filling unset fields from `defaults`.
    pub fn to_rule(&self, defaults: &RuleDefaults) -> MappingRule {
        MappingRule::new(
            self.svg_type,
            self.label_prefix.clone(),
            self.element_type
                .clone()
                .unwrap_or_else(|| defaults.element_type.clone()),
            self.props_path
                .clone()
                .unwrap_or_else(|| defaults.props_path.clone()),
            Size::new(
                self.width.unwrap_or(defaults.width),
                self.height.unwrap_or(defaults.height),
            ),
        )
        .with_offset(self.x_offset, self.y_offset)
        .with_final_prefix(self.final_prefix.clone())
        .with_final_suffix(self.final_suffix.clone())
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Indent the generated JSON
    pub pretty: bool,
    /// File written when no output path is given
    pub default_file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            default_file: PathBuf::from("elements.json"),
        }
    }
}

/// Complete mapping configuration
///
/// Aggregates all sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: RuleDefaults,
    #[serde(default)]
    pub element_mappings: Vec<RuleEntry>,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: RuleDefaults::default(),
            element_mappings: vec![
                RuleEntry::new(SvgElementType::Rect, ""),
                RuleEntry::new(SvgElementType::Circle, ""),
                RuleEntry::new(SvgElementType::Path, ""),
            ],
            output: OutputSettings::default(),
        }
    }
}

fn check_size(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)));
    }
    Ok(())
}

fn check_finite(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() {
        return Err(SettingsError::invalid(key, "must be a finite number"));
    }
    Ok(())
}

fn check_not_empty(key: &str, value: &str) -> SettingsResult<()> {
    if value.trim().is_empty() {
        return Err(SettingsError::invalid(key, "must not be empty"));
    }
    Ok(())
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text in the given format and validate it
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize config in the given format
    pub fn to_string_with_format(&self, format: ConfigFormat) -> SettingsResult<String> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::read(path, e))?;
        let config = Self::from_str_with_format(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            mappings = config.element_mappings.len(),
            "Loaded mapping configuration"
        );
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.to_string_with_format(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, content).map_err(|e| SettingsError::write(path, e))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        check_not_empty("defaults.element_type", &self.defaults.element_type)?;
        check_not_empty("defaults.props_path", &self.defaults.props_path)?;
        check_size("defaults.width", self.defaults.width)?;
        check_size("defaults.height", self.defaults.height)?;

        for (i, entry) in self.element_mappings.iter().enumerate() {
            let key = |field: &str| format!("element_mappings[{}].{}", i, field);
            if let Some(element_type) = &entry.element_type {
                check_not_empty(&key("element_type"), element_type)?;
            }
            if let Some(props_path) = &entry.props_path {
                check_not_empty(&key("props_path"), props_path)?;
            }
            if let Some(width) = entry.width {
                check_size(&key("width"), width)?;
            }
            if let Some(height) = entry.height {
                check_size(&key("height"), height)?;
            }
            check_finite(&key("x_offset"), entry.x_offset)?;
            check_finite(&key("y_offset"), entry.y_offset)?;
        }

        if self.output.default_file.as_os_str().is_empty() {
            return Err(SettingsError::invalid("output.default_file", "must not be empty"));
        }

        Ok(())
    }

    /// Immutable rule snapshot handed to the engine
    pub fn rule_table(&self) -> RuleTable {
        self.element_mappings
            .iter()
            .map(|entry| entry.to_rule(&self.defaults))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.defaults.width, 14.0);
        assert_eq!(config.rule_table().len(), 3);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.json")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_entries_fill_from_defaults() {
        let json = r#"{
            "defaults": {
                "element_type": "ia.display.view",
                "props_path": "Symbol-Views/Equipment-Views/Status",
                "width": 20,
                "height": 10
            },
            "element_mappings": [
                {"svg_type": "rect", "label_prefix": "PPI",
                 "props_path": "Symbol-Views/Equipment-Views/PPI", "x_offset": 2,
                 "final_prefix": "BTN"},
                {"svg_type": "circle", "width": 8, "height": 8}
            ]
        }"#;
        let config = Config::from_str_with_format(json, ConfigFormat::Json).unwrap();
        let table = config.rule_table();
        let rules = table.rules();

        assert_eq!(rules[0].label_prefix, "PPI");
        assert_eq!(rules[0].props_path, "Symbol-Views/Equipment-Views/PPI");
        assert_eq!(rules[0].size, Size::new(20.0, 10.0));
        assert_eq!(rules[0].offset.x, 2.0);
        assert_eq!(rules[0].final_prefix, "BTN");

        assert!(rules[1].is_wildcard());
        assert_eq!(rules[1].output_type, "ia.display.view");
        assert_eq!(rules[1].size, Size::new(8.0, 8.0));
        assert_eq!(config.output, OutputSettings::default());
    }

    #[test]
    fn test_unknown_svg_type_is_rejected() {
        let json = r#"{"element_mappings": [{"svg_type": "image"}]}"#;
        let err = Config::from_str_with_format(json, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_validation_names_the_field() {
        let mut config = Config::default();
        config.element_mappings[1].width = Some(0.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("element_mappings[1].width"));

        let mut config = Config::default();
        config.element_mappings[0].x_offset = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.defaults.props_path = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.element_mappings.push(
            RuleEntry::new(SvgElementType::Rect, "FIO")
                .with_props_path("Symbol-Views/Equipment-Views/FIO")
                .with_size(16.0, 12.0),
        );
        config.output.pretty = false;

        let text = config.to_string_with_format(ConfigFormat::Toml).unwrap();
        let parsed = Config::from_str_with_format(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }
}

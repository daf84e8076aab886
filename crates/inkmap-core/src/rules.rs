//! Mapping-rule data types
//!
//! A [`MappingRule`] ties an SVG element type and an optional label prefix to the view
//! component that should be generated for it. Rules live in an ordered [`RuleTable`];
//! list order only breaks ties, the engine computes priority at lookup time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::{Offset, Size};

/// Drawable SVG element types understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgElementType {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    Text,
}

impl SvgElementType {
    pub const ALL: [SvgElementType; 8] = [
        Self::Rect,
        Self::Circle,
        Self::Ellipse,
        Self::Line,
        Self::Polyline,
        Self::Polygon,
        Self::Path,
        Self::Text,
    ];

    /// SVG tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Path => "path",
            Self::Text => "text",
        }
    }

    /// Look up a type by its SVG tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for SvgElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SvgElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim())
            .ok_or_else(|| Error::other(format!("Unknown SVG element type: {}", s)))
    }
}

/// One entry of the rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRule {
    pub svg_type: SvgElementType,
    /// Empty string acts as the default rule for `svg_type`
    #[serde(default)]
    pub label_prefix: String,
    /// Component type written to the output record
    pub output_type: String,
    pub props_path: String,
    pub size: Size,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub final_prefix: String,
    #[serde(default)]
    pub final_suffix: String,
}

impl MappingRule {
    pub fn new(
        svg_type: SvgElementType,
        label_prefix: impl Into<String>,
        output_type: impl Into<String>,
        props_path: impl Into<String>,
        size: Size,
    ) -> Self {
        Self {
            svg_type,
            label_prefix: label_prefix.into(),
            output_type: output_type.into(),
            props_path: props_path.into(),
            size,
            offset: Offset::default(),
            final_prefix: String::new(),
            final_suffix: String::new(),
        }
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Offset::new(x, y);
        self
    }

    pub fn with_final_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.final_prefix = prefix.into();
        self
    }

    pub fn with_final_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.final_suffix = suffix.into();
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.label_prefix.is_empty()
    }
}

/// Ordered, read-only snapshot of the mapping rules for one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<MappingRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<MappingRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = MappingRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Per-element warnings collected during a conversion
//!
//! Problems with a single element never abort a conversion. Each one becomes a [`Warning`]
//! that is logged through `tracing` and returned to the caller alongside the records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a recorded warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A transform function was skipped
    MalformedTransform,
    /// The element's geometry yielded no reference point; the element was dropped
    UnresolvableGeometry,
    /// No rule matched the element's type and prefix; the element was dropped
    NoMatchingRule,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTransform => write!(f, "malformed transform"),
            Self::UnresolvableGeometry => write!(f, "unresolvable geometry"),
            Self::NoMatchingRule => write!(f, "no matching rule"),
        }
    }
}

/// Human-readable diagnostic about one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Id, label, or generated name of the element concerned
    pub element: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.kind, self.element, self.message)
    }
}

/// Warning sink for one conversion
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: WarningKind, element: impl Into<String>, message: impl Into<String>) {
        let warning = Warning {
            kind,
            element: element.into(),
            message: message.into(),
        };
        match kind {
            WarningKind::NoMatchingRule => tracing::debug!("{}", warning),
            _ => tracing::warn!("{}", warning),
        }
        self.warnings.push(warning);
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

//! Conversion pipeline
//!
//! walk -> resolve geometry -> look up rule -> rotation and naming -> record

use inkmap_core::{Result, RuleTable};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::document::Document;
use crate::mapping::{determine_rotation, split_rotation_suffix, strip_label_prefix, RuleIndex};
use crate::output::{OutputBuilder, OutputRecord};
use crate::resolve::{resolve_geometry, ResolvedElement};
use crate::walker::{walk, PrefixSource, WalkedElement};

/// Counters for one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub drawables: usize,
    pub mapped: usize,
    pub unresolvable: usize,
    pub unmatched: usize,
}

/// Result of converting one document
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// One record per mapped element, in document order
    pub records: Vec<OutputRecord>,
    pub warnings: Vec<Warning>,
    pub stats: ConversionStats,
}

impl Conversion {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Name an element before rule decorations: label minus its own prefix and rotation suffix.
fn base_name(element: &WalkedElement<'_>, unsuffixed: &str) -> String {
    let drawable = element.drawable;
    if drawable.label.is_empty() {
        return if drawable.id.is_empty() {
            format!("{}{}", drawable.kind, element.ordinal)
        } else {
            drawable.id.clone()
        };
    }
    let own = match element.prefix_source {
        PrefixSource::Own => element.prefix,
        _ => None,
    };
    let stripped = strip_label_prefix(unsuffixed, own);
    if stripped.is_empty() {
        drawable.label.clone()
    } else {
        stripped.to_string()
    }
}

/// Maps documents against a fixed rule table
#[derive(Debug)]
pub struct Converter<'a> {
    index: RuleIndex<'a>,
}

impl<'a> Converter<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self {
            index: RuleIndex::new(table),
        }
    }

    /// Convert a document. Fails only when the document itself is invalid.
    pub fn convert(&self, document: &Document) -> Result<Conversion> {
        document.validate()?;

        let mut diagnostics = Diagnostics::new();
        let mut stats = ConversionStats::default();
        let mut output = OutputBuilder::new();

        for element in walk(document, &mut diagnostics) {
            stats.drawables += 1;
            let name = element.display_name();

            let geometry = match resolve_geometry(element.drawable) {
                Ok(geometry) => geometry,
                Err(e) => {
                    stats.unresolvable += 1;
                    diagnostics.push(WarningKind::UnresolvableGeometry, name, e.to_string());
                    continue;
                }
            };

            let Some(matched) = self.index.lookup(element.kind(), element.prefix) else {
                stats.unmatched += 1;
                let message = match element.prefix {
                    Some(prefix) => format!("no {} rule for prefix '{}'", element.kind(), prefix),
                    None => format!("no default {} rule", element.kind()),
                };
                diagnostics.push(WarningKind::NoMatchingRule, name, message);
                continue;
            };

            let label = element.drawable.label.as_str();
            let split = split_rotation_suffix(label);
            let (rotation_degrees, rotation_source) = determine_rotation(
                split.map(|(_, suffix)| suffix),
                element.direct_rotation,
                &element.matrix,
            );

            let resolved = ResolvedElement {
                element_type: element.kind(),
                id: element.drawable.id.clone(),
                label: element.drawable.label.clone(),
                composed_matrix: element.matrix,
                reference: geometry.reference,
                extent: geometry.extent,
                rotation_degrees,
                rotation_source,
                prefix: element.prefix.map(str::to_string),
                prefix_source: element.prefix_source,
                base_name: base_name(&element, split.map_or(label, |(base, _)| base)),
            };
            tracing::debug!(
                element = %name,
                rotation = ?resolved.rotation_source,
                exact = matched.exact,
                "resolved element"
            );
            output.push(&resolved, &matched);
            stats.mapped += 1;
        }

        tracing::info!(
            drawables = stats.drawables,
            mapped = stats.mapped,
            unresolvable = stats.unresolvable,
            unmatched = stats.unmatched,
            warnings = diagnostics.warnings().len(),
            "Conversion complete"
        );

        Ok(Conversion {
            records: output.finish(),
            warnings: diagnostics.into_warnings(),
            stats,
        })
    }
}

/// Convert `document` against `table` in one call.
pub fn convert(document: &Document, table: &RuleTable) -> Result<Conversion> {
    Converter::new(table).convert(document)
}

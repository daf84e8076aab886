//! Output records
//!
//! [`OutputRecord`] is the engine's result type. [`ViewComponent`] is the shape the
//! downstream view configuration expects, produced by [`to_view_components`]:
//!
//! ```json
//! {
//!   "type": "ia.display.view",
//!   "position": { "x": 100, "y": 50, "width": 14, "height": 14,
//!                 "rotate": { "angle": "90deg", "anchor": "50% 50%" } },
//!   "props": { "path": "Symbol-Views/Equipment-Views/Status" },
//!   "meta": { "id": "rect12", "name": "Conveyor1", "originalName": "PPI_Conveyor1_d" }
//! }
//! ```
//!
//! `rotate` is only written for a non-zero rotation.

use inkmap_core::Result;
use serde::{Deserialize, Serialize};

use crate::mapping::{decorate_name, RuleMatch};
use crate::resolve::ResolvedElement;

/// Placement of one component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub id: String,
    pub final_name: String,
    pub original_label: String,
    /// Derived label prefix, own or inherited, whichever rule matched
    pub element_prefix: Option<String>,
    /// Prefix of the matched rule, `None` when the default rule was used
    pub matched_prefix: Option<String>,
    pub applied_final_prefix: Option<String>,
    pub applied_final_suffix: Option<String>,
}

/// One mapped element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    #[serde(rename = "type")]
    pub component_type: String,
    pub position: Position,
    pub props_path: String,
    pub meta: RecordMeta,
}

/// Build the record for a resolved element and the rule it matched.
pub fn build_record(element: &ResolvedElement, matched: &RuleMatch<'_>) -> OutputRecord {
    let rule = matched.rule;
    let center = element.transformed_reference();
    let name = decorate_name(&element.base_name, rule);

    OutputRecord {
        component_type: rule.output_type.clone(),
        position: Position {
            x: center.x - rule.size.width / 2.0 + rule.offset.x,
            y: center.y - rule.size.height / 2.0 + rule.offset.y,
            width: rule.size.width,
            height: rule.size.height,
            rotation_degrees: element.rotation_degrees,
        },
        props_path: rule.props_path.clone(),
        meta: RecordMeta {
            id: element.id.clone(),
            final_name: name.name,
            original_label: element.label.clone(),
            element_prefix: element.prefix.clone(),
            matched_prefix: matched.exact.then(|| rule.label_prefix.clone()),
            applied_final_prefix: name.applied_prefix,
            applied_final_suffix: name.applied_suffix,
        },
    }
}

/// Accumulates records in the order elements are mapped
#[derive(Debug, Default)]
pub struct OutputBuilder {
    records: Vec<OutputRecord>,
}

impl OutputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: &ResolvedElement, matched: &RuleMatch<'_>) -> &OutputRecord {
        let record = build_record(element, matched);
        tracing::debug!(
            name = %record.meta.final_name,
            x = record.position.x,
            y = record.position.y,
            rotation = record.position.rotation_degrees,
            extent = ?element.extent,
            "mapped {} to {}",
            element.element_type,
            record.component_type
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> Vec<OutputRecord> {
        self.records
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRotation {
    pub angle: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<ViewRotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewProps {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMeta {
    pub id: String,
    pub name: String,
    pub original_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_prefix_applied: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_suffix_applied: Option<String>,
}

/// Downstream view component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewComponent {
    #[serde(rename = "type")]
    pub component_type: String,
    pub position: ViewPosition,
    pub props: ViewProps,
    pub meta: ViewMeta,
}

impl From<&OutputRecord> for ViewComponent {
    fn from(record: &OutputRecord) -> Self {
        let rotation = record.position.rotation_degrees;
        Self {
            component_type: record.component_type.clone(),
            position: ViewPosition {
                x: record.position.x,
                y: record.position.y,
                width: record.position.width,
                height: record.position.height,
                rotate: (rotation != 0.0).then(|| ViewRotation {
                    angle: format!("{}deg", rotation),
                    anchor: "50% 50%".to_string(),
                }),
            },
            props: ViewProps {
                path: record.props_path.clone(),
            },
            meta: ViewMeta {
                id: record.meta.id.clone(),
                name: record.meta.final_name.clone(),
                original_name: if record.meta.original_label.is_empty() {
                    record.meta.final_name.clone()
                } else {
                    record.meta.original_label.clone()
                },
                element_prefix: record.meta.element_prefix.clone(),
                final_prefix_applied: record.meta.applied_final_prefix.clone(),
                final_suffix_applied: record.meta.applied_final_suffix.clone(),
            },
        }
    }
}

pub fn to_view_components(records: &[OutputRecord]) -> Vec<ViewComponent> {
    records.iter().map(ViewComponent::from).collect()
}

/// Serialize records as a JSON array of view components.
pub fn to_json_string(records: &[OutputRecord], pretty: bool) -> Result<String> {
    let components = to_view_components(records);
    let json = if pretty {
        serde_json::to_string_pretty(&components)?
    } else {
        serde_json::to_string(&components)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::RotationSource;
    use crate::walker::PrefixSource;
    use inkmap_core::{AffineMatrix, MappingRule, Point, Size, SvgElementType};

    fn element(matrix: AffineMatrix, rotation: f64) -> ResolvedElement {
        ResolvedElement {
            element_type: SvgElementType::Rect,
            id: "rect1".to_string(),
            label: "PPI_Conveyor1".to_string(),
            composed_matrix: matrix,
            reference: Point::new(7.0, 7.0),
            extent: Some(Size::new(14.0, 14.0)),
            rotation_degrees: rotation,
            rotation_source: RotationSource::Default,
            prefix: Some("PPI".to_string()),
            prefix_source: PrefixSource::Own,
            base_name: "Conveyor1".to_string(),
        }
    }

    fn rule() -> MappingRule {
        MappingRule::new(
            SvgElementType::Rect,
            "PPI",
            "ia.display.view",
            "Symbol-Views/Equipment-Views/PPI",
            Size::new(14.0, 14.0),
        )
    }

    #[test]
    fn test_position_centers_then_offsets() {
        let rule = rule().with_offset(2.0, -3.0);
        let matched = RuleMatch {
            rule: &rule,
            exact: true,
        };
        let record = build_record(&element(AffineMatrix::translate(100.0, 50.0), 0.0), &matched);
        assert_eq!(record.position.x, 102.0);
        assert_eq!(record.position.y, 47.0);
        assert_eq!(record.position.width, 14.0);
        assert_eq!(record.meta.matched_prefix.as_deref(), Some("PPI"));
        assert_eq!(record.meta.final_name, "Conveyor1");
        assert_eq!(record.props_path, "Symbol-Views/Equipment-Views/PPI");
    }

    #[test]
    fn test_wildcard_match_keeps_element_prefix() {
        let mut rule = rule();
        rule.label_prefix.clear();
        let matched = RuleMatch {
            rule: &rule,
            exact: false,
        };
        let mut fio = element(AffineMatrix::IDENTITY, 0.0);
        fio.label = "FIO_Pump".to_string();
        fio.prefix = Some("FIO".to_string());
        let record = build_record(&fio, &matched);
        assert_eq!(record.meta.matched_prefix, None);
        assert_eq!(record.meta.element_prefix.as_deref(), Some("FIO"));

        let view = ViewComponent::from(&record);
        assert_eq!(view.meta.element_prefix.as_deref(), Some("FIO"));
    }

    #[test]
    fn test_builder_preserves_order() {
        let rule = rule();
        let matched = RuleMatch {
            rule: &rule,
            exact: true,
        };
        let mut builder = OutputBuilder::new();
        for i in 0..3 {
            let mut e = element(AffineMatrix::IDENTITY, 0.0);
            e.id = format!("rect{i}");
            builder.push(&e, &matched);
        }
        assert_eq!(builder.len(), 3);
        let ids: Vec<_> = builder.finish().into_iter().map(|r| r.meta.id).collect();
        assert_eq!(ids, vec!["rect0", "rect1", "rect2"]);
    }

    #[test]
    fn test_view_component_json_shape() {
        let rule = rule().with_final_prefix("BTN");
        let matched = RuleMatch {
            rule: &rule,
            exact: true,
        };
        let rotated = build_record(&element(AffineMatrix::IDENTITY, 90.0), &matched);
        let flat = build_record(&element(AffineMatrix::IDENTITY, 0.0), &matched);

        let json: serde_json::Value =
            serde_json::from_str(&to_json_string(&[rotated, flat], false).unwrap()).unwrap();

        assert_eq!(json[0]["type"], "ia.display.view");
        assert_eq!(json[0]["position"]["rotate"]["angle"], "90deg");
        assert_eq!(json[0]["position"]["rotate"]["anchor"], "50% 50%");
        assert_eq!(json[0]["props"]["path"], "Symbol-Views/Equipment-Views/PPI");
        assert_eq!(json[0]["meta"]["name"], "BTN_Conveyor1");
        assert_eq!(json[0]["meta"]["originalName"], "PPI_Conveyor1");
        assert_eq!(json[0]["meta"]["elementPrefix"], "PPI");
        assert_eq!(json[0]["meta"]["finalPrefixApplied"], "BTN");
        assert!(json[0]["meta"].get("finalSuffixApplied").is_none());
        assert!(json[1]["position"].get("rotate").is_none());
    }

    #[test]
    fn test_view_components_deserialize() {
        let rule = rule();
        let matched = RuleMatch {
            rule: &rule,
            exact: true,
        };
        let record = build_record(&element(AffineMatrix::IDENTITY, 0.0), &matched);
        let json = to_json_string(std::slice::from_ref(&record), true).unwrap();
        let parsed: Vec<ViewComponent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, to_view_components(&[record]));
    }
}

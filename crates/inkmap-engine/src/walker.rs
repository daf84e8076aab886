//! Document traversal
//!
//! Visits every drawable in document (pre-)order, carrying the accumulated transform and the
//! label context inherited from enclosing containers. The traversal uses an explicit stack,
//! so nesting depth is bounded only by memory.

use inkmap_core::{compose, AffineMatrix, SvgElementType};
use std::collections::HashMap;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::document::{Document, DocumentNode, Drawable};
use crate::transform::{direct_rotation, parse_transform};

/// Leading token of a label, up to the first underscore.
///
/// `"PPI_Conveyor1_d"` has prefix `"PPI"`; a label without an underscore (or starting with
/// one) has no prefix token.
pub fn label_prefix(label: &str) -> Option<&str> {
    label
        .split_once('_')
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
}

/// Context a container hands down to unprefixed descendants
fn container_context(label: &str) -> Option<&str> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(label_prefix(label).unwrap_or(label))
}

/// Where an element's derived prefix came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixSource {
    /// Leading token of the element's own label
    Own,
    /// Nearest labelled ancestor container
    Inherited,
    None,
}

/// A drawable together with everything inherited from its ancestors
#[derive(Debug, Clone)]
pub struct WalkedElement<'a> {
    pub drawable: &'a Drawable,
    /// Ancestor transforms composed with the element's own
    pub matrix: AffineMatrix,
    /// Angle read directly from the element's own `transform`, when unambiguous
    pub direct_rotation: Option<f64>,
    pub prefix: Option<&'a str>,
    pub prefix_source: PrefixSource,
    /// 1-based position among drawables of the same type, in document order
    pub ordinal: usize,
}

impl WalkedElement<'_> {
    pub fn kind(&self) -> SvgElementType {
        self.drawable.kind
    }

    /// Name used in diagnostics: id, then label, then `<type><ordinal>`.
    pub fn display_name(&self) -> String {
        if !self.drawable.id.is_empty() {
            self.drawable.id.clone()
        } else if !self.drawable.label.is_empty() {
            self.drawable.label.clone()
        } else {
            format!("{}{}", self.drawable.kind, self.ordinal)
        }
    }
}

fn compose_own(
    inherited: &AffineMatrix,
    transform: Option<&str>,
    owner: &str,
    diagnostics: &mut Diagnostics,
) -> AffineMatrix {
    let Some(transform) = transform else {
        return *inherited;
    };
    let parsed = parse_transform(transform);
    for error in &parsed.errors {
        diagnostics.push(WarningKind::MalformedTransform, owner, error.to_string());
    }
    compose(inherited, &parsed.matrix())
}

/// Walk `document` and return its drawables in document order.
///
/// Malformed transform functions on containers and drawables are reported to `diagnostics`.
pub fn walk<'a>(document: &'a Document, diagnostics: &mut Diagnostics) -> Vec<WalkedElement<'a>> {
    let mut elements = Vec::new();
    let mut ordinals: HashMap<SvgElementType, usize> = HashMap::new();
    let mut stack: Vec<(&'a DocumentNode, AffineMatrix, Option<&'a str>)> =
        vec![(&document.root, AffineMatrix::IDENTITY, None)];

    while let Some((node, inherited, context)) = stack.pop() {
        match node {
            DocumentNode::Container(container) => {
                let owner = if container.id.is_empty() {
                    "group"
                } else {
                    container.id.as_str()
                };
                let matrix =
                    compose_own(&inherited, container.transform.as_deref(), owner, diagnostics);
                let context = container
                    .label
                    .as_deref()
                    .and_then(container_context)
                    .or(context);
                // reversed so the first child is popped first
                for child in container.children.iter().rev() {
                    stack.push((child, matrix, context));
                }
            }
            DocumentNode::Drawable(drawable) => {
                let ordinal = ordinals.entry(drawable.kind).or_insert(0);
                *ordinal += 1;

                let (prefix, prefix_source) = match (label_prefix(&drawable.label), context) {
                    (Some(own), _) => (Some(own), PrefixSource::Own),
                    (None, Some(inherited)) => (Some(inherited), PrefixSource::Inherited),
                    (None, None) => (None, PrefixSource::None),
                };

                let mut element = WalkedElement {
                    drawable,
                    matrix: inherited,
                    direct_rotation: drawable.transform.as_deref().and_then(direct_rotation),
                    prefix,
                    prefix_source,
                    ordinal: *ordinal,
                };
                let owner = element.display_name();
                element.matrix =
                    compose_own(&inherited, drawable.transform.as_deref(), &owner, diagnostics);

                tracing::trace!(
                    element = %owner,
                    prefix = ?element.prefix,
                    "walked {} element",
                    drawable.kind
                );
                elements.push(element);
            }
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Container;
    use inkmap_core::Point;

    #[test]
    fn test_label_prefix() {
        assert_eq!(label_prefix("PPI_Conveyor1_d"), Some("PPI"));
        assert_eq!(label_prefix("Conveyor1"), None);
        assert_eq!(label_prefix("_hidden"), None);
        assert_eq!(label_prefix(""), None);
        assert_eq!(label_prefix("ppi_x"), Some("ppi"));
    }

    #[test]
    fn test_walk_preorder_and_ordinals() {
        let root = Container::new()
            .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_id("a"))
            .with_child(
                Container::new()
                    .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_id("b"))
                    .with_child(Drawable::circle(0.0, 0.0, 1.0).with_id("c")),
            )
            .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_id("d"));
        let document = Document::new(root).unwrap();
        let mut diagnostics = Diagnostics::new();

        let walked = walk(&document, &mut diagnostics);
        let ids: Vec<_> = walked.iter().map(|e| e.drawable.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        let ordinals: Vec<_> = walked.iter().map(|e| e.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 1, 3]);
    }

    #[test]
    fn test_walk_accumulates_transforms() {
        let root = Container::new().with_transform("translate(100,0)").with_child(
            Container::new()
                .with_transform("scale(2)")
                .with_child(Drawable::rect(0.0, 0.0, 2.0, 2.0).with_transform("translate(0,5)")),
        );
        let document = Document::new(root).unwrap();
        let walked = walk(&document, &mut Diagnostics::new());
        let p = walked[0].matrix.apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(102.0, 12.0));
    }

    #[test]
    fn test_inherited_prefix_context() {
        let root = Container::new().with_label("PPI_Group1").with_child(
            Container::new()
                .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_label("Motor7"))
                .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_label("FIO_Motor8"))
                .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0)),
        );
        let document = Document::new(root).unwrap();
        let walked = walk(&document, &mut Diagnostics::new());

        assert_eq!(walked[0].prefix, Some("PPI"));
        assert_eq!(walked[0].prefix_source, PrefixSource::Inherited);
        assert_eq!(walked[1].prefix, Some("FIO"));
        assert_eq!(walked[1].prefix_source, PrefixSource::Own);
        assert_eq!(walked[2].prefix, Some("PPI"));
    }

    #[test]
    fn test_nearest_container_wins_and_context_pops() {
        let root = Container::new()
            .with_child(
                Container::new()
                    .with_label("Outer")
                    .with_child(
                        Container::new()
                            .with_label("Inner_x")
                            .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0)),
                    )
                    .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0)),
            )
            .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0));
        let document = Document::new(root).unwrap();
        let walked = walk(&document, &mut Diagnostics::new());

        assert_eq!(walked[0].prefix, Some("Inner"));
        assert_eq!(walked[1].prefix, Some("Outer"));
        assert_eq!(walked[2].prefix, None);
        assert_eq!(walked[2].prefix_source, PrefixSource::None);
    }

    #[test]
    fn test_malformed_transforms_are_reported() {
        let root = Container::new()
            .with_id("layer1")
            .with_transform("skewY(10)")
            .with_child(
                Drawable::rect(0.0, 0.0, 1.0, 1.0)
                    .with_id("r1")
                    .with_transform("translate(1,2) bogus(3)"),
            );
        let document = Document::new(root).unwrap();
        let mut diagnostics = Diagnostics::new();
        let walked = walk(&document, &mut diagnostics);

        assert_eq!(diagnostics.count(WarningKind::MalformedTransform), 2);
        assert_eq!(diagnostics.warnings()[0].element, "layer1");
        assert_eq!(diagnostics.warnings()[1].element, "r1");
        // the valid part still applies
        assert_eq!(walked[0].matrix, AffineMatrix::translate(1.0, 2.0));
    }

    #[test]
    fn test_direct_rotation_is_captured() {
        let root = Container::new()
            .with_child(Drawable::rect(0.0, 0.0, 1.0, 1.0).with_transform("rotate(30)"))
            .with_child(
                Drawable::rect(0.0, 0.0, 1.0, 1.0).with_transform("translate(1,1) rotate(30)"),
            );
        let document = Document::new(root).unwrap();
        let walked = walk(&document, &mut Diagnostics::new());
        assert_eq!(walked[0].direct_rotation, Some(30.0));
        assert_eq!(walked[1].direct_rotation, None);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let mut node = Container::new().with_child(Drawable::circle(0.0, 0.0, 1.0));
        for _ in 0..20_000 {
            node = Container::new().with_child(node);
        }
        let document = Document::new(node).unwrap();
        let walked = walk(&document, &mut Diagnostics::new());
        assert_eq!(walked.len(), 1);
        // the tree's own drop is recursive; leak it rather than overflow the test thread
        std::mem::forget(document);
    }
}

//! SVG import
//!
//! Builds a [`Document`] from Inkscape SVG markup with `roxmltree`. Group-like elements
//! (`g`, nested `svg`, `a`, `switch`) become containers and the supported shapes become
//! drawables. Everything else (`defs`, `metadata`, `style`, `sodipodi:namedview`, ...) is
//! skipped together with its subtree.

use inkmap_core::{Error, Result, SvgElementType};
use roxmltree::Node;

use crate::document::{Container, Document, DocumentNode, Drawable};
use crate::numbers::leading_number;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

const GEOMETRY_ATTRIBUTES: &[&str] = &[
    "x", "y", "width", "height", "cx", "cy", "r", "rx", "ry", "x1", "y1", "x2", "y2", "points",
    "d",
];

fn is_container_tag(tag: &str) -> bool {
    matches!(tag, "g" | "svg" | "a" | "switch")
}

/// Inkscape layers are groups too, but their names are not label context
fn is_layer(node: Node<'_, '_>) -> bool {
    node.attribute((INKSCAPE_NS, "groupmode")) == Some("layer")
}

fn in_svg_namespace(node: Node<'_, '_>) -> bool {
    matches!(node.tag_name().namespace(), None | Some(SVG_NS))
}

fn build_drawable(node: Node<'_, '_>, kind: SvgElementType) -> Drawable {
    let mut drawable = Drawable::new(kind)
        .with_id(node.attribute("id").unwrap_or_default())
        .with_label(node.attribute((INKSCAPE_NS, "label")).unwrap_or_default());
    if let Some(transform) = node.attribute("transform") {
        drawable = drawable.with_transform(transform);
    }
    for name in GEOMETRY_ATTRIBUTES {
        if let Some(value) = node.attribute(*name) {
            drawable = drawable.with_attr(*name, value);
        }
    }
    drawable
}

fn build_container(node: Node<'_, '_>) -> Container {
    let mut container = Container::new().with_id(node.attribute("id").unwrap_or_default());
    if !is_layer(node) {
        if let Some(label) = node.attribute((INKSCAPE_NS, "label")) {
            container = container.with_label(label);
        }
    }
    if let Some(transform) = node.attribute("transform") {
        container = container.with_transform(transform);
    }
    for child in node.children().filter(|n| n.is_element()) {
        if let Some(built) = build_node(child) {
            container.push(built);
        }
    }
    container
}

fn build_node(node: Node<'_, '_>) -> Option<DocumentNode> {
    if !in_svg_namespace(node) {
        return None;
    }
    let tag = node.tag_name().name();
    if is_container_tag(tag) {
        return Some(build_container(node).into());
    }
    match SvgElementType::from_tag(tag) {
        Some(kind) => Some(build_drawable(node, kind).into()),
        None => {
            tracing::trace!("skipping <{}>", tag);
            None
        }
    }
}

/// Parse SVG markup into a [`Document`].
///
/// Fails with [`Error::InvalidDocument`] on malformed XML or when the root element is not
/// `<svg>`.
pub fn parse_svg(svg: &str) -> Result<Document> {
    let xml = roxmltree::Document::parse(svg)
        .map_err(|e| Error::invalid_document(format!("malformed SVG: {}", e)))?;
    let root = xml.root_element();
    if root.tag_name().name() != "svg" || !in_svg_namespace(root) {
        return Err(Error::invalid_document(format!(
            "expected <svg> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut document = Document::new(build_container(root))?;
    document.width = root.attribute("width").and_then(leading_number);
    document.height = root.attribute("height").and_then(leading_number);

    tracing::debug!(
        drawables = document.drawable_count(),
        width = ?document.width,
        height = ?document.height,
        "Parsed SVG document"
    );
    Ok(document)
}

//! In-memory drawing tree
//!
//! A [`Document`] is an owned tree of [`DocumentNode`]s. Containers (SVG groups) carry a
//! transform and an optional label that children inherit; drawables carry their raw
//! geometry attributes exactly as they appeared in the source markup.

use inkmap_core::{Error, Result, SvgElementType};
use std::collections::BTreeMap;

/// Group-like node whose transform and label context apply to its children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub id: String,
    /// Label whose leading token becomes the fallback prefix of unprefixed children
    pub label: Option<String>,
    pub transform: Option<String>,
    pub children: Vec<DocumentNode>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<DocumentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<DocumentNode>) {
        self.children.push(child.into());
    }
}

/// Leaf shape
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub kind: SvgElementType,
    pub id: String,
    /// Author-assigned name, empty when the shape was never labelled
    pub label: String,
    pub transform: Option<String>,
    /// Raw geometry attributes (`x`, `cx`, `points`, `d`, ...)
    pub attributes: BTreeMap<String, String>,
}

impl Drawable {
    pub fn new(kind: SvgElementType) -> Self {
        Self {
            kind,
            id: String::new(),
            label: String::new(),
            transform: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(SvgElementType::Rect)
            .with_attr("x", x.to_string())
            .with_attr("y", y.to_string())
            .with_attr("width", width.to_string())
            .with_attr("height", height.to_string())
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(SvgElementType::Circle)
            .with_attr("cx", cx.to_string())
            .with_attr("cy", cy.to_string())
            .with_attr("r", r.to_string())
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::new(SvgElementType::Path).with_attr("d", d)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A node of the drawing tree
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Container(Container),
    Drawable(Drawable),
}

impl DocumentNode {
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Number of drawables in this subtree.
    pub fn drawable_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Container(c) => stack.extend(c.children.iter()),
                Self::Drawable(_) => count += 1,
            }
        }
        count
    }
}

impl From<Container> for DocumentNode {
    fn from(container: Container) -> Self {
        Self::Container(container)
    }
}

impl From<Drawable> for DocumentNode {
    fn from(drawable: Drawable) -> Self {
        Self::Drawable(drawable)
    }
}

/// Parsed drawing handed to the converter
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: DocumentNode,
    /// Canvas width from the source document, when declared
    pub width: Option<f64>,
    /// Canvas height from the source document, when declared
    pub height: Option<f64>,
}

impl Document {
    /// Wrap a root node, rejecting trees that are not rooted at a container.
    pub fn new(root: impl Into<DocumentNode>) -> Result<Self> {
        let document = Self {
            root: root.into(),
            width: None,
            height: None,
        };
        document.validate()?;
        Ok(document)
    }

    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Structural check run before every conversion.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_container() {
            return Err(Error::invalid_document(
                "document root must be a container, found a drawable",
            ));
        }
        Ok(())
    }

    pub fn drawable_count(&self) -> usize {
        self.root.drawable_count()
    }
}

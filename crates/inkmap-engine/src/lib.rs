//! # Inkmap Engine
//!
//! Turns labelled SVG drawings into positioned view-component records.
//!
//! The pipeline walks a [`Document`] in document order, composes every ancestor transform,
//! resolves a reference point per element, selects a [`MappingRule`](inkmap_core::MappingRule)
//! by element type and label prefix, and emits one [`OutputRecord`] per mapped element.
//! Problems with individual elements are collected as [`Warning`]s; only a structurally
//! invalid document fails a conversion.
//!
//! ```no_run
//! use inkmap_core::RuleTable;
//! use inkmap_engine::{convert, parse_svg, to_json_string};
//!
//! # fn run(svg: &str, rules: &RuleTable) -> inkmap_core::Result<()> {
//! let document = parse_svg(svg)?;
//! let conversion = convert(&document, rules)?;
//! println!("{}", to_json_string(&conversion.records, true)?);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod diagnostics;
pub mod document;
pub mod import;
pub mod mapping;
pub mod numbers;
pub mod output;
pub mod resolve;
pub mod transform;
pub mod walker;

pub use convert::{convert, Conversion, ConversionStats, Converter};
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use document::{Container, Document, DocumentNode, Drawable};
pub use import::parse_svg;
pub use mapping::{RotationSource, RotationSuffix, RuleIndex, RuleMatch};
pub use output::{
    build_record, to_json_string, to_view_components, OutputBuilder, OutputRecord, Position,
    RecordMeta, ViewComponent,
};
pub use resolve::{resolve_geometry, ElementGeometry, ResolvedElement};
pub use transform::{direct_rotation, parse_transform, ParsedTransform, TransformOp};
pub use walker::{label_prefix, walk, PrefixSource, WalkedElement};

//! # Inkmap Core
//!
//! Core types and utilities for Inkmap.
//! Provides the affine geometry kernel, the mapping-rule data model shared by the
//! settings and engine crates, and the error taxonomy.

pub mod error;
pub mod geometry;
pub mod rules;

pub use error::{Error, GeometryError, Result, TransformError};

pub use geometry::{
    apply_to_point, compose, normalize_degrees, rotation_from_matrix, AffineMatrix, Offset,
    Point, Size,
};

pub use rules::{MappingRule, RuleTable, SvgElementType};

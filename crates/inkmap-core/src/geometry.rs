//! 2-D affine geometry
//!
//! [`AffineMatrix`] stores the six coefficients of an SVG transform matrix:
//!
//! ```text
//! | a  c  e |     x' = a*x + c*y + e
//! | b  d  f |     y' = b*x + d*y + f
//! | 0  0  1 |
//! ```
//!
//! Composition follows the SVG transform-list convention: `compose(parent, local)` is the
//! product `parent * local`, so folding a list left to right with `compose` yields the
//! matrix of the whole list.

use serde::{Deserialize, Serialize};

/// Coefficients below this magnitude are treated as zero when recovering rotation.
const DEGENERATE_EPSILON: f64 = 1e-6;

/// A 2-D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Arithmetic mean of a set of points, `None` when the set is empty.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Width and height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Axis-aligned extent of a set of points.
    pub fn bounding(points: &[Point]) -> Option<Size> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Size::new(max_x - min_x, max_y - min_y))
    }
}

/// Translation applied after centering
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Immutable 2x3 affine matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, angle in degrees (positive is clockwise in SVG's y-down space).
    pub fn rotate(angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about `(cx, cy)`: `translate(cx, cy) * rotate(angle) * translate(-cx, -cy)`.
    pub fn rotate_about(angle_deg: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .then(&Self::rotate(angle_deg))
            .then(&Self::translate(-cx, -cy))
    }

    /// `self * local`. Method form of [`compose`].
    pub fn then(&self, local: &AffineMatrix) -> AffineMatrix {
        AffineMatrix {
            a: self.a * local.a + self.c * local.b,
            b: self.b * local.a + self.d * local.b,
            c: self.a * local.c + self.c * local.d,
            d: self.b * local.c + self.d * local.d,
            e: self.a * local.e + self.c * local.f + self.e,
            f: self.b * local.e + self.d * local.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &AffineMatrix, epsilon: f64) -> bool {
        (self.a - other.a).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.c - other.c).abs() <= epsilon
            && (self.d - other.d).abs() <= epsilon
            && (self.e - other.e).abs() <= epsilon
            && (self.f - other.f).abs() <= epsilon
    }
}

/// Compose a parent transform with a local one (`parent * local`).
pub fn compose(parent: &AffineMatrix, local: &AffineMatrix) -> AffineMatrix {
    parent.then(local)
}

pub fn apply_to_point(m: &AffineMatrix, p: Point) -> Point {
    m.apply(p)
}

/// Estimate rotation from a matrix as `atan2(b, a)` in degrees within `[0, 360)`.
///
/// Only exact for matrices without skew or non-uniform scale. Returns `None` for a
/// degenerate matrix whose first column is (near) zero.
pub fn rotation_from_matrix(m: &AffineMatrix) -> Option<f64> {
    if m.a.abs() < DEGENERATE_EPSILON && m.b.abs() < DEGENERATE_EPSILON {
        return None;
    }
    Some(normalize_degrees(m.b.atan2(m.a).to_degrees()))
}

/// Map any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

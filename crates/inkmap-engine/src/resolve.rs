//! Element geometry resolution
//!
//! Derives a single pre-transform reference point for each drawable type:
//!
//! | type              | reference point                     | extent              |
//! |-------------------|-------------------------------------|---------------------|
//! | rect              | center of `x,y,width,height`        | `width x height`    |
//! | circle            | `cx,cy`                             | `2r x 2r`           |
//! | ellipse           | `cx,cy`                             | `2rx x 2ry`         |
//! | line              | midpoint of the endpoints           | `|dx| x |dy|`       |
//! | polyline, polygon | centroid of `points`                | bounding box        |
//! | path              | centroid of the numbers in `d`      | bounding box        |
//! | text              | anchor `x,y`                        | none                |
//!
//! Missing scalar attributes fall back to the SVG default of 0. A present attribute that is
//! not a number makes the element unresolvable.

use inkmap_core::{AffineMatrix, GeometryError, Point, Size, SvgElementType};

use crate::document::Drawable;
use crate::mapping::RotationSource;
use crate::numbers::{leading_number, parse_length, scan_points};
use crate::walker::PrefixSource;

/// Geometry recovered from a drawable's attributes, before any transform
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGeometry {
    pub reference: Point,
    pub extent: Option<Size>,
}

impl ElementGeometry {
    fn at(reference: Point, extent: Option<Size>) -> Self {
        Self { reference, extent }
    }

    fn from_coordinates(coordinates: &[Point], attribute: &str) -> Result<Self, GeometryError> {
        let reference =
            Point::centroid(coordinates).ok_or_else(|| GeometryError::NoCoordinates {
                attribute: attribute.to_string(),
            })?;
        Ok(Self::at(reference, Size::bounding(coordinates)))
    }
}

/// A drawable with its transform, rotation, and naming inputs fully resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement {
    pub element_type: SvgElementType,
    pub id: String,
    /// Label as authored, empty when unlabelled
    pub label: String,
    pub composed_matrix: AffineMatrix,
    /// Reference point before `composed_matrix` is applied
    pub reference: Point,
    pub extent: Option<Size>,
    pub rotation_degrees: f64,
    pub rotation_source: RotationSource,
    pub prefix: Option<String>,
    pub prefix_source: PrefixSource,
    /// Name stripped of its prefix and rotation suffix, before rule decorations
    pub base_name: String,
}

impl ResolvedElement {
    /// Reference point in document coordinates.
    pub fn transformed_reference(&self) -> Point {
        self.composed_matrix.apply(self.reference)
    }
}

fn scalar(drawable: &Drawable, attribute: &str) -> Result<f64, GeometryError> {
    match drawable.attr(attribute) {
        None => Ok(0.0),
        Some(raw) => parse_length(raw).ok_or_else(|| GeometryError::InvalidNumber {
            attribute: attribute.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn anchor(drawable: &Drawable, attribute: &str) -> Result<f64, GeometryError> {
    let raw = drawable
        .attr(attribute)
        .ok_or_else(|| GeometryError::MissingAttribute {
            attribute: attribute.to_string(),
        })?;
    leading_number(raw).ok_or_else(|| GeometryError::InvalidNumber {
        attribute: attribute.to_string(),
        value: raw.to_string(),
    })
}

fn coordinate_list(drawable: &Drawable, attribute: &str) -> Result<ElementGeometry, GeometryError> {
    let raw = drawable.attr(attribute).unwrap_or_default();
    ElementGeometry::from_coordinates(&scan_points(raw), attribute)
}

/// Resolve the reference point of a drawable.
pub fn resolve_geometry(drawable: &Drawable) -> Result<ElementGeometry, GeometryError> {
    match drawable.kind {
        SvgElementType::Rect => {
            let x = scalar(drawable, "x")?;
            let y = scalar(drawable, "y")?;
            let width = scalar(drawable, "width")?;
            let height = scalar(drawable, "height")?;
            Ok(ElementGeometry::at(
                Point::new(x + width / 2.0, y + height / 2.0),
                Some(Size::new(width, height)),
            ))
        }
        SvgElementType::Circle => {
            let r = scalar(drawable, "r")?;
            Ok(ElementGeometry::at(
                Point::new(scalar(drawable, "cx")?, scalar(drawable, "cy")?),
                Some(Size::new(2.0 * r, 2.0 * r)),
            ))
        }
        SvgElementType::Ellipse => {
            let rx = scalar(drawable, "rx")?;
            let ry = scalar(drawable, "ry")?;
            Ok(ElementGeometry::at(
                Point::new(scalar(drawable, "cx")?, scalar(drawable, "cy")?),
                Some(Size::new(2.0 * rx, 2.0 * ry)),
            ))
        }
        SvgElementType::Line => {
            let start = Point::new(scalar(drawable, "x1")?, scalar(drawable, "y1")?);
            let end = Point::new(scalar(drawable, "x2")?, scalar(drawable, "y2")?);
            Ok(ElementGeometry::at(
                start.midpoint(end),
                Some(Size::new((end.x - start.x).abs(), (end.y - start.y).abs())),
            ))
        }
        SvgElementType::Polyline | SvgElementType::Polygon => coordinate_list(drawable, "points"),
        SvgElementType::Path => coordinate_list(drawable, "d"),
        SvgElementType::Text => Ok(ElementGeometry::at(
            Point::new(anchor(drawable, "x")?, anchor(drawable, "y")?),
            None,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(drawable: &Drawable) -> Point {
        resolve_geometry(drawable).unwrap().reference
    }

    #[test]
    fn test_rect_center() {
        let geometry = resolve_geometry(&Drawable::rect(10.0, 20.0, 30.0, 40.0)).unwrap();
        assert_eq!(geometry.reference, Point::new(25.0, 40.0));
        assert_eq!(geometry.extent, Some(Size::new(30.0, 40.0)));
    }

    #[test]
    fn test_rect_missing_attributes_default_to_zero() {
        let rect = Drawable::new(SvgElementType::Rect).with_attr("width", "14");
        assert_eq!(reference(&rect), Point::new(7.0, 0.0));
    }

    #[test]
    fn test_rect_invalid_number() {
        let rect = Drawable::rect(0.0, 0.0, 1.0, 1.0).with_attr("width", "wide");
        assert_eq!(
            resolve_geometry(&rect),
            Err(GeometryError::InvalidNumber {
                attribute: "width".to_string(),
                value: "wide".to_string()
            })
        );
    }

    #[test]
    fn test_circle_and_ellipse() {
        let circle = resolve_geometry(&Drawable::circle(5.0, 6.0, 2.0)).unwrap();
        assert_eq!(circle.reference, Point::new(5.0, 6.0));
        assert_eq!(circle.extent, Some(Size::new(4.0, 4.0)));

        let ellipse = Drawable::new(SvgElementType::Ellipse)
            .with_attr("cx", "1")
            .with_attr("cy", "2")
            .with_attr("rx", "3")
            .with_attr("ry", "4");
        let geometry = resolve_geometry(&ellipse).unwrap();
        assert_eq!(geometry.reference, Point::new(1.0, 2.0));
        assert_eq!(geometry.extent, Some(Size::new(6.0, 8.0)));
    }

    #[test]
    fn test_line_midpoint() {
        let line = Drawable::new(SvgElementType::Line)
            .with_attr("x1", "0")
            .with_attr("y1", "10")
            .with_attr("x2", "20")
            .with_attr("y2", "0");
        let geometry = resolve_geometry(&line).unwrap();
        assert_eq!(geometry.reference, Point::new(10.0, 5.0));
        assert_eq!(geometry.extent, Some(Size::new(20.0, 10.0)));
    }

    #[test]
    fn test_polygon_centroid_mixed_separators() {
        let polygon =
            Drawable::new(SvgElementType::Polygon).with_attr("points", "0,0 10 0,10,10 0 10");
        let geometry = resolve_geometry(&polygon).unwrap();
        assert_eq!(geometry.reference, Point::new(5.0, 5.0));
        assert_eq!(geometry.extent, Some(Size::new(10.0, 10.0)));
    }

    #[test]
    fn test_polyline_without_pairs_is_unresolvable() {
        let polyline = Drawable::new(SvgElementType::Polyline).with_attr("points", "3");
        assert_eq!(
            resolve_geometry(&polyline),
            Err(GeometryError::NoCoordinates {
                attribute: "points".to_string()
            })
        );
        let bare = Drawable::new(SvgElementType::Polyline);
        assert!(resolve_geometry(&bare).is_err());
    }

    #[test]
    fn test_path_centroid() {
        assert_eq!(reference(&Drawable::path("M10,20 L30 40")), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_path_drops_dangling_value() {
        assert_eq!(reference(&Drawable::path("M0,0 L10,10 H5")), Point::new(5.0, 5.0));
        assert!(resolve_geometry(&Drawable::path("M5")).is_err());
        assert!(resolve_geometry(&Drawable::path("Z")).is_err());
    }

    #[test]
    fn test_path_compact_numbers() {
        assert_eq!(reference(&Drawable::path("m10-20l.5.5")), Point::new(5.25, -9.75));
    }

    #[test]
    fn test_text_anchor() {
        let text = Drawable::new(SvgElementType::Text)
            .with_attr("x", "12 20 28")
            .with_attr("y", "30");
        let geometry = resolve_geometry(&text).unwrap();
        assert_eq!(geometry.reference, Point::new(12.0, 30.0));
        assert_eq!(geometry.extent, None);

        let unanchored = Drawable::new(SvgElementType::Text).with_attr("x", "4");
        assert_eq!(
            resolve_geometry(&unanchored),
            Err(GeometryError::MissingAttribute {
                attribute: "y".to_string()
            })
        );
    }
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry carried by drawing primitives.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin`/`cos`
use kurbo::{BezPath, Circle, Ellipse, Line, ParamCurveNearest, Point, Rect, Shape};

/// Flattening tolerance used when geometry is converted to paths.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Geometry of a single drawing primitive, in surface coordinates.
///
/// The variants map one-to-one onto the element kinds a retained-mode host
/// (such as an SVG DOM) exposes, so that backends do not need to flatten
/// simple shapes into paths.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A circle.
    Circle(Circle),
    /// An axis-aligned ellipse (or a rotated one, see [`Ellipse::rotation`]).
    Ellipse(Ellipse),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A single straight segment. Lines have no interior and only render
    /// when stroked.
    Line(Line),
    /// A closed polygon through the given vertices.
    Polygon(Box<[Point]>),
    /// An arbitrary path; may contain open subpaths.
    Path(BezPath),
}

impl Geometry {
    /// Create a circle centered at `center`.
    #[inline]
    pub fn circle(center: impl Into<Point>, radius: f64) -> Self {
        Self::Circle(Circle::new(center, radius))
    }

    /// Create a rectangle of `width` × `height` centered at `center`.
    #[inline]
    pub fn centered_rect(center: impl Into<Point>, width: f64, height: f64) -> Self {
        Self::Rect(Rect::from_center_size(center, (width, height)))
    }

    /// Create an axis-aligned ellipse centered at `center`.
    #[inline]
    pub fn ellipse(center: impl Into<Point>, rx: f64, ry: f64) -> Self {
        Self::Ellipse(Ellipse::new(center, (rx, ry), 0.0))
    }

    /// Create a line segment.
    #[inline]
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::Line(Line::new(p0, p1))
    }

    /// Create a polygon from its vertices.
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        Self::Polygon(points.into_iter().collect::<Vec<_>>().into_boxed_slice())
    }

    /// Create a regular polygon with `sides` vertices on a circle of `radius`.
    ///
    /// The first vertex points straight up (towards negative y) and further
    /// vertices follow clockwise in screen space. `sides` below 3 is treated
    /// as 3.
    pub fn regular_polygon(center: impl Into<Point>, radius: f64, sides: u32) -> Self {
        let center = center.into();
        let sides = sides.max(3);
        let step = TAU / f64::from(sides);
        Self::polygon((0..sides).map(|i| polar(center, radius, f64::from(i) * step - PI / 2.0)))
    }

    /// Create a star with `points` spikes, alternating between `outer` and
    /// `inner` radii. The first spike points straight up.
    pub fn star(center: impl Into<Point>, outer: f64, inner: f64, points: u32) -> Self {
        let center = center.into();
        let points = points.max(2);
        let step = PI / f64::from(points);
        Self::polygon((0..points * 2).map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            polar(center, r, f64::from(i) * step - PI / 2.0)
        }))
    }

    /// Returns `true` if the geometry has no interior to fill.
    pub fn is_open(&self) -> bool {
        match self {
            Self::Line(_) => true,
            Self::Path(path) => !path
                .elements()
                .iter()
                .any(|el| matches!(el, kurbo::PathEl::ClosePath)),
            _ => false,
        }
    }

    /// Returns the axis-aligned bounding box.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Circle(c) => c.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
            Self::Rect(r) => *r,
            Self::Line(l) => l.bounding_box(),
            Self::Polygon(points) => polygon_path(points).bounding_box(),
            Self::Path(p) => p.bounding_box(),
        }
    }

    /// Convert to a [`BezPath`], flattening curves with `tolerance`.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Circle(c) => c.to_path(tolerance),
            Self::Ellipse(e) => e.to_path(tolerance),
            Self::Rect(r) => r.to_path(tolerance),
            Self::Line(l) => l.to_path(tolerance),
            Self::Polygon(points) => polygon_path(points),
            Self::Path(p) => p.clone(),
        }
    }

    /// Returns `true` if `pt` lies inside the fill region.
    ///
    /// Open geometry never contains a point.
    pub fn fill_contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(c) => c.contains(pt),
            Self::Ellipse(e) => e.contains(pt),
            Self::Rect(r) => r.contains(pt),
            Self::Line(_) => false,
            Self::Polygon(points) => polygon_path(points).contains(pt),
            Self::Path(p) => !self.is_open() && p.contains(pt),
        }
    }

    /// Returns `true` if `pt` lies within `limit` of the outline.
    pub fn outline_within(&self, pt: Point, limit: f64) -> bool {
        let limit_sq = limit * limit;
        match self {
            Self::Line(l) => l.nearest(pt, 1e-6).distance_sq <= limit_sq,
            _ => self
                .to_path(DEFAULT_TOLERANCE)
                .segments()
                .any(|seg| seg.nearest(pt, 1e-6).distance_sq <= limit_sq),
        }
    }
}

fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_polygon_has_requested_vertices() {
        let Geometry::Polygon(points) = Geometry::regular_polygon((0.0, 0.0), 10.0, 5) else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 5);
        assert!((points[0].x).abs() < 1e-9, "first vertex points up");
        assert!((points[0].y + 10.0).abs() < 1e-9, "first vertex points up");
    }

    #[test]
    fn star_alternates_radii() {
        let Geometry::Polygon(points) = Geometry::star((0.0, 0.0), 10.0, 4.0, 5) else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 10);
        let r0 = points[0].to_vec2().hypot();
        let r1 = points[1].to_vec2().hypot();
        assert!((r0 - 10.0).abs() < 1e-9, "outer spike");
        assert!((r1 - 4.0).abs() < 1e-9, "inner notch");
    }

    #[test]
    fn lines_are_open_and_never_filled() {
        let line = Geometry::line((0.0, 0.0), (10.0, 0.0));
        assert!(line.is_open());
        assert!(!line.fill_contains(Point::new(5.0, 0.0)));
        assert!(line.outline_within(Point::new(5.0, 0.5), 1.0));
        assert!(!line.outline_within(Point::new(5.0, 5.0), 1.0));
    }

    #[test]
    fn polygon_contains_its_center() {
        let hex = Geometry::regular_polygon((50.0, 50.0), 10.0, 6);
        assert!(!hex.is_open());
        assert!(hex.fill_contains(Point::new(50.0, 50.0)));
        assert!(!hex.fill_contains(Point::new(70.0, 50.0)));
    }

    #[test]
    fn open_path_outline_hit() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 10.0));
        path.move_to((10.0, 0.0));
        path.line_to((0.0, 10.0));
        let cross = Geometry::Path(path);
        assert!(cross.is_open());
        assert!(!cross.fill_contains(Point::new(5.0, 5.0)));
        assert!(cross.outline_within(Point::new(5.0, 5.0), 0.5));
    }
}

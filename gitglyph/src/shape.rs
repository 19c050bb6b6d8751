// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual encoding of a commit: intent picks the shape, sentiment the fill,
//! author the stroke, and churn the size.

use gitglyph_imaging::{Color, Geometry};
use hashbrown::HashMap;
use kurbo::{BezPath, Point};

use crate::commit::{Intent, Sentiment};

/// Shape family of a glyph node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A wide rectangle.
    Rectangle,
    /// A circle.
    Circle,
    /// An upward triangle.
    Triangle,
    /// A flat ellipse.
    Ellipse,
    /// A diagonal line segment.
    Line,
    /// A regular pentagon.
    Pentagon,
    /// A five-point star.
    Star,
    /// A square rotated by 45 degrees.
    Diamond,
    /// A regular hexagon.
    Hexagon,
    /// An open, arrow-like chevron pointing right.
    Chevron,
    /// An X made of two crossing strokes.
    Cross,
    /// A square.
    Square,
    /// A closed arrow pointing right.
    Arrow,
}

impl ShapeKind {
    /// The shape family used for `intent`.
    pub const fn for_intent(intent: Intent) -> Self {
        match intent {
            Intent::Feature => Self::Rectangle,
            Intent::BugFix | Intent::Other => Self::Circle,
            Intent::Refactor => Self::Triangle,
            Intent::Documentation => Self::Ellipse,
            Intent::Style => Self::Line,
            Intent::Test => Self::Pentagon,
            Intent::Chore => Self::Star,
            Intent::Build => Self::Diamond,
            Intent::Ci => Self::Hexagon,
            Intent::Performance => Self::Chevron,
            Intent::Revert => Self::Cross,
            Intent::Configuration => Self::Square,
            Intent::Merge => Self::Arrow,
        }
    }

    /// Short name, used as node metadata.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Pentagon => "pentagon",
            Self::Star => "star",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Chevron => "chevron",
            Self::Cross => "cross",
            Self::Square => "square",
            Self::Arrow => "arrow",
        }
    }

    /// Returns `true` for shapes drawn as strokes only.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Line | Self::Chevron | Self::Cross)
    }

    /// Geometry of this shape centered on `center`.
    ///
    /// The result fits inside the `size` × `size` square centered on `center`.
    pub fn geometry(self, center: Point, size: f64) -> Geometry {
        let h = size / 2.0;
        let Point { x, y } = center;
        match self {
            Self::Rectangle => Geometry::centered_rect(center, size, size * 0.6),
            Self::Circle => Geometry::circle(center, h),
            Self::Triangle => Geometry::regular_polygon(center, h, 3),
            Self::Ellipse => Geometry::ellipse(center, h, h * 0.6),
            Self::Line => Geometry::line((x - h, y + h), (x + h, y - h)),
            Self::Pentagon => Geometry::regular_polygon(center, h, 5),
            Self::Star => Geometry::star(center, h, h * 0.45, 5),
            Self::Diamond => Geometry::polygon([
                Point::new(x, y - h),
                Point::new(x + h, y),
                Point::new(x, y + h),
                Point::new(x - h, y),
            ]),
            Self::Hexagon => Geometry::regular_polygon(center, h, 6),
            Self::Chevron => {
                let mut path = BezPath::new();
                path.move_to((x - h * 0.5, y - h));
                path.line_to((x + h * 0.5, y));
                path.line_to((x - h * 0.5, y + h));
                Geometry::Path(path)
            }
            Self::Cross => {
                let mut path = BezPath::new();
                path.move_to((x - h, y - h));
                path.line_to((x + h, y + h));
                path.move_to((x - h, y + h));
                path.line_to((x + h, y - h));
                Geometry::Path(path)
            }
            Self::Square => Geometry::centered_rect(center, size * 0.8, size * 0.8),
            Self::Arrow => {
                let shaft = h * 0.3;
                let neck = x + h * 0.2;
                Geometry::polygon([
                    Point::new(x - h, y - shaft),
                    Point::new(neck, y - shaft),
                    Point::new(neck, y - h),
                    Point::new(x + h, y),
                    Point::new(neck, y + h),
                    Point::new(neck, y + shaft),
                    Point::new(x - h, y + shaft),
                ])
            }
        }
    }
}

/// Fill for positive commits.
pub const POSITIVE_FILL: Color = Color::from_rgb8(0x4C, 0xAF, 0x50);
/// Fill for negative commits.
pub const NEGATIVE_FILL: Color = Color::from_rgb8(0xF4, 0x43, 0x36);
/// Fill for neutral commits.
pub const NEUTRAL_FILL: Color = Color::from_rgb8(0x21, 0x96, 0xF3);

/// Fill color for a sentiment.
pub const fn sentiment_fill(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => POSITIVE_FILL,
        Sentiment::Negative => NEGATIVE_FILL,
        Sentiment::Neutral => NEUTRAL_FILL,
    }
}

/// Node size for a commit with `churn` changed lines.
///
/// Churn is capped at 1000 lines, so sizes range from `base_size` to
/// `2 · base_size`.
pub fn node_size(base_size: f64, churn: u64) -> f64 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "the ratio is clamped to 2 right away"
    )]
    let ratio = (churn as f64 / 500.0).min(2.0);
    base_size * (1.0 + ratio * 0.5)
}

/// Default stroke palette for authors (the d3 "category10" scheme).
pub static DEFAULT_AUTHOR_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x1F, 0x77, 0xB4),
    Color::from_rgb8(0xFF, 0x7F, 0x0E),
    Color::from_rgb8(0x2C, 0xA0, 0x2C),
    Color::from_rgb8(0xD6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xBD),
    Color::from_rgb8(0x8C, 0x56, 0x4B),
    Color::from_rgb8(0xE3, 0x77, 0xC2),
    Color::from_rgb8(0x7F, 0x7F, 0x7F),
    Color::from_rgb8(0xBC, 0xBD, 0x22),
    Color::from_rgb8(0x17, 0xBE, 0xCF),
];

/// Round-robin author to stroke color assignment.
///
/// Authors receive palette entries in the order they are first seen, wrapping
/// around when there are more authors than colors. A palette lives for one
/// render pass, so colors are stable for a given commit order.
#[derive(Clone, Debug)]
pub struct AuthorPalette<'a> {
    colors: &'a [Color],
    assigned: HashMap<String, usize>,
}

impl<'a> AuthorPalette<'a> {
    /// Create a palette over `colors`.
    ///
    /// An empty slice falls back to [`DEFAULT_AUTHOR_PALETTE`].
    pub fn new(colors: &'a [Color]) -> Self {
        let colors = if colors.is_empty() {
            &DEFAULT_AUTHOR_PALETTE[..]
        } else {
            colors
        };
        Self {
            colors,
            assigned: HashMap::new(),
        }
    }

    /// Stroke color for `author`, assigning the next free slot on first sight.
    pub fn color_for(&mut self, author: &str) -> Color {
        let next = self.assigned.len();
        let slot = match self.assigned.get(author) {
            Some(&slot) => slot,
            None => {
                self.assigned.insert(author.to_owned(), next);
                next
            }
        };
        self.colors[slot % self.colors.len()]
    }

    /// Number of distinct authors seen so far.
    pub fn authors(&self) -> usize {
        self.assigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_mapping() {
        assert_eq!(ShapeKind::for_intent(Intent::Feature), ShapeKind::Rectangle);
        assert_eq!(ShapeKind::for_intent(Intent::BugFix), ShapeKind::Circle);
        assert_eq!(ShapeKind::for_intent(Intent::Other), ShapeKind::Circle);
        assert_eq!(ShapeKind::for_intent(Intent::Chore), ShapeKind::Star);
        assert_eq!(ShapeKind::for_intent(Intent::Revert), ShapeKind::Cross);
        assert_eq!(ShapeKind::for_intent(Intent::Merge), ShapeKind::Arrow);
    }

    #[test]
    fn every_shape_fits_its_box() {
        let center = Point::new(40.0, 60.0);
        let size = 12.0;
        for intent in Intent::ALL {
            let kind = ShapeKind::for_intent(intent);
            let bbox = kind.geometry(center, size).bounding_box();
            assert!(bbox.x0 >= center.x - size / 2.0 - 1e-9, "{kind:?} too far left");
            assert!(bbox.x1 <= center.x + size / 2.0 + 1e-9, "{kind:?} too far right");
            assert!(bbox.y0 >= center.y - size / 2.0 - 1e-9, "{kind:?} too far up");
            assert!(bbox.y1 <= center.y + size / 2.0 + 1e-9, "{kind:?} too far down");
            let mid = bbox.center();
            assert!((mid.x - center.x).abs() <= size / 4.0, "{kind:?} off center");
            assert!((mid.y - center.y).abs() <= size / 4.0, "{kind:?} off center");
        }
    }

    #[test]
    fn open_shapes_have_open_geometry() {
        for intent in Intent::ALL {
            let kind = ShapeKind::for_intent(intent);
            assert_eq!(
                kind.geometry(Point::ZERO, 10.0).is_open(),
                kind.is_open(),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn sentiment_colors() {
        let rgb = |s| {
            let c = sentiment_fill(s).to_rgba8();
            (c.r, c.g, c.b, c.a)
        };
        assert_eq!(rgb(Sentiment::Positive), (0x4C, 0xAF, 0x50, 0xFF));
        assert_eq!(rgb(Sentiment::Negative), (0xF4, 0x43, 0x36, 0xFF));
        assert_eq!(rgb(Sentiment::Neutral), (0x21, 0x96, 0xF3, 0xFF));
    }

    #[test]
    fn size_grows_with_churn_and_clamps() {
        assert_eq!(node_size(8.0, 0), 8.0);
        assert!((node_size(8.0, 600) - 12.8).abs() < 1e-9);
        assert_eq!(node_size(8.0, 1000), 16.0);
        assert_eq!(node_size(8.0, 50_000), 16.0);
        assert!(node_size(8.0, 250) < node_size(8.0, 251));
    }

    #[test]
    fn palette_assigns_round_robin() {
        let colors = [Color::BLACK, Color::WHITE];
        let mut palette = AuthorPalette::new(&colors);
        assert_eq!(palette.color_for("ana"), Color::BLACK);
        assert_eq!(palette.color_for("bo"), Color::WHITE);
        assert_eq!(palette.color_for("ana"), Color::BLACK);
        assert_eq!(palette.color_for("cy"), Color::BLACK);
        assert_eq!(palette.authors(), 3);
    }

    #[test]
    fn empty_palette_uses_default() {
        let mut palette = AuthorPalette::new(&[]);
        assert_eq!(palette.color_for("ana"), DEFAULT_AUTHOR_PALETTE[0]);
    }
}

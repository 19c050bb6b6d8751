// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Story markers drawn on top of a rendered glyph.

use gitglyph_imaging::{
    Color, Geometry, GroupOp, Metadata, Primitive, PrimitiveId, Style, Surface, SurfaceExt,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::render::GlyphNode;

/// Class of the group holding the markers.
pub const ANNOTATIONS_GROUP: &str = "annotations";
/// Class of each marker ring.
pub const MARKER_CLASS: &str = "story-marker";

const MARKER_GAP: f64 = 4.0;
const MARKER_STROKE_WIDTH: f64 = 2.0;

/// A user-authored note attached to a commit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Commit the note refers to.
    pub sha: String,
    /// Short title.
    pub title: String,
    /// Free-form body.
    pub description: String,
    /// Date as authored; not interpreted.
    pub date: String,
}

impl Annotation {
    /// Create an annotation with an empty description and date.
    pub fn new(sha: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            title: title.into(),
            description: String::new(),
            date: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// An annotation together with the marker position it resolved to.
///
/// Pinned annotations are produced at share time so that embedded views can
/// draw the markers without the commit history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinnedAnnotation {
    /// The annotation.
    #[serde(flatten)]
    pub annotation: Annotation,
    /// Marker center, x.
    pub x: f64,
    /// Marker center, y.
    pub y: f64,
    /// Marker ring radius.
    pub radius: f64,
}

impl PinnedAnnotation {
    /// Marker center.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Draws story markers.
#[derive(Copy, Clone, Debug)]
pub struct AnnotationOverlay {
    color: Color,
    first_id: PrimitiveId,
}

impl AnnotationOverlay {
    /// Create an overlay drawing rings in `color`, with primitive ids
    /// starting at `first_id`.
    pub fn new(color: Color, first_id: PrimitiveId) -> Self {
        Self { color, first_id }
    }

    /// Resolve annotations against rendered nodes.
    ///
    /// Annotations whose commit was not rendered are skipped.
    pub fn pin(nodes: &[GlyphNode], annotations: &[Annotation]) -> Vec<PinnedAnnotation> {
        annotations
            .iter()
            .filter_map(|annotation| {
                let Some(node) = nodes.iter().find(|n| n.sha == annotation.sha) else {
                    tracing::debug!(
                        sha = %annotation.sha,
                        "annotation refers to an unrendered commit"
                    );
                    return None;
                };
                Some(PinnedAnnotation {
                    annotation: annotation.clone(),
                    x: node.position.x,
                    y: node.position.y,
                    radius: node.size / 2.0 + MARKER_GAP,
                })
            })
            .collect()
    }

    /// Draw one marker per annotation whose commit is among `nodes`.
    ///
    /// Returns the number of markers drawn.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        nodes: &[GlyphNode],
        annotations: &[Annotation],
        surface: &mut S,
    ) -> usize {
        self.draw_pinned(&Self::pin(nodes, annotations), surface)
    }

    /// Draw markers at previously pinned positions.
    ///
    /// Returns the number of markers drawn. Nothing, not even the group, is
    /// emitted for an empty list.
    pub fn draw_pinned<S: Surface + ?Sized>(
        &self,
        pinned: &[PinnedAnnotation],
        surface: &mut S,
    ) -> usize {
        if pinned.is_empty() {
            return 0;
        }
        surface.with_group(GroupOp::class(ANNOTATIONS_GROUP), |s| {
            for (pin, id) in pinned.iter().zip(self.first_id.0..) {
                let a = &pin.annotation;
                s.draw_hoverable(
                    Primitive::new(
                        PrimitiveId(id),
                        Geometry::circle(pin.position(), pin.radius),
                        Style::stroke(self.color, MARKER_STROKE_WIDTH),
                    )
                    .with_class(MARKER_CLASS)
                    .with_metadata(
                        Metadata::new()
                            .with("sha", a.sha.as_str())
                            .with("title", a.title.as_str())
                            .with("description", a.description.as_str())
                            .with("date", a.date.as_str()),
                    ),
                );
            }
        });
        pinned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn node(sha: &str, x: f64) -> GlyphNode {
        GlyphNode {
            index: 0,
            sha: sha.into(),
            position: Point::new(x, 20.0),
            shape: ShapeKind::Circle,
            fill: Color::BLACK,
            stroke: Color::WHITE,
            size: 10.0,
            primitive: PrimitiveId(3),
        }
    }

    #[test]
    fn pins_resolved_annotations_only() {
        let nodes = [node("a", 5.0), node("b", 50.0)];
        let notes = [
            Annotation::new("b", "launch"),
            Annotation::new("zzz", "gone"),
            Annotation::new("a", "start").with_date("2024-01-01"),
        ];
        let pinned = AnnotationOverlay::pin(&nodes, &notes);
        assert_eq!(pinned.len(), 2);
        assert_eq!(pinned[0].annotation.title, "launch");
        assert_eq!(pinned[0].position(), Point::new(50.0, 20.0));
        assert_eq!(pinned[0].radius, 9.0);
        assert_eq!(pinned[1].annotation.date, "2024-01-01");
    }

    #[test]
    fn pinned_serializes_flat() {
        let pinned = PinnedAnnotation {
            annotation: Annotation::new("a", "t"),
            x: 1.0,
            y: 2.0,
            radius: 3.0,
        };
        let value = serde_json::to_value(&pinned).unwrap();
        assert_eq!(value["sha"], "a");
        assert_eq!(value["x"], 1.0);
        let back: PinnedAnnotation = serde_json::from_value(value).unwrap();
        assert_eq!(back, pinned);
    }
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GitGlyph Imaging: backend-agnostic drawing primitives and surface traits.
//!
//! This crate defines the small retained-mode drawing vocabulary that the
//! glyph pipeline speaks, and the [`Surface`] trait that hosts implement to
//! receive it. It sits between the glyph layout/renderer (in the `gitglyph`
//! crate) and concrete surfaces (SVG export, a browser DOM, test recorders).
//!
//! # Core concepts
//!
//! - **Primitives**: a [`Primitive`] is one typed shape ([`Geometry`]) with a
//!   [`Style`], an optional CSS-like class, and [`Metadata`] key/value pairs
//!   that hosts can look up interactively (tooltips, click-through links).
//!   Text is drawn with [`TextRun`].
//! - **Operations**: [`StateOp`] (group scoping) and [`DrawOp`] (produce
//!   output), combined into [`ImagingOp`] for recording.
//! - **Surfaces**: [`Surface`] accepts operations, reports its available size,
//!   and lets callers attach/detach pointer-hover handling per primitive.
//!   [`SurfaceExt`] adds closure-based helpers.
//! - **Hit testing**: [`hit_test`] finds the topmost primitive under a point
//!   in a recorded op list.
//!
//! Unlike GPU-oriented imaging layers, primitives carry their geometry inline
//! rather than referencing separately created path/paint resources: glyphs
//! are redrawn wholesale and their element count is small.
//!
//! # Example
//!
//! ```ignore
//! # use gitglyph_imaging::*;
//! # use peniko::Color;
//! # struct MySurface { /* implements Surface */ }
//! let mut surface = MySurface { /* ... */ };
//!
//! surface.clear();
//! surface.with_group(GroupOp::class("nodes"), |s| {
//!     let id = PrimitiveId(0);
//!     s.draw(DrawOp::Primitive(
//!         Primitive::new(id, Geometry::circle((50.0, 50.0), 4.0), Style::fill(Color::WHITE))
//!             .with_metadata(Metadata::new().with("sha", "abc123")),
//!     ));
//!     s.attach_hover(id);
//! });
//! ```

#![no_std]

extern crate alloc;

mod geometry;
mod metadata;

use alloc::string::String;

pub use geometry::{DEFAULT_TOLERANCE, Geometry};
pub use kurbo::{Point, Size};
pub use metadata::Metadata;
pub use peniko::Color;

/// Identifier for a drawn primitive.
///
/// IDs are chosen by the caller and must be unique among the primitives
/// drawn since the last [`Surface::clear`]. They are the handle used to
/// attach hover handling and to report hits.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

/// Stroke geometry parameters.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width, joins,
/// caps and dashes.
pub type StrokeStyle = kurbo::Stroke;

/// A stroke color paired with its stroke geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePaint {
    /// Stroke color.
    pub color: Color,
    /// Width, joins, caps and dashes.
    pub style: StrokeStyle,
}

/// Paint applied to a primitive's geometry.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Style {
    /// Interior fill, if any.
    pub fill: Option<Color>,
    /// Outline stroke, if any.
    pub stroke: Option<StrokePaint>,
    /// Optional opacity (0–1) applied to the whole primitive.
    pub opacity: Option<f32>,
}

impl Style {
    /// A style that only fills.
    #[inline]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            opacity: None,
        }
    }

    /// A style that only strokes, with a plain stroke of `width`.
    #[inline]
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(StrokePaint {
                color,
                style: StrokeStyle::new(width),
            }),
            opacity: None,
        }
    }

    /// Add (or replace) a plain stroke of `width`.
    #[inline]
    #[must_use]
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(StrokePaint {
            color,
            style: StrokeStyle::new(width),
        });
        self
    }

    /// Set the primitive opacity.
    #[inline]
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Half of the stroke width, or zero when there is no stroke.
    #[inline]
    pub fn half_stroke_width(&self) -> f64 {
        self.stroke.as_ref().map_or(0.0, |s| s.style.width / 2.0)
    }
}

/// A typed shape with paint and host-visible metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// Caller-chosen identifier.
    pub id: PrimitiveId,
    /// Shape geometry in surface coordinates.
    pub geometry: Geometry,
    /// Fill/stroke paint.
    pub style: Style,
    /// Optional class name, used by hosts for styling and by callers to tell
    /// primitive roles apart.
    pub class: Option<&'static str>,
    /// Key/value data embedded with the primitive.
    pub metadata: Metadata,
}

impl Primitive {
    /// Create a primitive without class or metadata.
    #[inline]
    pub fn new(id: PrimitiveId, geometry: Geometry, style: Style) -> Self {
        Self {
            id,
            geometry,
            style,
            class: None,
            metadata: Metadata::new(),
        }
    }

    /// Set the class name.
    #[inline]
    #[must_use]
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Replace the metadata.
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns `true` if `pt` hits the painted area of this primitive.
    ///
    /// Filled closed geometry is hit anywhere inside; stroked geometry is hit
    /// within half the stroke width plus `tolerance` of its outline. Open
    /// geometry without a stroke cannot be hit.
    pub fn hit_test(&self, pt: Point, tolerance: f64) -> bool {
        if self.style.fill.is_some() && self.geometry.fill_contains(pt) {
            return true;
        }
        if self.style.stroke.is_some() {
            let limit = self.style.half_stroke_width() + tolerance;
            return self.geometry.outline_within(pt, limit);
        }
        false
    }
}

/// Horizontal alignment of a [`TextRun`] relative to its origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the origin.
    #[default]
    Start,
    /// Text is centered on the origin.
    Middle,
    /// Text ends at the origin.
    End,
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Caller-chosen identifier.
    pub id: PrimitiveId,
    /// Baseline origin in surface coordinates.
    pub origin: Point,
    /// Text content.
    pub content: String,
    /// Font size in surface units.
    pub font_size: f32,
    /// Text color.
    pub color: Color,
    /// Alignment relative to `origin`.
    pub anchor: TextAnchor,
    /// Optional class name.
    pub class: Option<&'static str>,
}

/// Parameters for a pushed group.
///
/// Groups scope a run of primitives, the way `<g>` does in SVG. They carry
/// no geometry of their own.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GroupOp {
    /// Optional class name for the group.
    pub class: Option<&'static str>,
    /// Optional opacity (0–1) applied to the group as a whole.
    pub opacity: Option<f32>,
}

impl GroupOp {
    /// A group with only a class name.
    #[inline]
    pub const fn class(class: &'static str) -> Self {
        Self {
            class: Some(class),
            opacity: None,
        }
    }

    /// Returns true if the group has no effect at all.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.class.is_none() && self.opacity.is_none()
    }
}

/// State operations.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a new group onto the group stack.
    ///
    /// Groups must be well-nested: every `PushGroup` must eventually be
    /// matched by a [`StateOp::PopGroup`].
    PushGroup(GroupOp),
    /// Pop the most recently pushed group.
    PopGroup,
}

/// Draw operations.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Draw a shape primitive.
    Primitive(Primitive),
    /// Draw a line of text.
    Text(TextRun),
}

impl DrawOp {
    /// The identifier of the drawn item.
    #[inline]
    pub fn id(&self) -> PrimitiveId {
        match self {
            Self::Primitive(p) => p.id,
            Self::Text(t) => t.id,
        }
    }

    /// The class name of the drawn item, if any.
    #[inline]
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Self::Primitive(p) => p.class,
            Self::Text(t) => t.class,
        }
    }
}

/// Unified operation used by recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// A target that accepts drawing operations.
///
/// This is the whole contract the glyph pipeline has with its host:
/// query the available size, clear, emit operations, and attach or detach
/// pointer-hover handling for individual primitives.
pub trait Surface {
    /// Available width/height in surface units.
    fn size(&self) -> Size;

    /// Discard everything drawn so far, including hover attachments.
    fn clear(&mut self);

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Enable pointer-hover handling for a drawn primitive.
    fn attach_hover(&mut self, id: PrimitiveId);

    /// Disable pointer-hover handling for a drawn primitive.
    ///
    /// Detaching an id that is not attached is a no-op.
    fn detach_hover(&mut self, id: PrimitiveId);

    /// Push a group.
    ///
    /// This is equivalent to `self.state(StateOp::PushGroup(op))`.
    #[inline]
    fn push_group(&mut self, op: GroupOp) {
        self.state(StateOp::PushGroup(op));
    }

    /// Pop the most recently pushed group.
    ///
    /// This is equivalent to `self.state(StateOp::PopGroup)`.
    #[inline]
    fn pop_group(&mut self) {
        self.state(StateOp::PopGroup);
    }
}

/// Convenience helpers for [`Surface`] callers.
///
/// This is separate from [`Surface`] so that methods can accept closures and
/// return values without complicating trait object usage (`&mut dyn Surface`).
pub trait SurfaceExt: Surface {
    /// Run `f` inside a pushed group, popping it afterwards.
    ///
    /// Note: if `f` panics, the group will not be popped.
    #[inline]
    fn with_group<R>(&mut self, op: GroupOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_group(op);
        let out = f(self);
        self.pop_group();
        out
    }

    /// Draw a primitive and attach hover handling to it.
    #[inline]
    fn draw_hoverable(&mut self, primitive: Primitive) {
        let id = primitive.id;
        self.draw(DrawOp::Primitive(primitive));
        self.attach_hover(id);
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}

/// Find the topmost primitive in `ops` hit by `pt`.
///
/// Later operations are drawn on top of earlier ones, so the search runs
/// back to front. `accept` filters candidates (for example to hover-enabled
/// primitives only). Text is never hit.
pub fn hit_test<'a>(
    ops: &'a [ImagingOp],
    pt: Point,
    tolerance: f64,
    mut accept: impl FnMut(&Primitive) -> bool,
) -> Option<&'a Primitive> {
    ops.iter().rev().find_map(|op| match op {
        ImagingOp::Draw(DrawOp::Primitive(p)) if accept(p) && p.hit_test(pt, tolerance) => {
            Some(p)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Trivial in-memory surface that records operations for testing.
    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<ImagingOp>,
        hover: Vec<PrimitiveId>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }

        fn clear(&mut self) {
            self.ops.clear();
            self.hover.clear();
        }

        fn state(&mut self, op: StateOp) {
            self.ops.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.ops.push(ImagingOp::Draw(op));
        }

        fn attach_hover(&mut self, id: PrimitiveId) {
            self.hover.push(id);
        }

        fn detach_hover(&mut self, id: PrimitiveId) {
            self.hover.retain(|h| *h != id);
        }
    }

    fn dot(id: u32, x: f64, y: f64) -> Primitive {
        Primitive::new(
            PrimitiveId(id),
            Geometry::circle((x, y), 5.0),
            Style::fill(Color::WHITE),
        )
    }

    #[test]
    fn with_group_brackets_ops() {
        let mut surface = RecordingSurface::default();
        let n = surface.with_group(GroupOp::class("nodes"), |s| {
            s.draw_hoverable(dot(0, 10.0, 10.0));
            1
        });
        assert_eq!(n, 1);
        assert_eq!(surface.ops.len(), 3);
        assert!(matches!(
            surface.ops[0],
            ImagingOp::State(StateOp::PushGroup(GroupOp {
                class: Some("nodes"),
                ..
            }))
        ));
        assert!(matches!(surface.ops[2], ImagingOp::State(StateOp::PopGroup)));
        assert_eq!(surface.hover, [PrimitiveId(0)]);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let ops = [
            ImagingOp::Draw(DrawOp::Primitive(dot(0, 10.0, 10.0))),
            ImagingOp::Draw(DrawOp::Primitive(dot(1, 12.0, 10.0))),
        ];
        let hit = hit_test(&ops, Point::new(11.0, 10.0), 0.0, |_| true);
        assert_eq!(hit.map(|p| p.id), Some(PrimitiveId(1)));

        let hit = hit_test(&ops, Point::new(11.0, 10.0), 0.0, |p| p.id == PrimitiveId(0));
        assert_eq!(hit.map(|p| p.id), Some(PrimitiveId(0)));

        assert!(hit_test(&ops, Point::new(90.0, 90.0), 0.0, |_| true).is_none());
    }

    #[test]
    fn stroke_only_primitives_hit_near_outline() {
        let ring = Primitive::new(
            PrimitiveId(0),
            Geometry::circle((50.0, 50.0), 10.0),
            Style::stroke(Color::BLACK, 2.0),
        );
        assert!(ring.hit_test(Point::new(60.5, 50.0), 0.0));
        assert!(!ring.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn group_noop_detection() {
        assert!(GroupOp::default().is_noop());
        assert!(!GroupOp::class("edges").is_noop());
    }
}

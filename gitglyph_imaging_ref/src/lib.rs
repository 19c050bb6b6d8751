// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GitGlyph Imaging Reference Surface.
//!
//! This crate provides [`RefSurface`], a small, stateful implementation of
//! [`Surface`] for **op recording and state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** produce pixels or markup.
//! - It is intended primarily for tests and debugging that want to assert on
//!   emitted primitives, the group they were drawn in, and which primitives
//!   have hover handling attached.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use gitglyph_imaging::{
    DrawOp, GroupOp, ImagingOp, Point, Primitive, PrimitiveId, Size, StateOp, Surface, TextRun,
    hit_test,
};

/// Event recorded by the reference surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The surface was cleared.
    Cleared,
    /// State operation and the group depth after applying it.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Group stack depth after the operation.
        depth: u32,
    },
    /// Draw operation and the innermost group it was drawn in.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// The innermost open group, if any.
        group: Option<GroupOp>,
    },
    /// Hover handling was attached to a primitive.
    HoverAttached(PrimitiveId),
    /// Hover handling was detached from a primitive.
    HoverDetached(PrimitiveId),
}

/// Simple reference implementation of [`Surface`].
///
/// This surface:
/// - Reports a fixed size chosen at construction,
/// - Tracks the group stack,
/// - Records [`Event`]s in the order they were applied, across clears,
/// - Keeps the ops and hover set drawn since the last clear.
#[derive(Debug)]
pub struct RefSurface {
    size: Size,
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Ops since the last clear.
    ops: Vec<ImagingOp>,
    group_stack: Vec<GroupOp>,
    hover: Vec<PrimitiveId>,
}

impl RefSurface {
    /// Create a surface reporting `width` × `height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            events: Vec::new(),
            ops: Vec::new(),
            group_stack: Vec::new(),
            hover: Vec::new(),
        }
    }

    /// Returns all recorded events, including those before a clear.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the ops drawn since the last clear.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns the current group stack depth.
    pub fn group_depth(&self) -> usize {
        self.group_stack.len()
    }

    /// Iterate over shape primitives drawn since the last clear.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.ops.iter().filter_map(|op| match op {
            ImagingOp::Draw(DrawOp::Primitive(p)) => Some(p),
            _ => None,
        })
    }

    /// Iterate over shape primitives with the given class.
    pub fn primitives_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.primitives().filter(move |p| p.class == Some(class))
    }

    /// Iterate over text runs drawn since the last clear.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.ops.iter().filter_map(|op| match op {
            ImagingOp::Draw(DrawOp::Text(t)) => Some(t),
            _ => None,
        })
    }

    /// Number of draw operations since the last clear.
    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, ImagingOp::Draw(_)))
            .count()
    }

    /// Primitive ids with hover handling attached, in attachment order.
    pub fn hovered(&self) -> &[PrimitiveId] {
        &self.hover
    }

    /// Find the topmost hover-enabled primitive under `pt`.
    pub fn hit_test(&self, pt: Point, tolerance: f64) -> Option<&Primitive> {
        hit_test(&self.ops, pt, tolerance, |p| self.hover.contains(&p.id))
    }

    fn depth(&self) -> u32 {
        u32::try_from(self.group_stack.len())
            .expect("RefSurface: too many group stack entries for u32")
    }
}

impl Surface for RefSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.group_stack.clear();
        self.hover.clear();
        self.events.push(Event::Cleared);
    }

    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushGroup(group) => self.group_stack.push(group.clone()),
            StateOp::PopGroup => {
                self.group_stack.pop();
            }
        }
        let depth = self.depth();
        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State { op, depth });
    }

    fn draw(&mut self, op: DrawOp) {
        let group = self.group_stack.last().cloned();
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw { op, group });
    }

    fn attach_hover(&mut self, id: PrimitiveId) {
        if !self.hover.contains(&id) {
            self.hover.push(id);
        }
        self.events.push(Event::HoverAttached(id));
    }

    fn detach_hover(&mut self, id: PrimitiveId) {
        self.hover.retain(|h| *h != id);
        self.events.push(Event::HoverDetached(id));
    }
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `gitglyph_imaging_ref` crate.

use gitglyph_imaging::{
    Color, DrawOp, Geometry, GroupOp, Point, Primitive, PrimitiveId, StateOp, Style, Surface,
    SurfaceExt,
};
use gitglyph_imaging_ref::{Event, RefSurface};

fn dot(id: u32, class: &'static str) -> Primitive {
    Primitive::new(
        PrimitiveId(id),
        Geometry::circle((10.0, 10.0), 4.0),
        Style::fill(Color::BLACK),
    )
    .with_class(class)
}

#[test]
fn draws_record_their_group() {
    let mut surface = RefSurface::new(200.0, 100.0);
    assert_eq!(surface.size().width, 200.0);

    surface.with_group(GroupOp::class("nodes"), |s| {
        s.draw(DrawOp::Primitive(dot(0, "node")));
        assert_eq!(s.group_depth(), 1);
    });
    assert_eq!(surface.group_depth(), 0);

    let draw = surface
        .events()
        .iter()
        .find_map(|e| match e {
            Event::Draw { group, .. } => Some(group.clone()),
            _ => None,
        })
        .expect("a draw event");
    assert_eq!(draw, Some(GroupOp::class("nodes")));

    assert!(matches!(
        surface.events().last(),
        Some(Event::State {
            op: StateOp::PopGroup,
            depth: 0
        })
    ));
}

#[test]
fn clear_resets_ops_and_hover_but_keeps_log() {
    let mut surface = RefSurface::new(100.0, 100.0);
    surface.draw_hoverable(dot(0, "node"));
    assert_eq!(surface.hovered(), &[PrimitiveId(0)]);
    assert_eq!(surface.draw_count(), 1);

    surface.clear();
    assert_eq!(surface.draw_count(), 0);
    assert!(surface.hovered().is_empty());
    assert_eq!(surface.events().last(), Some(&Event::Cleared));
    assert_eq!(surface.events().len(), 3);
}

#[test]
fn class_filter_and_hover_hit_test() {
    let mut surface = RefSurface::new(100.0, 100.0);
    surface.draw(DrawOp::Primitive(dot(0, "edge")));
    surface.draw_hoverable(dot(1, "node"));

    assert_eq!(surface.primitives().count(), 2);
    assert_eq!(surface.primitives_with_class("node").count(), 1);
    assert_eq!(
        surface.hit_test(Point::new(10.0, 10.0), 0.0).map(|p| p.id),
        Some(PrimitiveId(1))
    );

    surface.detach_hover(PrimitiveId(1));
    assert!(surface.hit_test(Point::new(10.0, 10.0), 0.0).is_none());
    assert_eq!(
        surface.events().last(),
        Some(&Event::HoverDetached(PrimitiveId(1)))
    );
}

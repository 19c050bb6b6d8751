// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export surface for GitGlyph drawing primitives.
//!
//! This crate provides [`SvgSurface`], an implementation of [`Surface`] that
//! records drawing operations and can export them as a standalone SVG
//! document. The exported markup is what gets shared and embedded:
//! - Every primitive becomes one SVG element (`<circle>`, `<rect>`,
//!   `<ellipse>`, `<line>`, `<polygon>`, `<path>` or `<text>`).
//! - Primitive [`Metadata`](gitglyph_imaging::Metadata) is written as
//!   `data-*` attributes so that a host script can rebuild tooltips.
//! - Groups become `<g>` elements carrying `class`/`opacity`.
//! - Primitives without hover handling get `pointer-events="none"`.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use gitglyph_imaging::{
    DrawOp, Geometry, GroupOp, ImagingOp, Point, Primitive, PrimitiveId, Size, StateOp, Style,
    Surface, TextAnchor, TextRun, hit_test,
};
use kurbo::{BezPath, Cap, Join, PathEl};
use peniko::Color;

/// A recording SVG surface.
#[derive(Debug)]
pub struct SvgSurface {
    size: Size,
    ops: Vec<ImagingOp>,
    hover: BTreeSet<PrimitiveId>,
}

impl SvgSurface {
    /// Create an empty surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
            hover: BTreeSet::new(),
        }
    }

    /// Returns the recorded ops.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns `true` if hover handling is attached to `id`.
    pub fn is_hoverable(&self, id: PrimitiveId) -> bool {
        self.hover.contains(&id)
    }

    /// Find the topmost hover-enabled primitive under `pt`.
    pub fn hit_test(&self, pt: Point, tolerance: f64) -> Option<&Primitive> {
        hit_test(&self.ops, pt, tolerance, |p| self.hover.contains(&p.id))
    }

    /// Export the recorded ops as an SVG document.
    ///
    /// The surface size is used both as the SVG `width`/`height` attributes
    /// and to set `viewBox="0 0 width height"`.
    pub fn to_svg(&self) -> String {
        let width = fmt_f64(self.size.width);
        let height = fmt_f64(self.size.height);

        let mut body = String::new();
        let mut depth = 0_usize;
        for op in &self.ops {
            match op {
                ImagingOp::State(StateOp::PushGroup(group)) => {
                    write_group_open(&mut body, group);
                    depth += 1;
                }
                ImagingOp::State(StateOp::PopGroup) => {
                    assert!(depth > 0, "PopGroup underflow in SVG surface");
                    depth -= 1;
                    body.push_str("</g>");
                }
                ImagingOp::Draw(DrawOp::Primitive(p)) => {
                    write_primitive(&mut body, p, self.hover.contains(&p.id));
                }
                ImagingOp::Draw(DrawOp::Text(t)) => write_text(&mut body, t),
            }
        }
        for _ in 0..depth {
            body.push_str("</g>");
        }

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        svg.push_str(&body);
        svg.push_str("</svg>");
        svg
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
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
        self.hover.insert(id);
    }

    fn detach_hover(&mut self, id: PrimitiveId) {
        self.hover.remove(&id);
    }
}

fn write_group_open(out: &mut String, group: &GroupOp) {
    out.push_str("<g");
    if let Some(class) = group.class {
        let _ = write!(out, " class=\"{}\"", escape_xml(class));
    }
    if let Some(opacity) = group.opacity {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            let _ = write!(out, " opacity=\"{}\"", fmt_f32(opacity));
        }
    }
    out.push('>');
}

fn write_primitive(out: &mut String, p: &Primitive, hoverable: bool) {
    let mut attrs = String::new();
    if let Some(class) = p.class {
        let _ = write!(attrs, " class=\"{}\"", escape_xml(class));
    }
    attrs.push_str(&style_attrs(&p.style, p.geometry.is_open()));
    for (key, value) in p.metadata.iter() {
        let _ = write!(attrs, " data-{key}=\"{}\"", escape_xml(value));
    }
    if !hoverable {
        attrs.push_str(" pointer-events=\"none\"");
    }

    match &p.geometry {
        Geometry::Circle(c) => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>",
                fmt_f64(c.center.x),
                fmt_f64(c.center.y),
                fmt_f64(c.radius),
            );
        }
        Geometry::Ellipse(e) => {
            let center = e.center();
            let radii = e.radii();
            let rotation = e.rotation();
            if rotation != 0.0 {
                let _ = write!(
                    attrs,
                    " transform=\"rotate({} {} {})\"",
                    fmt_f64(rotation.to_degrees()),
                    fmt_f64(center.x),
                    fmt_f64(center.y),
                );
            }
            let _ = write!(
                out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>",
                fmt_f64(center.x),
                fmt_f64(center.y),
                fmt_f64(radii.x),
                fmt_f64(radii.y),
            );
        }
        Geometry::Rect(r) => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                fmt_f64(r.x0),
                fmt_f64(r.y0),
                fmt_f64(r.width()),
                fmt_f64(r.height()),
            );
        }
        Geometry::Line(l) => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                fmt_f64(l.p0.x),
                fmt_f64(l.p0.y),
                fmt_f64(l.p1.x),
                fmt_f64(l.p1.y),
            );
        }
        Geometry::Polygon(points) => {
            let mut list = String::new();
            for (i, pt) in points.iter().enumerate() {
                if i > 0 {
                    list.push(' ');
                }
                let _ = write!(list, "{},{}", fmt_f64(pt.x), fmt_f64(pt.y));
            }
            let _ = write!(out, "<polygon points=\"{list}\"{attrs}/>");
        }
        Geometry::Path(path) => {
            let d = bez_path_to_svg_d(path);
            let _ = write!(out, "<path d=\"{d}\"{attrs}/>");
        }
    }
}

fn write_text(out: &mut String, t: &TextRun) {
    let (rgb, a) = color_to_svg(t.color);
    let _ = write!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{rgb}\"",
        fmt_f64(t.origin.x),
        fmt_f64(t.origin.y),
        fmt_f32(t.font_size),
    );
    if a < 1.0 {
        let _ = write!(out, " fill-opacity=\"{}\"", fmt_f32(a));
    }
    match t.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => out.push_str(" text-anchor=\"middle\""),
        TextAnchor::End => out.push_str(" text-anchor=\"end\""),
    }
    if let Some(class) = t.class {
        let _ = write!(out, " class=\"{}\"", escape_xml(class));
    }
    let _ = write!(out, ">{}</text>", escape_xml(&t.content));
}

fn style_attrs(style: &Style, open: bool) -> String {
    let mut out = String::new();

    match style.fill {
        Some(color) if !open => {
            let (rgb, a) = color_to_svg(color);
            let _ = write!(out, " fill=\"{rgb}\"");
            if a < 1.0 {
                let _ = write!(out, " fill-opacity=\"{}\"", fmt_f32(a));
            }
        }
        _ => out.push_str(" fill=\"none\""),
    }

    match &style.stroke {
        Some(stroke) => {
            let (rgb, a) = color_to_svg(stroke.color);
            let _ = write!(out, " stroke=\"{rgb}\"");
            if a < 1.0 {
                let _ = write!(out, " stroke-opacity=\"{}\"", fmt_f32(a));
            }
            let style = &stroke.style;
            let _ = write!(out, " stroke-width=\"{}\"", fmt_f64(style.width));
            // SVG has a single linecap, while kurbo can specify start/end caps.
            // Use the start cap when they differ.
            let _ = write!(
                out,
                " stroke-linecap=\"{}\"",
                stroke_cap_svg(style.start_cap)
            );
            let _ = write!(out, " stroke-linejoin=\"{}\"", stroke_join_svg(style.join));
            if style.miter_limit.is_finite() && style.join == Join::Miter {
                let _ = write!(out, " stroke-miterlimit=\"{}\"", fmt_f64(style.miter_limit));
            }
            if !style.dash_pattern.is_empty() {
                out.push_str(" stroke-dasharray=\"");
                for (i, v) in style.dash_pattern.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&fmt_f64(*v));
                }
                out.push('"');
            }
        }
        None => out.push_str(" stroke=\"none\""),
    }

    if let Some(opacity) = style.opacity {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            let _ = write!(out, " opacity=\"{}\"", fmt_f32(opacity));
        }
    }

    out
}

fn stroke_cap_svg(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn stroke_join_svg(join: Join) -> &'static str {
    match join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    }
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y),
                    fmt_f64(p3.x),
                    fmt_f64(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

/// Escape text for use in XML attribute values and element content.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVG uses f32-like scalar formatting"
)]
fn fmt_f64(v: f64) -> String {
    fmt_f32(v as f32)
}

fn fmt_f32(v: f32) -> String {
    // Keep output readable and stable across runs.
    if v.is_finite() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "best-effort pretty formatting"
        )]
        let i = v as i32;
        let diff = (i as f32) - v;
        if diff > -1e-6 && diff < 1e-6 {
            return format!("{i}");
        }
    } else {
        return format!("{v}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitglyph_imaging::{Metadata, SurfaceExt};

    fn red_square(id: u32) -> Primitive {
        Primitive::new(
            PrimitiveId(id),
            Geometry::centered_rect((20.0, 30.0), 20.0, 20.0),
            Style::fill(Color::from_rgb8(255, 0, 0)),
        )
    }

    #[test]
    fn exports_basic_svg() {
        let mut surface = SvgSurface::new(100.0, 80.0);
        surface.draw(DrawOp::Primitive(red_square(0)));
        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 100 80\""));
        assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"20\" height=\"20\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn translucent_primitives_carry_opacity() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        let faded = Primitive::new(
            PrimitiveId(0),
            Geometry::centered_rect((20.0, 30.0), 20.0, 20.0),
            Style::fill(Color::from_rgb8(255, 0, 0)).with_opacity(0.5),
        );
        surface.draw(DrawOp::Primitive(faded));
        surface.draw(DrawOp::Primitive(red_square(1)));
        let svg = surface.to_svg();
        assert_eq!(svg.matches(" opacity=\"0.5\"").count(), 1);
    }

    #[test]
    fn metadata_is_escaped_into_data_attributes() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.draw_hoverable(
            red_square(7).with_metadata(Metadata::new().with("message", "fix <b> & \"quote\"")),
        );
        let svg = surface.to_svg();
        assert!(svg.contains("data-message=\"fix &lt;b&gt; &amp; &quot;quote&quot;\""));
        assert!(!svg.contains("pointer-events"));
    }

    #[test]
    fn groups_and_hover() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.with_group(GroupOp::class("edges"), |s| {
            s.draw(DrawOp::Primitive(Primitive::new(
                PrimitiveId(0),
                Geometry::line((0.0, 0.0), (10.0, 10.0)),
                Style::stroke(Color::from_rgb8(0x99, 0x99, 0x99), 1.0),
            )));
        });
        surface.draw_hoverable(red_square(1));
        let svg = surface.to_svg();
        assert!(svg.contains("<g class=\"edges\"><line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"10\" fill=\"none\" stroke=\"#999999\" stroke-width=\"1\" stroke-linecap=\"round\" stroke-linejoin=\"round\" pointer-events=\"none\"/></g>"));

        assert_eq!(
            surface.hit_test(Point::new(20.0, 30.0), 0.0).map(|p| p.id),
            Some(PrimitiveId(1))
        );
        // The edge is drawn but not hover-enabled.
        assert!(surface.hit_test(Point::new(5.0, 5.0), 1.0).is_none());

        surface.detach_hover(PrimitiveId(1));
        assert!(!surface.is_hoverable(PrimitiveId(1)));
        assert!(surface.hit_test(Point::new(20.0, 30.0), 0.0).is_none());
    }

    #[test]
    fn clear_discards_everything() {
        let mut surface = SvgSurface::new(50.0, 50.0);
        surface.draw_hoverable(red_square(0));
        surface.clear();
        assert!(surface.ops().is_empty());
        assert!(!surface.is_hoverable(PrimitiveId(0)));
        assert_eq!(
            surface.to_svg(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"50\" height=\"50\" viewBox=\"0 0 50 50\">\n</svg>"
        );
    }

    #[test]
    fn text_anchor_and_escape() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.draw(DrawOp::Text(TextRun {
            id: PrimitiveId(0),
            origin: Point::new(50.0, 50.0),
            content: "No commits <yet>".into(),
            font_size: 14.0,
            color: Color::from_rgb8(0x66, 0x66, 0x66),
            anchor: TextAnchor::Middle,
            class: None,
        }));
        let svg = surface.to_svg();
        assert!(svg.contains(
            "<text x=\"50\" y=\"50\" font-size=\"14\" fill=\"#666666\" text-anchor=\"middle\">No commits &lt;yet&gt;</text>"
        ));
    }

    #[test]
    fn fractional_values_are_trimmed() {
        assert_eq!(fmt_f32(1.5), "1.5");
        assert_eq!(fmt_f32(2.0), "2");
        assert_eq!(fmt_f32(0.12345), "0.123");
    }
}

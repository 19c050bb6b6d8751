// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a [`Timeline`] into drawing operations.
//!
//! The renderer performs a full redraw on every call:
//!
//! 1. the surface is cleared;
//! 2. an empty timeline produces a single "no data" text and stops there;
//! 3. otherwise a background rectangle is drawn, followed by an `edges`
//!    group linking consecutive commits and a `nodes` group with one
//!    hoverable primitive per commit.
//!
//! Node descriptors are returned in a [`GlyphFrame`] so that hosts can map
//! hover hits back to commits and overlays can find node positions.

use gitglyph_imaging::{
    Color, DrawOp, Geometry, GroupOp, Metadata, Primitive, PrimitiveId, Size, Style, Surface,
    SurfaceExt, TextAnchor, TextRun,
};
use kurbo::{Point, Rect};

use crate::commit::CommitRecord;
use crate::layout::{LayoutConfig, LayoutEngine};
use crate::shape::{AuthorPalette, DEFAULT_AUTHOR_PALETTE, ShapeKind, node_size, sentiment_fill};
use crate::theme::Theme;
use crate::timeline::Timeline;

/// Class of the background rectangle.
pub const BACKGROUND_CLASS: &str = "glyph-background";
/// Class of the group holding the edges.
pub const EDGES_GROUP: &str = "edges";
/// Class of each edge.
pub const EDGE_CLASS: &str = "glyph-edge";
/// Class of the group holding the nodes.
pub const NODES_GROUP: &str = "nodes";
/// Class of each node.
pub const NODE_CLASS: &str = "glyph-node";
/// Class of the "no data" text.
pub const PLACEHOLDER_CLASS: &str = "glyph-placeholder";
/// Text shown for an empty history.
pub const PLACEHOLDER_TEXT: &str = "No commits to display";

/// Largest history whose background, edge and node ids all fit in `u32`.
const MAX_NODES: u32 = u32::MAX / 2;

const NODE_STROKE_WIDTH: f64 = 1.5;
const OPEN_NODE_STROKE_WIDTH: f64 = 2.0;
const PLACEHOLDER_FONT_SIZE: f32 = 14.0;

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphConfig {
    /// Polar layout parameters.
    pub layout: LayoutConfig,
    /// Size of a node with no churn.
    pub base_size: f64,
    /// Author stroke colors, assigned round-robin.
    pub author_palette: Vec<Color>,
    /// Stroke width of the edges.
    pub edge_stroke_width: f64,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            base_size: 8.0,
            author_palette: DEFAULT_AUTHOR_PALETTE.to_vec(),
            edge_stroke_width: 1.0,
        }
    }
}

impl GlyphConfig {
    /// Set the layout parameters.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the size of a node with no churn.
    #[must_use]
    pub fn with_base_size(mut self, base_size: f64) -> Self {
        self.base_size = base_size;
        self
    }

    /// Set the author stroke colors.
    #[must_use]
    pub fn with_author_palette(mut self, palette: impl Into<Vec<Color>>) -> Self {
        self.author_palette = palette.into();
        self
    }

    /// Set the edge stroke width.
    #[must_use]
    pub fn with_edge_stroke_width(mut self, width: f64) -> Self {
        self.edge_stroke_width = width;
        self
    }
}

/// Everything the renderer decided about one commit.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphNode {
    /// Position in the sorted history.
    pub index: usize,
    /// Identifier of the commit.
    pub sha: String,
    /// Canvas position of the node center.
    pub position: Point,
    /// Shape family.
    pub shape: ShapeKind,
    /// Fill, from the sentiment.
    pub fill: Color,
    /// Author color.
    ///
    /// Outlines closed shapes. Open shapes (line, chevron, cross) are a
    /// single stroke already carrying the sentiment color, so this color is
    /// not drawn for them; it stays available for legends and hover cards.
    pub stroke: Color,
    /// Edge length of the square the shape fits in.
    pub size: f64,
    /// Primitive the node was drawn as.
    pub primitive: PrimitiveId,
}

impl GlyphNode {
    /// Geometry of the node.
    pub fn geometry(&self) -> Geometry {
        self.shape.geometry(self.position, self.size)
    }

    /// Paint of the node.
    ///
    /// Closed shapes are filled with the sentiment color and outlined in the
    /// author color. Open shapes have no interior, so they are stroked with
    /// the sentiment color.
    pub fn style(&self) -> Style {
        if self.shape.is_open() {
            Style::stroke(self.fill, OPEN_NODE_STROKE_WIDTH)
        } else {
            Style::fill(self.fill).with_stroke(self.stroke, NODE_STROKE_WIDTH)
        }
    }
}

/// Result of one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphFrame {
    /// Canvas size the frame was laid out for.
    pub size: Size,
    /// One node per commit, in sorted order.
    pub nodes: Vec<GlyphNode>,
    /// Number of edges drawn.
    pub edges: usize,
    /// Story markers drawn on top of the frame.
    pub markers: usize,
    /// Whether the frame may be shared or exported.
    ///
    /// `false` for the empty-history placeholder.
    pub exportable: bool,
    next_id: u32,
}

impl GlyphFrame {
    /// The node drawn as primitive `id`, if any.
    pub fn node_for(&self, id: PrimitiveId) -> Option<&GlyphNode> {
        self.nodes.iter().find(|n| n.primitive == id)
    }

    /// The node for commit `sha`, if it was rendered.
    pub fn node_by_sha(&self, sha: &str) -> Option<&GlyphNode> {
        self.nodes.iter().find(|n| n.sha == sha)
    }

    /// First primitive id not used by this frame.
    ///
    /// Overlays drawn on top of the frame allocate their ids from here.
    pub fn next_id(&self) -> PrimitiveId {
        PrimitiveId(self.next_id)
    }
}

/// Draws glyphs.
#[derive(Clone, Debug, Default)]
pub struct GlyphRenderer {
    config: GlyphConfig,
}

impl GlyphRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: GlyphConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &GlyphConfig {
        &self.config
    }

    /// Compute node descriptors without drawing.
    ///
    /// Node primitives are numbered from `first_id`, one per commit. Commits
    /// past the end of the id space get no node.
    pub fn nodes(&self, timeline: &Timeline, size: Size, first_id: u32) -> Vec<GlyphNode> {
        let engine = LayoutEngine::new(&self.config.layout, size);
        let mut palette = AuthorPalette::new(&self.config.author_palette);
        engine
            .place(timeline)
            .into_iter()
            .zip(timeline.commits())
            .zip(first_id..=u32::MAX)
            .map(|((placement, commit), id)| GlyphNode {
                index: placement.index,
                sha: commit.sha.clone(),
                position: placement.position,
                shape: ShapeKind::for_intent(commit.intent),
                fill: sentiment_fill(commit.sentiment),
                stroke: palette.color_for(&commit.author),
                size: node_size(self.config.base_size, commit.churn()),
                primitive: PrimitiveId(id),
            })
            .collect()
    }

    /// Redraw `surface` with the glyph for `timeline`.
    pub fn render<S: Surface + ?Sized>(
        &self,
        timeline: &Timeline,
        theme: &Theme,
        surface: &mut S,
    ) -> GlyphFrame {
        surface.clear();
        let size = surface.size();

        if timeline.is_empty() {
            surface.draw(DrawOp::Text(TextRun {
                id: PrimitiveId(0),
                origin: Point::new(size.width / 2.0, size.height / 2.0),
                content: PLACEHOLDER_TEXT.into(),
                font_size: PLACEHOLDER_FONT_SIZE,
                color: theme.text,
                anchor: TextAnchor::Middle,
                class: Some(PLACEHOLDER_CLASS),
            }));
            tracing::debug!("rendered empty-history placeholder");
            return GlyphFrame {
                size,
                next_id: 1,
                ..GlyphFrame::default()
            };
        }

        // Ids: the background is 0, edges follow, then one id per node.
        let count = u32::try_from(timeline.len()).map_or(MAX_NODES, |n| n.min(MAX_NODES));
        if timeline.len() > count as usize {
            tracing::warn!(
                commits = timeline.len(),
                drawn = count,
                "history exceeds the primitive id space; drawing the oldest commits"
            );
        }
        let first_node = count;
        let next_id = first_node + count;

        surface.draw(DrawOp::Primitive(
            Primitive::new(
                PrimitiveId(0),
                Geometry::Rect(Rect::from_origin_size(Point::ZERO, size)),
                Style::fill(theme.background),
            )
            .with_class(BACKGROUND_CLASS),
        ));

        let mut nodes = self.nodes(timeline, size, first_node);
        nodes.truncate(count as usize);
        let edges = nodes.len() - 1;

        surface.with_group(GroupOp::class(EDGES_GROUP), |s| {
            for (pair, id) in nodes.windows(2).zip(1..) {
                s.draw(DrawOp::Primitive(
                    Primitive::new(
                        PrimitiveId(id),
                        Geometry::line(pair[0].position, pair[1].position),
                        Style::stroke(theme.edge, self.config.edge_stroke_width),
                    )
                    .with_class(EDGE_CLASS),
                ));
            }
        });

        surface.with_group(GroupOp::class(NODES_GROUP), |s| {
            for (node, commit) in nodes.iter().zip(timeline.commits()) {
                s.draw_hoverable(
                    Primitive::new(node.primitive, node.geometry(), node.style())
                        .with_class(NODE_CLASS)
                        .with_metadata(node_metadata(commit, node.shape)),
                );
            }
        });

        tracing::debug!(nodes = nodes.len(), edges, "rendered glyph");

        GlyphFrame {
            size,
            edges,
            nodes,
            markers: 0,
            exportable: true,
            next_id,
        }
    }
}

/// Metadata attached to a node for tooltips and click-through.
fn node_metadata(commit: &CommitRecord, shape: ShapeKind) -> Metadata {
    let mut meta = Metadata::new()
        .with("sha", commit.sha.as_str())
        .with("message", commit.message.as_str())
        .with("author", commit.author.as_str())
        .with("date", commit.date_string())
        .with("intent", commit.intent.as_str())
        .with("sentiment", commit.sentiment.as_str())
        .with("shape", shape.as_str())
        .with("additions", commit.additions.to_string())
        .with("deletions", commit.deletions.to_string());
    for (key, url) in [
        ("author-url", &commit.author_url),
        ("commit-url", &commit.commit_url),
        ("pr-url", &commit.pr_url),
    ] {
        if let Some(url) = url {
            meta.insert(key, url.as_str());
        }
    }
    meta
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GitGlyph: a commit history drawn as one deterministic figure.
//!
//! Every commit becomes one shape on a circular canvas. Its distance from the
//! center is the elapsed fraction of the history, its angle is its position
//! in the sequence, and its shape, fill, outline and size encode the
//! commit's classified intent, sentiment, author and churn. Consecutive
//! commits are joined by edges; user-written annotations add story markers.
//!
//! The pipeline is a chain of pure stages:
//!
//! - [`Timeline`]: validates and sorts records, derives [`TimelineBounds`].
//! - [`LayoutEngine`]: polar placement (time to radius, index to angle).
//! - [`ShapeKind`], [`sentiment_fill`], [`AuthorPalette`], [`node_size`]:
//!   the visual encoding.
//! - [`GlyphRenderer`]: emits primitives onto a
//!   [`Surface`](gitglyph_imaging::Surface).
//! - [`AnnotationOverlay`]: story markers on top.
//!
//! [`GlyphSession`] ties them together, keeps the last render for redraws,
//! and exports [`ShareBundle`]s. [`GlyphStats`] and [`GoalProgress`] report on
//! the rendered history.
//!
//! ## Example
//!
//! ```
//! use gitglyph::{CommitRecord, GlyphSession, Intent, Sentiment, Theme};
//! use gitglyph_imaging_svg::SvgSurface;
//! use time::macros::datetime;
//!
//! let commits = vec![
//!     CommitRecord::new("a1", "ana", datetime!(2024-01-01 0:00 UTC))
//!         .with_classification(Intent::Feature, Sentiment::Positive),
//!     CommitRecord::new("b2", "bo", datetime!(2024-02-01 0:00 UTC))
//!         .with_classification(Intent::BugFix, Sentiment::Negative)
//!         .with_churn(300, 300),
//! ];
//!
//! let mut session = GlyphSession::default();
//! let mut surface = SvgSurface::new(200.0, 200.0);
//! let frame = session.render(commits, Theme::light(), &mut surface);
//! assert_eq!(frame.nodes.len(), 2);
//! assert_eq!(frame.edges, 1);
//! assert!(surface.to_svg().starts_with("<svg"));
//! ```

mod commit;
mod goals;
mod layout;
mod overlay;
mod render;
mod session;
mod shape;
mod source;
mod stats;
mod theme;
mod timeline;

pub use commit::{CommitRecord, Intent, RawCommit, RecordError, Sentiment};
pub use goals::GoalProgress;
pub use layout::{LayoutConfig, LayoutEngine, Placement};
pub use overlay::{
    ANNOTATIONS_GROUP, Annotation, AnnotationOverlay, MARKER_CLASS, PinnedAnnotation,
};
pub use render::{
    BACKGROUND_CLASS, EDGE_CLASS, EDGES_GROUP, GlyphConfig, GlyphFrame, GlyphNode, GlyphRenderer,
    NODE_CLASS, NODES_GROUP, PLACEHOLDER_CLASS, PLACEHOLDER_TEXT,
};
pub use session::{GlyphSession, GlyphSnapshot, ShareBundle};
pub use shape::{
    AuthorPalette, DEFAULT_AUTHOR_PALETTE, NEGATIVE_FILL, NEUTRAL_FILL, POSITIVE_FILL, ShapeKind,
    node_size, sentiment_fill,
};
pub use source::{CommitSource, JsonSource, RawRecord, SourceError};
pub use stats::GlyphStats;
pub use theme::{Theme, ThemeKind, UnknownTheme};
pub use timeline::{Timeline, TimelineBounds};

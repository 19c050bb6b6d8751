// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state kept between renders of one glyph view.

use gitglyph_imaging::Surface;
use gitglyph_imaging_svg::SvgSurface;
use serde::Serialize;

use crate::commit::{CommitRecord, RawCommit};
use crate::goals::GoalProgress;
use crate::overlay::{Annotation, AnnotationOverlay, PinnedAnnotation};
use crate::render::{GlyphConfig, GlyphFrame, GlyphRenderer};
use crate::source::{CommitSource, SourceError};
use crate::stats::GlyphStats;
use crate::theme::Theme;
use crate::timeline::Timeline;

/// A view of what was last rendered.
#[derive(Copy, Clone, Debug)]
pub struct GlyphSnapshot<'a> {
    /// Commits in ascending time order.
    pub commits: &'a [CommitRecord],
    /// Theme the glyph was drawn with.
    pub theme: &'a Theme,
    /// Session annotations, in insertion order.
    pub annotations: &'a [Annotation],
    /// Identifier of the newest commit.
    pub last_commit: Option<&'a str>,
}

/// Everything a host needs to share or embed a glyph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShareBundle {
    /// Standalone SVG document, markers included.
    pub svg: String,
    /// Annotations with their marker positions.
    pub pinned: Vec<PinnedAnnotation>,
    /// Identifier of the newest commit.
    pub last_commit: Option<String>,
}

#[derive(Debug)]
struct Rendered {
    timeline: Timeline,
    theme: Theme,
    frame: GlyphFrame,
}

/// Owns the last render and the annotation list of one glyph view.
///
/// Every successful render replaces the previous snapshot as a whole.
/// Annotations outlive renders; they are dropped by [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct GlyphSession {
    renderer: GlyphRenderer,
    current: Option<Rendered>,
    annotations: Vec<Annotation>,
}

impl GlyphSession {
    /// Create a session rendering with `config`.
    pub fn new(config: GlyphConfig) -> Self {
        Self {
            renderer: GlyphRenderer::new(config),
            current: None,
            annotations: Vec::new(),
        }
    }

    /// The renderer configuration.
    pub fn config(&self) -> &GlyphConfig {
        self.renderer.config()
    }

    /// Normalize `commits` and draw them onto `surface`.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        commits: Vec<CommitRecord>,
        theme: Theme,
        surface: &mut S,
    ) -> &GlyphFrame {
        self.draw(Timeline::normalize(commits), theme, surface)
    }

    /// Validate and normalize `raw` records and draw them onto `surface`.
    ///
    /// Malformed records are skipped with a warning.
    pub fn render_raw<S: Surface + ?Sized>(
        &mut self,
        raw: impl IntoIterator<Item = RawCommit>,
        theme: Theme,
        surface: &mut S,
    ) -> &GlyphFrame {
        self.draw(Timeline::normalize_raw(raw), theme, surface)
    }

    /// Fetch from `source` and draw the result onto `surface`.
    ///
    /// Entries the source could not decode are rejected one at a time, like
    /// malformed records in [`render_raw`](Self::render_raw). If the fetch
    /// itself fails, the previous snapshot and the surface are left
    /// untouched.
    pub fn fetch_and_render<S: Surface + ?Sized>(
        &mut self,
        source: &mut (impl CommitSource + ?Sized),
        theme: Theme,
        surface: &mut S,
    ) -> Result<&GlyphFrame, SourceError> {
        let records = source.fetch()?;
        Ok(self.draw(Timeline::normalize_records(records), theme, surface))
    }

    /// Redraw the last snapshot, for example after the annotations changed.
    ///
    /// Returns `None` if nothing was rendered yet.
    pub fn rerender<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<&GlyphFrame> {
        let Rendered {
            timeline, theme, ..
        } = self.current.take()?;
        Some(self.draw(timeline, theme, surface))
    }

    /// The frame of the last render.
    pub fn frame(&self) -> Option<&GlyphFrame> {
        self.current.as_ref().map(|r| &r.frame)
    }

    /// Append an annotation. It is drawn on the next render.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Remove the annotation at `index`, returning it.
    ///
    /// Out-of-range indices remove nothing.
    pub fn remove_annotation(&mut self, index: usize) -> Option<Annotation> {
        (index < self.annotations.len()).then(|| self.annotations.remove(index))
    }

    /// Annotations in insertion order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// What was last rendered, or `None` before the first render.
    pub fn snapshot(&self) -> Option<GlyphSnapshot<'_>> {
        self.current.as_ref().map(|r| GlyphSnapshot {
            commits: r.timeline.commits(),
            theme: &r.theme,
            annotations: &self.annotations,
            last_commit: r.timeline.last_commit().map(|c| c.sha.as_str()),
        })
    }

    /// Statistics for the last rendered history.
    pub fn stats(&self) -> Option<GlyphStats> {
        self.current
            .as_ref()
            .map(|r| GlyphStats::from_commits(r.timeline.commits()))
    }

    /// Goal progress of the last rendered history.
    pub fn goal_progress<K: AsRef<str>>(&self, keywords: &[K]) -> Option<GoalProgress> {
        self.current
            .as_ref()
            .map(|r| GoalProgress::evaluate(r.timeline.commits(), keywords))
    }

    /// Export the last render as SVG with markers pinned in place.
    ///
    /// Returns `None` if nothing was rendered or the last render was the
    /// empty-history placeholder.
    pub fn share(&self) -> Option<ShareBundle> {
        let current = self.current.as_ref().filter(|r| r.frame.exportable)?;
        let size = current.frame.size;
        let mut svg = SvgSurface::new(size.width, size.height);
        let frame = self.renderer.render(&current.timeline, &current.theme, &mut svg);
        let pinned = AnnotationOverlay::pin(&frame.nodes, &self.annotations);
        AnnotationOverlay::new(current.theme.marker, frame.next_id())
            .draw_pinned(&pinned, &mut svg);
        Some(ShareBundle {
            svg: svg.to_svg(),
            pinned,
            last_commit: current.timeline.last_commit().map(|c| c.sha.clone()),
        })
    }

    /// Forget the snapshot and all annotations.
    pub fn clear(&mut self) {
        self.current = None;
        self.annotations.clear();
    }

    fn draw<S: Surface + ?Sized>(
        &mut self,
        timeline: Timeline,
        theme: Theme,
        surface: &mut S,
    ) -> &GlyphFrame {
        let mut frame = self.renderer.render(&timeline, &theme, surface);
        if frame.exportable {
            frame.markers = AnnotationOverlay::new(theme.marker, frame.next_id()).draw(
                &frame.nodes,
                &self.annotations,
                surface,
            );
        }
        if timeline.rejected() > 0 {
            tracing::warn!(
                rejected = timeline.rejected(),
                rendered = frame.nodes.len(),
                "some commit records were rejected"
            );
        }
        &self
            .current
            .insert(Rendered {
                timeline,
                theme,
                frame,
            })
            .frame
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn commit(sha: &str, secs: i64) -> CommitRecord {
        CommitRecord::new(sha, "ana", OffsetDateTime::from_unix_timestamp(secs).unwrap())
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut session = GlyphSession::default();
        session.add_annotation(Annotation::new("a", "one"));
        assert_eq!(session.remove_annotation(3), None);
        assert_eq!(session.remove_annotation(0).map(|a| a.title), Some("one".into()));
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn nothing_to_share_before_render() {
        let session = GlyphSession::default();
        assert!(session.share().is_none());
        assert!(session.snapshot().is_none());
        assert!(session.stats().is_none());
    }

    #[test]
    fn snapshot_tracks_last_commit() {
        let mut session = GlyphSession::default();
        let mut surface = SvgSurface::new(100.0, 100.0);
        session.render(vec![commit("b", 9), commit("a", 1)], Theme::dark(), &mut surface);
        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.last_commit, Some("b"));
        assert_eq!(snapshot.commits[0].sha, "a");
        assert_eq!(snapshot.theme, &Theme::dark());
    }
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar layout: elapsed time sets the radius, sequence position sets the angle.
//!
//! Radius and angle are deliberately decoupled. Commits made at nearly the
//! same instant still fan out around the circle because their angle comes
//! from their ordinal index, not from their timestamp.

use core::f64::consts::TAU;

use kurbo::{Point, Size};

use crate::timeline::Timeline;

/// Layout parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Fraction of the half-extent used for the outermost ring.
    ///
    /// The default of `0.8` leaves a 20% margin for node shapes and markers.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { margin: 0.8 }
    }
}

impl LayoutConfig {
    /// Set the margin fraction.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Radius of the outermost ring for a canvas of `size`.
    #[inline]
    pub fn max_radius(&self, size: Size) -> f64 {
        size.width.min(size.height) / 2.0 * self.margin
    }
}

/// Where one commit lands on the canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Ordinal index in the sorted history.
    pub index: usize,
    /// Elapsed-time fraction in `[0, 1]`.
    pub time_ratio: f64,
    /// Distance from the canvas center.
    pub radius: f64,
    /// Angle in radians, measured from the positive x axis.
    pub angle: f64,
    /// Canvas position.
    pub position: Point,
}

/// Computes [`Placement`]s for a sorted history on a canvas.
#[derive(Copy, Clone, Debug)]
pub struct LayoutEngine {
    center: Point,
    max_radius: f64,
}

impl LayoutEngine {
    /// Create an engine for a canvas of `size`.
    pub fn new(config: &LayoutConfig, size: Size) -> Self {
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            max_radius: config.max_radius(size),
        }
    }

    /// Center of the canvas.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the outermost ring.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Radius for an elapsed-time fraction.
    #[inline]
    pub fn radius(&self, time_ratio: f64) -> f64 {
        self.max_radius * time_ratio
    }

    /// Angle for the `index`-th of `count` commits.
    #[inline]
    pub fn angle(index: usize, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "commit counts are far below 2^52"
        )]
        let fraction = index as f64 / count as f64;
        fraction * TAU
    }

    /// Place every commit of `timeline`, in order.
    ///
    /// An empty timeline yields no placements.
    pub fn place(&self, timeline: &Timeline) -> Vec<Placement> {
        let Some(bounds) = timeline.bounds() else {
            return Vec::new();
        };
        let count = timeline.len();
        timeline
            .commits()
            .iter()
            .enumerate()
            .map(|(index, commit)| {
                let time_ratio = bounds.ratio(commit.timestamp);
                let radius = self.radius(time_ratio);
                let angle = Self::angle(index, count);
                Placement {
                    index,
                    time_ratio,
                    radius,
                    angle,
                    position: Point::new(
                        self.center.x + radius * angle.cos(),
                        self.center.y + radius * angle.sin(),
                    ),
                }
            })
            .collect()
    }
}

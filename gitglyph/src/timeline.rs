// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit normalization: validation, chronological order, and bounds.

use time::{Duration, OffsetDateTime};

use crate::commit::{CommitRecord, RawCommit, RecordError};

/// Earliest and latest commit time of a non-empty history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimelineBounds {
    /// Time of the oldest commit.
    pub earliest: OffsetDateTime,
    /// Time of the newest commit.
    pub latest: OffsetDateTime,
}

impl TimelineBounds {
    /// `latest − earliest`. Zero when all commits share one instant.
    #[inline]
    pub fn span(&self) -> Duration {
        self.latest - self.earliest
    }

    /// Position of `t` within the bounds as a fraction in `[0, 1]`.
    ///
    /// A zero span maps every instant to `0`.
    pub fn ratio(&self, t: OffsetDateTime) -> f64 {
        let span = self.span();
        if span <= Duration::ZERO {
            return 0.0;
        }
        ((t - self.earliest).as_seconds_f64() / span.as_seconds_f64()).clamp(0.0, 1.0)
    }
}

/// A chronologically ordered commit history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    commits: Vec<CommitRecord>,
    bounds: Option<TimelineBounds>,
    rejected: usize,
}

impl Timeline {
    /// Sort `commits` ascending by timestamp and derive bounds.
    ///
    /// The sort is stable: commits sharing a timestamp keep their input order.
    pub fn normalize(mut commits: Vec<CommitRecord>) -> Self {
        commits.sort_by_key(|c| c.timestamp);
        let bounds = match (commits.first(), commits.last()) {
            (Some(first), Some(last)) => Some(TimelineBounds {
                earliest: first.timestamp,
                latest: last.timestamp,
            }),
            _ => None,
        };
        Self {
            commits,
            bounds,
            rejected: 0,
        }
    }

    /// Validate raw records, drop malformed ones, and normalize the rest.
    ///
    /// Every rejected record is logged with its position and reason; the
    /// remaining records are kept.
    pub fn normalize_raw(raw: impl IntoIterator<Item = RawCommit>) -> Self {
        Self::normalize_records(raw.into_iter().map(Ok))
    }

    /// Like [`normalize_raw`](Self::normalize_raw), for lists in which some
    /// entries already failed to decode.
    ///
    /// Decode failures are rejected, logged, and counted like any other
    /// malformed record.
    pub fn normalize_records(
        records: impl IntoIterator<Item = Result<RawCommit, RecordError>>,
    ) -> Self {
        let mut rejected = 0;
        let commits = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match record.and_then(CommitRecord::try_from) {
                Ok(commit) => Some(commit),
                Err(err) => {
                    tracing::warn!(index, %err, "skipping malformed commit record");
                    rejected += 1;
                    None
                }
            })
            .collect();
        let mut timeline = Self::normalize(commits);
        timeline.rejected = rejected;
        timeline
    }

    /// Commits in ascending time order.
    #[inline]
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Time bounds, or `None` for an empty history.
    #[inline]
    pub fn bounds(&self) -> Option<TimelineBounds> {
        self.bounds
    }

    /// Number of raw records rejected during normalization.
    #[inline]
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Number of commits.
    #[inline]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Returns `true` if there are no commits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The newest commit.
    #[inline]
    pub fn last_commit(&self) -> Option<&CommitRecord> {
        self.commits.last()
    }
}

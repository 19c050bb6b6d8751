// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summary statistics over a commit history.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use serde::Serialize;

use crate::commit::{CommitRecord, Intent};

const SECONDS_PER_30_DAYS: f64 = 30.0 * 24.0 * 60.0 * 60.0;

/// Health figures for a glyph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GlyphStats {
    /// Number of commits.
    pub total_commits: usize,
    /// Number of distinct authors.
    pub authors: usize,
    /// Lines added over all commits.
    pub additions: u64,
    /// Lines deleted over all commits.
    pub deletions: u64,
    /// Commit count per intent label. Intents without commits are absent.
    pub intents: BTreeMap<&'static str, usize>,
    /// Commit count per sentiment label. Sentiments without commits are absent.
    pub sentiments: BTreeMap<&'static str, usize>,
    /// Features per fix; the fix count is floored at one.
    pub feature_to_fix_ratio: f64,
    /// Population standard deviation of per-commit churn.
    pub churn_volatility: f64,
    /// Commits per 30 days over the history's span.
    ///
    /// A history without span reports its commit count.
    pub commit_cadence: f64,
}

impl GlyphStats {
    /// Compute statistics for `commits`, in any order.
    #[allow(
        clippy::cast_precision_loss,
        reason = "counts and line totals are far below 2^52"
    )]
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        let mut stats = Self {
            total_commits: commits.len(),
            ..Self::default()
        };
        if commits.is_empty() {
            return stats;
        }

        let mut authors = HashSet::new();
        let mut features = 0_usize;
        let mut fixes = 0_usize;
        for commit in commits {
            authors.insert(commit.author.as_str());
            stats.additions = stats.additions.saturating_add(commit.additions);
            stats.deletions = stats.deletions.saturating_add(commit.deletions);
            *stats.intents.entry(commit.intent.as_str()).or_default() += 1;
            *stats.sentiments.entry(commit.sentiment.as_str()).or_default() += 1;
            match commit.intent {
                Intent::Feature => features += 1,
                Intent::BugFix => fixes += 1,
                _ => {}
            }
        }
        stats.authors = authors.len();
        stats.feature_to_fix_ratio = features as f64 / fixes.max(1) as f64;

        let n = commits.len() as f64;
        let mean = commits.iter().map(|c| c.churn() as f64).sum::<f64>() / n;
        let variance = commits
            .iter()
            .map(|c| {
                let d = c.churn() as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        stats.churn_volatility = variance.sqrt();

        let earliest = commits.iter().map(|c| c.timestamp).min();
        let latest = commits.iter().map(|c| c.timestamp).max();
        let span = match (earliest, latest) {
            (Some(e), Some(l)) => (l - e).as_seconds_f64(),
            _ => 0.0,
        };
        stats.commit_cadence = if span > 0.0 {
            n / (span / SECONDS_PER_30_DAYS)
        } else {
            n
        };
        stats
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::commit::Sentiment;

    fn commit(author: &str, day: i64, intent: Intent, churn: u64) -> CommitRecord {
        CommitRecord::new(
            format!("{author}-{day}"),
            author,
            OffsetDateTime::from_unix_timestamp(day * 86_400).unwrap(),
        )
        .with_classification(intent, Sentiment::Neutral)
        .with_churn(churn, 0)
    }

    #[test]
    fn empty_history() {
        let stats = GlyphStats::from_commits(&[]);
        assert_eq!(stats.total_commits, 0);
        assert_eq!(stats.commit_cadence, 0.0);
        assert!(stats.intents.is_empty());
    }

    #[test]
    fn counts_and_ratios() {
        let commits = [
            commit("ana", 0, Intent::Feature, 10),
            commit("bo", 10, Intent::Feature, 30),
            commit("ana", 20, Intent::Feature, 10),
            commit("cy", 30, Intent::BugFix, 30),
        ];
        let stats = GlyphStats::from_commits(&commits);
        assert_eq!(stats.total_commits, 4);
        assert_eq!(stats.authors, 3);
        assert_eq!(stats.additions, 80);
        assert_eq!(stats.intents.get("feature"), Some(&3));
        assert_eq!(stats.intents.get("bug_fix"), Some(&1));
        assert_eq!(stats.sentiments.get("neutral"), Some(&4));
        assert_eq!(stats.feature_to_fix_ratio, 3.0);
        // Churn 10, 30, 10, 30 around a mean of 20.
        assert!((stats.churn_volatility - 10.0).abs() < 1e-9);
        // Four commits over exactly 30 days.
        assert!((stats.commit_cadence - 4.0).abs() < 1e-9);
    }

    #[test]
    fn no_fixes_floors_denominator() {
        let commits = [
            commit("ana", 0, Intent::Feature, 1),
            commit("ana", 0, Intent::Feature, 1),
        ];
        let stats = GlyphStats::from_commits(&commits);
        assert_eq!(stats.feature_to_fix_ratio, 2.0);
        assert_eq!(stats.churn_volatility, 0.0);
        assert_eq!(stats.commit_cadence, 2.0);
    }
}

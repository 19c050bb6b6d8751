// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit records as delivered by the classification backend.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Classified purpose of a commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Intent {
    /// New functionality.
    Feature,
    /// A bug fix.
    BugFix,
    /// Restructuring without behavior change.
    Refactor,
    /// Documentation only.
    Documentation,
    /// Formatting and style.
    Style,
    /// Tests.
    Test,
    /// Maintenance.
    Chore,
    /// Build system changes.
    Build,
    /// Continuous integration changes.
    Ci,
    /// Performance work.
    Performance,
    /// A revert of earlier work.
    Revert,
    /// Configuration changes.
    Configuration,
    /// A merge commit.
    Merge,
    /// Anything unclassified.
    #[default]
    Other,
}

impl Intent {
    /// All intents, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Feature,
        Self::BugFix,
        Self::Refactor,
        Self::Documentation,
        Self::Style,
        Self::Test,
        Self::Chore,
        Self::Build,
        Self::Ci,
        Self::Performance,
        Self::Revert,
        Self::Configuration,
        Self::Merge,
        Self::Other,
    ];

    /// The label used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::BugFix => "bug_fix",
            Self::Refactor => "refactor",
            Self::Documentation => "documentation",
            Self::Style => "style",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Performance => "performance",
            Self::Revert => "revert",
            Self::Configuration => "configuration",
            Self::Merge => "merge",
            Self::Other => "other",
        }
    }

    /// Parse a wire label, case-insensitively. Unknown labels are [`Intent::Other`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified tone of a commit message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Sentiment {
    /// Positive tone.
    Positive,
    /// Negative tone.
    Negative,
    /// Neutral or unclassified.
    #[default]
    Neutral,
}

impl Sentiment {
    /// All sentiments, in declaration order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// The label used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Parse a wire label, case-insensitively. Unknown labels are [`Sentiment::Neutral`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified commit.
///
/// Records are produced upstream and only ever read by the glyph pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit identifier.
    pub sha: String,
    /// Author display name or login.
    pub author: String,
    /// Author profile URL.
    pub author_url: Option<String>,
    /// Commit time.
    pub timestamp: OffsetDateTime,
    /// Full commit message.
    pub message: String,
    /// Classified purpose.
    pub intent: Intent,
    /// Classified tone.
    pub sentiment: Sentiment,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
    /// Link to the commit on the hosting service.
    pub commit_url: Option<String>,
    /// Link to the pull request that introduced the commit.
    pub pr_url: Option<String>,
}

impl CommitRecord {
    /// Create a record with empty optional fields and zero churn.
    pub fn new(
        sha: impl Into<String>,
        author: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            sha: sha.into(),
            author: author.into(),
            author_url: None,
            timestamp,
            message: String::new(),
            intent: Intent::Other,
            sentiment: Sentiment::Neutral,
            additions: 0,
            deletions: 0,
            commit_url: None,
            pr_url: None,
        }
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the classification labels.
    #[must_use]
    pub fn with_classification(mut self, intent: Intent, sentiment: Sentiment) -> Self {
        self.intent = intent;
        self.sentiment = sentiment;
        self
    }

    /// Set the line counts.
    #[must_use]
    pub fn with_churn(mut self, additions: u64, deletions: u64) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self
    }

    /// Total changed lines.
    pub fn churn(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }

    /// Timestamp in RFC 3339 form, or unix seconds if it cannot be formatted.
    pub fn date_string(&self) -> String {
        self.timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.timestamp.unix_timestamp().to_string())
    }
}

/// Why a raw record was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// The record has no commit identifier.
    #[error("commit record has no sha")]
    MissingSha,
    /// The record has neither `date` nor `timestamp`.
    #[error("commit {sha} has no timestamp")]
    MissingTimestamp {
        /// Identifier of the offending commit.
        sha: String,
    },
    /// The timestamp could not be interpreted.
    #[error("commit {sha} has an invalid timestamp {value:?}")]
    InvalidTimestamp {
        /// Identifier of the offending commit.
        sha: String,
        /// The value as received.
        value: String,
    },
    /// The record does not have the shape of a commit.
    #[error("commit record could not be decoded: {reason}")]
    Undecodable {
        /// Decoder message.
        reason: String,
    },
}

/// A commit as received from the commit list endpoint.
///
/// Every field is optional so that one malformed record can be rejected
/// without failing the whole list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommit {
    /// Commit identifier.
    #[serde(alias = "hash", alias = "id")]
    pub sha: Option<String>,
    /// Author display name or login.
    pub author: Option<String>,
    /// Author profile URL.
    pub author_url: Option<String>,
    /// RFC 3339 commit time.
    pub date: Option<String>,
    /// Unix seconds; used when `date` is absent.
    pub timestamp: Option<i64>,
    /// Full commit message.
    pub message: Option<String>,
    /// Intent label.
    pub intent: Option<String>,
    /// Sentiment label.
    pub sentiment: Option<String>,
    /// Lines added.
    pub additions: Option<u64>,
    /// Lines deleted.
    pub deletions: Option<u64>,
    /// Commit link.
    pub commit_url: Option<String>,
    /// Pull request link.
    pub pr_url: Option<String>,
}

impl RawCommit {
    /// Decode one entry of a JSON commit list.
    ///
    /// Mistyped fields fail only this record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        serde_json::from_value(value).map_err(|err| RecordError::Undecodable {
            reason: err.to_string(),
        })
    }
}

impl TryFrom<RawCommit> for CommitRecord {
    type Error = RecordError;

    fn try_from(raw: RawCommit) -> Result<Self, Self::Error> {
        let sha = raw
            .sha
            .filter(|s| !s.trim().is_empty())
            .ok_or(RecordError::MissingSha)?;
        let timestamp = match (raw.date, raw.timestamp) {
            (Some(date), _) => OffsetDateTime::parse(date.trim(), &Rfc3339)
                .map_err(|_| RecordError::InvalidTimestamp {
                    sha: sha.clone(),
                    value: date,
                })?,
            (None, Some(secs)) => OffsetDateTime::from_unix_timestamp(secs).map_err(|_| {
                RecordError::InvalidTimestamp {
                    sha: sha.clone(),
                    value: secs.to_string(),
                }
            })?,
            (None, None) => return Err(RecordError::MissingTimestamp { sha }),
        };
        Ok(Self {
            sha,
            author: raw.author.unwrap_or_default(),
            author_url: raw.author_url,
            timestamp,
            message: raw.message.unwrap_or_default(),
            intent: raw.intent.as_deref().map(Intent::from_label).unwrap_or_default(),
            sentiment: raw
                .sentiment
                .as_deref()
                .map(Sentiment::from_label)
                .unwrap_or_default(),
            additions: raw.additions.unwrap_or(0),
            deletions: raw.deletions.unwrap_or(0),
            commit_url: raw.commit_url,
            pr_url: raw.pr_url,
        })
    }
}

impl FromStr for Intent {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl FromStr for Sentiment {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

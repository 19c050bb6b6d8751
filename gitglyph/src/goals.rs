// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress towards a goal described by keywords.

use serde::Serialize;

use crate::commit::CommitRecord;

/// How much of a goal a history touches.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GoalProgress {
    /// Score of each commit, in input order.
    pub scores: Vec<usize>,
    /// Sum of all scores.
    pub total: usize,
    /// Commits with a non-zero score.
    pub matching_commits: usize,
    /// Fraction of keywords found in at least one commit, in `[0, 1]`.
    ///
    /// Zero when there are no keywords.
    pub coverage: f64,
}

impl GoalProgress {
    /// Number of `keywords` found in `message` as whole words.
    ///
    /// Matching ignores case. Each keyword counts once however often it
    /// occurs; blank keywords never match.
    pub fn score<K: AsRef<str>>(message: &str, keywords: &[K]) -> usize {
        let message = message.to_lowercase();
        keywords
            .iter()
            .filter(|k| contains_word(&message, &k.as_ref().trim().to_lowercase()))
            .count()
    }

    /// Score every commit message against `keywords`.
    pub fn evaluate<K: AsRef<str>>(commits: &[CommitRecord], keywords: &[K]) -> Self {
        let messages: Vec<String> = commits.iter().map(|c| c.message.to_lowercase()).collect();
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .collect();

        let scores: Vec<usize> = messages
            .iter()
            .map(|m| keywords.iter().filter(|k| contains_word(m, k)).count())
            .collect();
        let touched = keywords
            .iter()
            .filter(|k| messages.iter().any(|m| contains_word(m, k)))
            .count();

        #[allow(
            clippy::cast_precision_loss,
            reason = "keyword lists are tiny"
        )]
        let coverage = if keywords.is_empty() {
            0.0
        } else {
            touched as f64 / keywords.len() as f64
        };
        Self {
            total: scores.iter().sum(),
            matching_commits: scores.iter().filter(|s| **s > 0).count(),
            scores,
            coverage,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `word` occurs in `haystack` with no word character
/// directly before or after it.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    #[test]
    fn scores_whole_words_only() {
        let msg = "feat: Implement user authentication module and fix login bug";
        assert_eq!(
            GoalProgress::score(msg, &["authentication", "login", "module"]),
            3
        );
        assert_eq!(GoalProgress::score(msg, &["auth", "log"]), 0);
        assert_eq!(GoalProgress::score(msg, &["LOGIN", "  "]), 1);
        assert_eq!(GoalProgress::score("log-in flow", &["log"]), 1);
        assert_eq!(GoalProgress::score("snake_case", &["snake"]), 0);
    }

    #[test]
    fn evaluates_history() {
        let at = OffsetDateTime::UNIX_EPOCH;
        let commits = [
            CommitRecord::new("a", "ana", at).with_message("Add login page"),
            CommitRecord::new("b", "ana", at).with_message("Tidy README"),
            CommitRecord::new("c", "bo", at).with_message("login: session module"),
        ];
        let progress = GoalProgress::evaluate(&commits, &["login", "module", "oauth"]);
        assert_eq!(progress.scores, [1, 0, 2]);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.matching_commits, 2);
        assert!((progress.coverage - 2.0 / 3.0).abs() < 1e-9);

        let none = GoalProgress::evaluate::<&str>(&commits, &[]);
        assert_eq!(none.coverage, 0.0);
        assert_eq!(none.total, 0);
    }
}

// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where commit lists come from.
//!
//! The glyph pipeline never talks to a remote service itself. Anything that
//! can produce [`RawCommit`]s implements [`CommitSource`]; this crate ships a
//! JSON reader, and hosts plug in their API client the same way.
//!
//! A source fails as a whole only when the list itself cannot be obtained.
//! An entry that does not decode is handed on as a [`RecordError`] so the
//! normalizer can reject it alone.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::commit::{RawCommit, RecordError};

/// One entry of a fetched commit list, decoded or not.
pub type RawRecord = Result<RawCommit, RecordError>;

/// Failure to obtain a commit list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading the underlying stream or file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The payload is not a commit list.
    #[error("invalid commit list: {0}")]
    Json(#[from] serde_json::Error),
    /// The source cannot deliver right now.
    #[error("{source_name} is unavailable: {reason}")]
    Unavailable {
        /// Human-readable name of the source.
        source_name: String,
        /// What went wrong.
        reason: String,
    },
}

/// A producer of raw commit records.
pub trait CommitSource {
    /// Human-readable name, used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch the full commit list.
    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError>;
}

/// Accepted payload shapes: a bare array or an object with a `commits` array.
///
/// Entries stay untyped here; each is decoded on its own.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    List(Vec<Value>),
    Wrapped { commits: Vec<Value> },
}

impl From<Payload> for Vec<RawRecord> {
    fn from(payload: Payload) -> Self {
        let (Payload::List(entries) | Payload::Wrapped { commits: entries }) = payload;
        entries.into_iter().map(RawCommit::from_value).collect()
    }
}

enum Origin {
    Path(PathBuf),
    Reader(Option<Box<dyn Read>>),
}

/// Reads a JSON commit list from a file or a stream.
///
/// A file-backed source re-reads the file on every fetch. A stream-backed
/// source can be fetched once; later fetches report
/// [`SourceError::Unavailable`].
pub struct JsonSource {
    name: String,
    origin: Origin,
}

impl fmt::Debug for JsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match &self.origin {
            Origin::Path(path) => path.display().to_string(),
            Origin::Reader(Some(_)) => "<stream>".to_owned(),
            Origin::Reader(None) => "<consumed stream>".to_owned(),
        };
        f.debug_struct("JsonSource")
            .field("name", &self.name)
            .field("origin", &origin)
            .finish()
    }
}

impl JsonSource {
    /// A source reading the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            origin: Origin::Path(path),
        }
    }

    /// A source reading `reader` once.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self {
            name: "stream".to_owned(),
            origin: Origin::Reader(Some(Box::new(reader))),
        }
    }

    /// Set the name used in logs and errors.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parse a commit list from a JSON string.
    ///
    /// Fails only if `json` is not a list of entries; entries that are not
    /// commits come back as errors in place.
    pub fn parse(json: &str) -> Result<Vec<RawRecord>, SourceError> {
        Ok(serde_json::from_str::<Payload>(json)?.into())
    }
}

impl CommitSource for JsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self) -> Result<Vec<RawRecord>, SourceError> {
        let payload: Payload = match &mut self.origin {
            Origin::Path(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            Origin::Reader(reader) => {
                let Some(reader) = reader.take() else {
                    return Err(SourceError::Unavailable {
                        source_name: self.name.clone(),
                        reason: "stream was already consumed".to_owned(),
                    });
                };
                serde_json::from_reader(BufReader::new(reader))?
            }
        };
        let records: Vec<RawRecord> = payload.into();
        tracing::debug!(source = %self.name, records = records.len(), "fetched commit list");
        Ok(records)
    }
}

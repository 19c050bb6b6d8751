// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

/// Ordered key/value data attached to a primitive.
///
/// Keys are static identifiers (`"sha"`, `"author"`, ...). Hosts typically
/// expose them as `data-*` attributes. Insertion order is preserved so that
/// exported markup is stable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Metadata {
    entries: Vec<(&'static str, String)>,
}

impl Metadata {
    /// Create empty metadata.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`Metadata::insert`].
    #[inline]
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Metadata;

    #[test]
    fn insert_replaces_in_place() {
        let mut meta = Metadata::new().with("sha", "a").with("author", "ana");
        meta.insert("sha", "b");
        assert_eq!(meta.get("sha"), Some("b"));
        assert_eq!(meta.len(), 2);
        let keys: alloc::vec::Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["sha", "author"]);
        assert_eq!(meta.get("missing"), None);
    }
}

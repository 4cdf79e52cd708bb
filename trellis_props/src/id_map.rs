// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-keyed map aggregate.

use indexmap::IndexMap;

/// An insertion-ordered map from caller-chosen string ids to values.
///
/// Inserting under an id that is already present replaces the value in place
/// and keeps its position, so re-registering a handler or a feedback entry
/// under the same id is idempotent with respect to ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct IdMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for IdMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IdMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace the value under `id`, returning the previous value.
    pub fn insert(&mut self, id: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(id.into(), value)
    }

    /// Remove the value under `id`, preserving the order of the others.
    pub fn remove(&mut self, id: &str) -> Option<V> {
        self.entries.shift_remove(id)
    }

    /// Value under `id`.
    pub fn get(&self, id: &str) -> Option<&V> {
        self.entries.get(id)
    }

    /// Mutable value under `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut V> {
        self.entries.get_mut(id)
    }

    /// Whether a value is stored under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    /// `(id, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &mut V) -> bool) {
        self.entries.retain(|k, v| keep(k, v));
    }
}

impl<V> FromIterator<(String, V)> for IdMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

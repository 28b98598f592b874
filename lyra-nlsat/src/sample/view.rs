//! Insertion-Ordered Sample Views.
//!
//! An [`OrderedView`] is a FIFO sequence of sample handles that also supports
//! removal and in-place replacement by identity. Entries are keyed by a
//! per-view stamp that only grows, and a reverse map from handle to stamp
//! locates any entry without scanning.

use super::arena::SampleId;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// FIFO view over sample handles with identity lookup.
#[derive(Debug, Clone, Default)]
pub struct OrderedView {
    entries: BTreeMap<u64, SampleId>,
    stamps: FxHashMap<SampleId, u64>,
    next_stamp: u64,
}

impl OrderedView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle at the back.
    ///
    /// # Panics
    ///
    /// Panics if the handle is already in the view.
    pub fn push_back(&mut self, id: SampleId) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        if self.stamps.insert(id, stamp).is_some() {
            panic!("sample {} appended twice to the same view", id);
        }
        self.entries.insert(stamp, id);
    }

    /// Oldest handle in the view.
    pub fn front(&self) -> Option<SampleId> {
        self.entries.first_key_value().map(|(_, &id)| id)
    }

    /// Remove and return the oldest handle.
    pub fn pop_front(&mut self) -> Option<SampleId> {
        let (_, id) = self.entries.pop_first()?;
        self.stamps.remove(&id);
        Some(id)
    }

    /// Remove a handle wherever it sits. Returns `false` if absent.
    pub fn remove(&mut self, id: SampleId) -> bool {
        match self.stamps.remove(&id) {
            Some(stamp) => {
                self.entries.remove(&stamp);
                true
            }
            None => false,
        }
    }

    /// Replace `old` by `new` keeping its position. Returns `false` if `old`
    /// is absent.
    ///
    /// # Panics
    ///
    /// Panics if `new` is already in the view.
    pub fn replace(&mut self, old: SampleId, new: SampleId) -> bool {
        let Some(stamp) = self.stamps.remove(&old) else {
            return false;
        };
        if self.stamps.insert(new, stamp).is_some() {
            panic!("sample {} replaced into a view that already holds it", new);
        }
        self.entries.insert(stamp, new);
        true
    }

    /// Check if a handle is in the view.
    pub fn contains(&self, id: SampleId) -> bool {
        self.stamps.contains_key(&id)
    }

    /// Number of handles in the view.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = SampleId> + '_ {
        self.entries.values().copied()
    }

    /// Remove every handle.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stamps.clear();
    }
}

//! Pointer registry: which scene node stands in for which contact.
//!
//! Entries are keyed by [`PointerKey`], so every pen contact shares the one
//! `Pen` slot. The registry only tracks ownership; creating, moving, and
//! animating nodes happens in [`crate::engine::OverlayCore`].

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use crate::pointer::{PointerKey, PointerKind};
use crate::scene::NodeId;

/// One tracked contact and the node that represents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEntry {
    pub key: PointerKey,
    pub node: NodeId,
    pub kind: PointerKind,
}

/// Map from logical pointer id to its entry.
#[derive(Debug, Default)]
pub struct PointerRegistry {
    entries: HashMap<PointerKey, PointerEntry>,
}

impl PointerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing entry under the same key is replaced and
    /// returned.
    pub fn insert(&mut self, entry: PointerEntry) -> Option<PointerEntry> {
        self.entries.insert(entry.key, entry)
    }

    /// Remove an entry. Removing an unknown key is a no-op.
    pub fn remove(&mut self, key: PointerKey) -> Option<PointerEntry> {
        self.entries.remove(&key)
    }

    #[must_use]
    pub fn get(&self, key: PointerKey) -> Option<&PointerEntry> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: PointerKey) -> bool {
        self.entries.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All tracked entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &PointerEntry> {
        self.entries.values()
    }
}

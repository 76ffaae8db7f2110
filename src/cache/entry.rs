//! Cache Entry Module
//!
//! Defines a single node of the recency list.

use crate::cache::SlotId;

// == LRU Entry ==
/// A key-value pair plus its links in the recency list.
///
/// `prev` points toward the MRU end (head), `next` toward the LRU end (tail).
#[derive(Debug, Clone)]
pub struct LruEntry {
    /// Immutable after insertion
    pub(crate) key: Box<[u8]>,
    /// Replaced in place on update
    pub(crate) value: Vec<u8>,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
}

impl LruEntry {
    // == Constructor ==
    /// Creates an unlinked entry owning copies of `key` and `value`.
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: value.to_vec(),
            prev: None,
            next: None,
        }
    }

    /// Returns the stored key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the stored value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    // == Cost ==
    /// Bytes this entry charges against the cache budget.
    pub fn cost(&self) -> usize {
        entry_cost(&self.key, &self.value)
    }
}

// == Utility Functions ==
/// Budget cost of a key-value pair: `len(key) + len(value)`.
///
/// Per-entry bookkeeping (links, index slot) is not charged.
pub fn entry_cost(key: &[u8], value: &[u8]) -> usize {
    key.len().saturating_add(value.len())
}

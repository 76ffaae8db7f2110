//! Cache Store Module
//!
//! Main cache engine: a key index over an arena-backed recency list, bounded
//! by a byte budget with strict LRU eviction.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::cache::{entry_cost, CacheStats, LruEntry, RecencyList, SlotId};
use crate::error::{CacheError, Result};

// == Simple LRU ==
/// Byte-budgeted LRU cache.
///
/// The budget is the sum of `len(key) + len(value)` over all live entries and
/// never exceeds `max_size` between calls. Every successful `put`, `set` or
/// `get` makes the touched entry the most recently used one; failed calls
/// change nothing.
///
/// Not thread safe. Wrap it in a lock to share it.
#[derive(Debug)]
pub struct SimpleLru {
    /// Key to list handle. Never owns entries
    index: HashMap<Box<[u8]>, SlotId>,
    /// Owns all entries, MRU at head
    list: RecencyList,
    max_size: usize,
    current_size: usize,
    stats: CacheStats,
}

impl SimpleLru {
    // == Constructor ==
    /// Creates an empty cache that holds at most `max_size` bytes of keys and values.
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            max_size: max_size.get(),
            current_size: 0,
            stats: CacheStats::new(max_size.get()),
        }
    }

    // == Put ==
    /// Inserts or replaces `key`, making it the most recently used entry.
    ///
    /// Least recently used entries are evicted until the budget fits again.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_fits(key, value)?;
        match self.index.get(key).copied() {
            Some(id) => self.replace_value(id, value),
            None => self.insert_new(key, value),
        }
        Ok(())
    }

    // == Put If Absent ==
    /// Inserts `key` only if it is not already cached.
    pub fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_fits(key, value)?;
        if self.index.contains_key(key) {
            return Err(CacheError::already_exists(key));
        }
        self.insert_new(key, value);
        Ok(())
    }

    // == Set ==
    /// Replaces the value of an existing `key` and promotes it.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_fits(key, value)?;
        let id = self
            .index
            .get(key)
            .copied()
            .ok_or_else(|| CacheError::not_found(key))?;
        self.replace_value(id, value);
        Ok(())
    }

    // == Delete ==
    /// Removes `key` and releases its bytes.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        let id = self
            .index
            .remove(key)
            .ok_or_else(|| CacheError::not_found(key))?;
        if let Some(entry) = self.list.unlink(id) {
            self.current_size -= entry.cost();
        }
        Ok(())
    }

    // == Get ==
    /// Returns the value of `key` and promotes it to most recently used.
    ///
    /// The stored bytes are never rewritten by a read.
    pub fn get(&mut self, key: &[u8]) -> Result<&[u8]> {
        let Some(id) = self.index.get(key).copied() else {
            self.stats.record_miss();
            return Err(CacheError::not_found(key));
        };

        self.stats.record_hit();
        self.promote(id);
        self.list
            .get(id)
            .map(LruEntry::value)
            .ok_or_else(|| CacheError::not_found(key))
    }

    // == Peek ==
    /// Returns the value of `key` without touching recency or stats.
    pub fn peek(&self, key: &[u8]) -> Option<&[u8]> {
        let id = self.index.get(key)?;
        self.list.get(*id).map(LruEntry::value)
    }

    /// Checks for `key` without touching recency.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    /// The configured byte budget.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Keys ordered from most to least recently used.
    pub fn keys_mru(&self) -> Vec<Vec<u8>> {
        self.list.iter().map(|entry| entry.key().to_vec()).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.len(), self.current_size);
        stats
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        // Index first: it only refers into the list
        self.index.clear();
        self.list.clear();
        self.current_size = 0;
    }

    fn check_fits(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let size = entry_cost(key, value);
        if size > self.max_size {
            debug!(size, max_size = self.max_size, "rejecting oversized entry");
            return Err(CacheError::EntryTooLarge {
                size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    fn insert_new(&mut self, key: &[u8], value: &[u8]) {
        self.current_size += entry_cost(key, value);
        // Room is made before linking so the new entry is never its own victim
        self.evict_to_fit();
        let id = self.list.link_at_head(LruEntry::new(key, value));
        self.index.insert(key.into(), id);
    }

    fn replace_value(&mut self, id: SlotId, value: &[u8]) {
        let Some(entry) = self.list.get(id) else {
            return;
        };
        let old_cost = entry.cost();
        let new_cost = entry_cost(entry.key(), value);

        // Out of the chain while evicting, so a growing entry cannot evict itself
        self.list.detach(id);
        self.current_size = self.current_size - old_cost + new_cost;
        self.evict_to_fit();

        if let Some(entry) = self.list.get_mut(id) {
            entry.value.clear();
            entry.value.extend_from_slice(value);
        }
        self.list.attach_at_head(id);
    }

    fn promote(&mut self, id: SlotId) {
        if self.list.move_to_head(id) {
            trace!(slot = id.index(), "promoted entry to head");
        }
    }

    fn evict_to_fit(&mut self) {
        while self.current_size > self.max_size {
            let Some(victim) = self.list.pop_tail() else {
                break;
            };
            self.index.remove(victim.key());
            self.current_size -= victim.cost();
            self.stats.record_eviction();
            debug!(
                key = %String::from_utf8_lossy(victim.key()),
                cost = victim.cost(),
                current_size = self.current_size,
                "evicted least recently used entry"
            );
        }
    }

    /// Asserts budget, accounting, index/list agreement and link integrity.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();

        assert!(
            self.current_size <= self.max_size,
            "current_size {} exceeds max_size {}",
            self.current_size,
            self.max_size
        );
        assert_eq!(self.index.len(), self.list.len(), "index/list length mismatch");

        let mut total = 0usize;
        for entry in self.list.iter() {
            assert!(
                self.index.contains_key(entry.key()),
                "list entry missing from index"
            );
            total += entry.cost();
        }
        assert_eq!(total, self.current_size, "byte accounting drifted");

        for (key, id) in &self.index {
            let entry = self.list.get(*id).expect("index points at vacant slot");
            assert_eq!(entry.key(), &key[..], "index key differs from entry key");
        }
    }
}

impl Drop for SimpleLru {
    fn drop(&mut self) {
        if !self.is_empty() {
            trace!(entries = self.len(), bytes = self.current_size, "releasing cache");
        }
        self.clear();
    }
}

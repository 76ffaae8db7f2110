//! Recency List Module
//!
//! Doubly linked list of cache entries ordered by last access, stored in a
//! slot arena and linked by [`SlotId`].
//!
//! ```text
//!   head (MRU) ─► [id_3] ◄──► [id_1] ◄──► [id_2] ◄── tail (LRU)
//! ```
//!
//! The list owns every entry. Handles stay valid until the entry is unlinked,
//! and a vacant slot is reused by the next insertion. Nodes never own their
//! neighbours, so dropping the list is a flat walk over the arena.

use crate::cache::LruEntry;

// == Slot Id ==
/// Stable handle to an entry in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

// == Recency List ==
/// Arena-backed recency list.
///
/// - Head = most recently used
/// - Tail = least recently used (next eviction victim)
#[derive(Debug, Default)]
pub struct RecencyList {
    slots: Vec<Option<LruEntry>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries owned by the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry.
    pub fn head_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Handle of the least recently used entry.
    pub fn tail_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&LruEntry> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut LruEntry> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    // == Link At Head ==
    /// Takes ownership of `entry` and splices it in as the new head.
    ///
    /// The previous head becomes its LRU-side neighbour. On an empty list the
    /// entry is also the tail.
    pub fn link_at_head(&mut self, mut entry: LruEntry) -> SlotId {
        entry.prev = None;
        entry.next = None;
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                SlotId(idx)
            }
            None => {
                self.slots.push(Some(entry));
                SlotId(self.slots.len() - 1)
            }
        };
        self.len += 1;
        self.attach_at_head(id);
        id
    }

    // == Unlink ==
    /// Unlinks the entry and releases its slot, handing the entry back.
    pub fn unlink(&mut self, id: SlotId) -> Option<LruEntry> {
        self.detach(id)?;
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(entry)
    }

    // == Move To Head ==
    /// Promotes an entry to the MRU position.
    ///
    /// Returns false if `id` does not refer to a live entry.
    pub fn move_to_head(&mut self, id: SlotId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_at_head(id);
        true
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_tail(&mut self) -> Option<LruEntry> {
        let id = self.tail?;
        self.unlink(id)
    }

    /// Removes and returns the most recently used entry.
    pub fn pop_head(&mut self) -> Option<LruEntry> {
        let id = self.head?;
        self.unlink(id)
    }

    // == Clear ==
    /// Releases every entry, walking from head to tail.
    pub fn clear(&mut self) {
        while self.pop_head().is_some() {}
        self.slots.clear();
        self.free.clear();
    }

    /// Iterates entries from MRU to LRU.
    pub fn iter(&self) -> RecencyIter<'_> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    /// Takes an entry out of the chain while keeping it owned by the arena.
    ///
    /// A detached entry is invisible to `pop_tail` until it is attached again.
    pub(crate) fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.get(id)?;
            (entry.prev, entry.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_entry) = self.get_mut(prev_id) {
                    prev_entry.next = next;
                }
            }
            None if self.head == Some(id) => self.head = next,
            None => {}
        }

        match next {
            Some(next_id) => {
                if let Some(next_entry) = self.get_mut(next_id) {
                    next_entry.prev = prev;
                }
            }
            None if self.tail == Some(id) => self.tail = prev,
            None => {}
        }

        if let Some(entry) = self.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
        Some(())
    }

    /// Links a detached entry in front of the current head.
    pub(crate) fn attach_at_head(&mut self, id: SlotId) -> Option<()> {
        let old_head = self.head;
        let entry = self.get_mut(id)?;
        entry.prev = None;
        entry.next = old_head;

        match old_head {
            Some(old_id) => {
                if let Some(old_entry) = self.get_mut(old_id) {
                    old_entry.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        Some(())
    }

    /// Asserts link integrity: endpoints, back-links and length agree.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none(), "head set on empty list");
            assert!(self.tail.is_none(), "tail set on empty list");
            assert_eq!(self.len, 0, "empty chain but len = {}", self.len);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle at slot {}", id.0);
            let entry = self.get(id).expect("linked slot is vacant");
            assert_eq!(entry.prev, prev, "broken back-link at slot {}", id.0);
            if entry.next.is_none() {
                assert_eq!(self.tail, Some(id), "chain ends before tail");
            }
            prev = Some(id);
            current = entry.next;
            count += 1;
            assert!(count <= self.len, "chain longer than len");
        }

        assert_eq!(count, self.len);
        assert_eq!(self.slots.len() - self.free.len(), self.len);
    }
}

// == Iterator ==
/// Iterator over entries from head (MRU) to tail (LRU).
#[derive(Debug)]
pub struct RecencyIter<'a> {
    list: &'a RecencyList,
    current: Option<SlotId>,
}

impl<'a> Iterator for RecencyIter<'a> {
    type Item = &'a LruEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.current?)?;
        self.current = entry.next;
        Some(entry)
    }
}

//! Storage Interface Module
//!
//! The boolean key-value contract a storage backend exposes to its callers.

use crate::cache::SimpleLru;

// == Storage Trait ==
/// Key-value storage with soft-failing operations.
///
/// Every method reports success as `true` (or `Some`) and any failure, either
/// an oversized entry or a missing/present key, as `false` (or `None`).
pub trait Storage {
    /// Inserts or replaces `key`.
    fn put(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Inserts `key` only if absent.
    fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Replaces the value of an existing `key`.
    fn set(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Removes `key`.
    fn delete(&mut self, key: &[u8]) -> bool;

    /// Returns a copy of the value stored under `key`.
    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>>;
}

impl Storage for SimpleLru {
    fn put(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::put(self, key, value).is_ok()
    }

    fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::put_if_absent(self, key, value).is_ok()
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::set(self, key, value).is_ok()
    }

    fn delete(&mut self, key: &[u8]) -> bool {
        SimpleLru::delete(self, key).is_ok()
    }

    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        SimpleLru::get(self, key).ok().map(<[u8]>::to_vec)
    }
}

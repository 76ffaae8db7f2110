//! Cache Module
//!
//! Provides a single-threaded in-memory cache with a byte budget and strict
//! LRU eviction.

mod entry;
mod lru;
mod stats;
mod storage;
mod store;


// Re-export public types
pub use entry::{entry_cost, LruEntry};
pub use lru::{RecencyList, SlotId};
pub use stats::CacheStats;
pub use storage::Storage;
pub use store::SimpleLru;

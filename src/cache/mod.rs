//! Cache Module
//!
//! In-memory caching with LRU eviction and TTL expiry.
//!
//! Three structures are kept in lockstep: a key index for O(1) lookup, a
//! recency list for LRU ordering, and a min-heap of expiry deadlines so the
//! soonest-to-expire entry can be found cheaply.

mod entry;
mod expiry;
mod lru;
mod shared;
mod stats;
mod store;


pub(crate) use entry::{Entry, EntryArena, EntryId};
pub(crate) use expiry::ExpiryQueue;
pub(crate) use lru::LruList;

// Re-export public types
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

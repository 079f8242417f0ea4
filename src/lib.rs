//! LRU-TTL Cache - a bounded in-memory key/value cache
//!
//! Combines least-recently-used eviction with optional per-entry TTL expiry.
//! When the cache is full, an already-expired entry is evicted in preference
//! to the least recently used one.

pub mod cache;
pub mod error;

pub use cache::{CacheStats, CacheStore, SharedCache};
pub use error::{CacheError, Result};

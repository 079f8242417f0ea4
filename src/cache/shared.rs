//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`] for plain parallel-thread use.
//!
//! Every operation, `get` included, holds one exclusive lock for its whole
//! duration: `get` mutates recency order and may remove an expired entry, so
//! even the initial index lookup must happen inside the critical section.
//! The section covers only in-memory bookkeeping, never I/O.

use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to a cache shared across threads.
///
/// Clones refer to the same underlying store; independently constructed
/// caches share nothing.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty shared cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(CacheStore::new(capacity)?)),
        })
    }

    // == Get ==
    /// Retrieves the value for `key`; see [`CacheStore::get`].
    pub fn get(&self, key: &K) -> Result<V> {
        self.lock().get(key)
    }

    // == Set ==
    /// Inserts or overwrites `key`; see [`CacheStore::set`].
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        self.lock().set(key, value, ttl)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // == Capacity ==
    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// A poisoned lock only means another thread panicked mid-operation;
    /// the store's structures are updated together, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, CacheStore<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

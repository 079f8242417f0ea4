//! Cache Store Module
//!
//! The cache engine: a key index, a recency list, and an expiry queue kept in
//! lockstep. Entries live in an arena; the index maps keys to handles, and
//! add/update/remove always touch all three structures together.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheStats, Entry, EntryArena, EntryId, ExpiryQueue, LruList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded in-memory cache with LRU eviction and TTL expiry.
///
/// When an insert finds the cache full, an already-expired entry is evicted
/// in preference to the least recently used one. Expired entries are
/// otherwise removed lazily, on the `get` that finds them stale; there is no
/// background sweep.
///
/// The store itself is single-threaded (`&mut self`); [`super::SharedCache`]
/// wraps it for concurrent use.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to entry-handle index
    index: HashMap<K, EntryId>,
    /// Owns every live entry
    arena: EntryArena<K, V>,
    /// Access order, most recently used at the head
    recency: LruList,
    /// Min-heap of expiry deadlines; finite-TTL entries only
    expiry: ExpiryQueue,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            index: HashMap::new(),
            arena: EntryArena::new(),
            recency: LruList::new(),
            expiry: ExpiryQueue::new(),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves the value for `key`, marking the entry as most recently
    /// used.
    ///
    /// An entry whose TTL has elapsed is removed here and reported as
    /// `NotFound`, indistinguishable from a key that never existed.
    pub fn get(&mut self, key: &K) -> Result<V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound);
        };

        let now = Instant::now();
        if self.arena[id].is_expired(now) {
            self.remove_entry(id);
            self.stats.record_expiration();
            self.stats.record_miss();
            trace!("removed lazily expired entry on get");
            return Err(CacheError::NotFound);
        }

        self.recency.move_to_front(&mut self.arena, id);
        self.stats.record_hit();
        Ok(self.arena[id].value.clone())
    }

    // == Set ==
    /// Inserts or overwrites `key` with `value` and an optional TTL.
    ///
    /// `ttl = None` means the entry never expires and is kept out of the
    /// expiry queue. Overwriting updates the existing entry in place and
    /// resets its recency. If the cache is full, exactly one entry is
    /// evicted: the soonest-to-expire entry if it is already past its
    /// deadline, otherwise the least recently used one.
    ///
    /// # Errors
    /// Returns `InvalidTtl` for a zero finite TTL.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        if ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidTtl);
        }

        let now = Instant::now();

        if let Some(&id) = self.index.get(&key) {
            self.update_entry(id, value, ttl, now);
            return Ok(());
        }

        if self.index.len() >= self.capacity {
            self.evict_one(now);
        }
        self.add_entry(key, value, ttl, now);
        Ok(())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Capacity ==
    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Internal: Add ==
    /// Creates a new entry and links it into all three structures.
    fn add_entry(&mut self, key: K, value: V, ttl: Option<Duration>, now: Instant) {
        let entry = Entry::new(key.clone(), value, ttl, now);
        let id = self.arena.insert(entry);

        if ttl.is_some() {
            self.expiry.push(&mut self.arena, id);
        }
        self.recency.push_front(&mut self.arena, id);
        self.index.insert(key, id);
    }

    // == Internal: Update ==
    /// Overwrites an existing entry in place, adjusting its expiry-queue
    /// membership to match the TTL transition, and marks it most recently
    /// used.
    fn update_entry(&mut self, id: EntryId, value: V, ttl: Option<Duration>, now: Instant) {
        let had_ttl = self.arena[id].ttl.is_some();
        {
            let entry = &mut self.arena[id];
            entry.value = value;
            entry.ttl = ttl;
            entry.expires_at = ttl.map(|d| now + d);
        }

        match (had_ttl, ttl.is_some()) {
            // Finite -> no-expiry: leave the queue.
            (true, false) => {
                if let Some(pos) = self.arena[id].heap_idx {
                    self.expiry.remove(&mut self.arena, pos);
                }
            }
            // No-expiry -> finite: join the queue.
            (false, true) => {
                self.expiry.push(&mut self.arena, id);
            }
            // Finite -> finite: the deadline changed under the queue, so the
            // existing position must be re-sifted.
            (true, true) => {
                if let Some(pos) = self.arena[id].heap_idx {
                    self.expiry.fix(&mut self.arena, pos);
                }
            }
            (false, false) => {}
        }

        self.recency.move_to_front(&mut self.arena, id);
    }

    // == Internal: Remove ==
    /// Unlinks an entry from all three structures and frees it.
    fn remove_entry(&mut self, id: EntryId) {
        if let Some(pos) = self.arena[id].heap_idx {
            self.expiry.remove(&mut self.arena, pos);
        }
        self.recency.remove(&mut self.arena, id);
        let entry = self.arena.remove(id);
        self.index.remove(&entry.key);
    }

    // == Internal: Evict ==
    /// Frees exactly one slot: the expiry-queue minimum if it is already
    /// past its deadline, otherwise the recency-list tail.
    fn evict_one(&mut self, now: Instant) {
        let victim = self
            .expiry
            .peek_min()
            .filter(|&id| self.arena[id].is_expired(now))
            .or_else(|| self.recency.peek_oldest());

        if let Some(id) = victim {
            self.remove_entry(id);
            self.stats.record_eviction();
            debug!(len = self.index.len(), "evicted entry to free capacity");
        }
    }

    // == Invariant Checks (test only) ==
    /// Asserts the structural invariants that tie the three structures
    /// together.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.index.len(), self.arena.len(), "index/arena drift");
        assert_eq!(self.index.len(), self.recency.len(), "index/recency drift");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");

        let mut queue_members = 0;
        for &id in self.index.values() {
            let entry = &self.arena[id];
            assert_eq!(
                entry.ttl.is_some(),
                entry.heap_idx.is_some(),
                "queue membership must match TTL finiteness"
            );
            if let Some(pos) = entry.heap_idx {
                queue_members += 1;
                assert_eq!(
                    self.expiry.handle_at(pos),
                    Some(id),
                    "stale queue position"
                );
            }
        }
        assert_eq!(queue_members, self.expiry.len(), "orphaned queue slots");
    }
}

//! Cache Entry Module
//!
//! Defines the cache entry and the arena that owns all entries.
//!
//! Entries are addressed by stable [`EntryId`] handles rather than pointers.
//! The recency list and the expiry queue store handles, and the engine keeps
//! each entry's stored positions (`prev`/`next` links, `heap_idx`) accurate
//! after every list or heap mutation.

use std::time::{Duration, Instant};

// == Entry Handle ==
/// Stable handle to an entry slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryId(usize);

// == Cache Entry ==
/// A single cache entry with value, TTL metadata, and structural positions.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    /// The cache key, mirrored here so eviction can clean up the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Relative TTL; `None` means the entry never expires
    pub ttl: Option<Duration>,
    /// Absolute deadline, `Some` iff `ttl` is `Some`
    pub expires_at: Option<Instant>,
    /// Previous entry in the recency list (towards the most recently used)
    pub prev: Option<EntryId>,
    /// Next entry in the recency list (towards the least recently used)
    pub next: Option<EntryId>,
    /// Current index in the expiry queue, `None` iff the entry has no TTL
    pub heap_idx: Option<usize>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry; the engine links it into the recency list
    /// and expiry queue afterwards.
    pub fn new(key: K, value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            key,
            value,
            ttl,
            expires_at: ttl.map(|d| now + d),
            prev: None,
            next: None,
            heap_idx: None,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's deadline has passed.
    ///
    /// Boundary condition: an entry is expired only when `now` is strictly
    /// after the deadline. An entry whose deadline equals `now` is still
    /// alive. Entries without a TTL never expire.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => deadline < now,
            None => false,
        }
    }
}

// == Entry Arena ==
/// Slot-based arena owning every live entry.
///
/// Freed slots are recycled via a free list, so a handle stays valid until
/// its entry is removed. The engine never holds a handle across the removal
/// of the entry it points to.
#[derive(Debug)]
pub(crate) struct EntryArena<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
}

impl<K, V> EntryArena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live entries.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Stores an entry and returns its handle.
    pub fn insert(&mut self, entry: Entry<K, V>) -> EntryId {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                EntryId(idx)
            }
            None => {
                self.slots.push(Some(entry));
                EntryId(self.slots.len() - 1)
            }
        }
    }

    /// Removes an entry, invalidating its handle and recycling the slot.
    pub fn remove(&mut self, id: EntryId) -> Entry<K, V> {
        let entry = self.slots[id.0].take().expect("stale entry handle");
        self.free.push(id.0);
        entry
    }

    pub fn get(&self, id: EntryId) -> &Entry<K, V> {
        self.slots[id.0].as_ref().expect("stale entry handle")
    }

    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry<K, V> {
        self.slots[id.0].as_mut().expect("stale entry handle")
    }
}

impl<K, V> std::ops::Index<EntryId> for EntryArena<K, V> {
    type Output = Entry<K, V>;

    fn index(&self, id: EntryId) -> &Entry<K, V> {
        self.get(id)
    }
}

impl<K, V> std::ops::IndexMut<EntryId> for EntryArena<K, V> {
    fn index_mut(&mut self, id: EntryId) -> &mut Entry<K, V> {
        self.get_mut(id)
    }
}

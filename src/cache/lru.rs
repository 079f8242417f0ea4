//! Recency List Module
//!
//! Doubly linked list over the entry arena tracking access order.
//!
//! Head = most recently used, tail = least recently used (the eviction
//! candidate). The links live inside the entries themselves (`prev`/`next`),
//! so every operation is O(1) given an entry handle.

use super::{EntryArena, EntryId};

// == Recency List ==
/// Access-order list; does not own entries, only head/tail handles.
#[derive(Debug, Default)]
pub(crate) struct LruList {
    head: Option<EntryId>,
    tail: Option<EntryId>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Links a detached entry in as the most recently used.
    pub fn push_front<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: EntryId) {
        arena[id].prev = None;
        arena[id].next = self.head;

        if let Some(old_head) = self.head {
            arena[old_head].prev = Some(id);
        }
        self.head = Some(id);

        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.len += 1;
    }

    // == Move To Front ==
    /// Marks an already-linked entry as most recently used.
    pub fn move_to_front<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: EntryId) {
        if self.head == Some(id) {
            return;
        }
        self.remove(arena, id);
        self.push_front(arena, id);
    }

    // == Remove ==
    /// Unlinks an entry, leaving it detached.
    pub fn remove<K, V>(&mut self, arena: &mut EntryArena<K, V>, id: EntryId) {
        let prev = arena[id].prev.take();
        let next = arena[id].next.take();

        match prev {
            Some(p) => arena[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => arena[n].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without unlinking it.
    pub fn peek_oldest(&self) -> Option<EntryId> {
        self.tail
    }

    // == Length ==
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn peek_newest(&self) -> Option<EntryId> {
        self.head
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::super::Entry;
    use super::*;
    use std::time::Instant;

    fn fixture(keys: &[&'static str]) -> (EntryArena<&'static str, i32>, LruList, Vec<EntryId>) {
        let mut arena = EntryArena::new();
        let mut list = LruList::new();
        let now = Instant::now();
        let mut ids = Vec::new();

        // Entries pushed in order, so the last key pushed is the head.
        for (i, key) in keys.iter().enumerate() {
            let id = arena.insert(Entry::new(*key, i as i32, None, now));
            list.push_front(&mut arena, id);
            ids.push(id);
        }
        (arena, list, ids)
    }

    fn drain_oldest_keys(
        arena: &mut EntryArena<&'static str, i32>,
        list: &mut LruList,
    ) -> Vec<&'static str> {
        let mut keys = Vec::new();
        while let Some(id) = list.peek_oldest() {
            list.remove(arena, id);
            keys.push(arena.remove(id).key);
        }
        keys
    }

    #[test]
    fn test_lru_new_is_empty() {
        let list = LruList::new();
        assert_eq!(list.len(), 0);
        assert!(list.peek_oldest().is_none());
    }

    #[test]
    fn test_lru_push_front_order() {
        let (_arena, list, ids) = fixture(&["a", "b", "c"]);

        assert_eq!(list.len(), 3);
        // "a" was pushed first, so it sits at the tail.
        assert_eq!(list.peek_oldest(), Some(ids[0]));
        assert_eq!(list.peek_newest(), Some(ids[2]));
    }

    #[test]
    fn test_lru_move_to_front() {
        let (mut arena, mut list, ids) = fixture(&["a", "b", "c"]);

        list.move_to_front(&mut arena, ids[0]);

        // "b" is now the oldest; drain order follows.
        assert_eq!(list.peek_oldest(), Some(ids[1]));
        assert_eq!(drain_oldest_keys(&mut arena, &mut list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_lru_move_head_to_front_is_noop() {
        let (mut arena, mut list, ids) = fixture(&["a", "b"]);

        list.move_to_front(&mut arena, ids[1]);

        assert_eq!(list.len(), 2);
        assert_eq!(list.peek_newest(), Some(ids[1]));
        assert_eq!(list.peek_oldest(), Some(ids[0]));
    }

    #[test]
    fn test_lru_remove_middle() {
        let (mut arena, mut list, ids) = fixture(&["a", "b", "c"]);

        list.remove(&mut arena, ids[1]);
        arena.remove(ids[1]);

        assert_eq!(list.len(), 2);
        assert_eq!(drain_oldest_keys(&mut arena, &mut list), vec!["a", "c"]);
    }

    #[test]
    fn test_lru_remove_only_entry() {
        let (mut arena, mut list, ids) = fixture(&["a"]);

        list.remove(&mut arena, ids[0]);

        assert_eq!(list.len(), 0);
        assert!(list.peek_oldest().is_none());
        assert!(list.peek_newest().is_none());
    }

    #[test]
    fn test_lru_remove_tail_updates_tail() {
        let (mut arena, mut list, ids) = fixture(&["a", "b", "c"]);

        list.remove(&mut arena, ids[0]);

        assert_eq!(list.peek_oldest(), Some(ids[1]));
    }
}

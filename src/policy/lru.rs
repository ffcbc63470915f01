//! # Least Recently Used (LRU) sub-cache
//!
//! Backs the **Stabilization** regime: recently touched entries stay hot and
//! the least recently used entry is evicted once the sub-cache grows past its
//! capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      LruSubCache<K, V>                           │
//!   │                                                                  │
//!   │   index: FxHashMap<K, SlotId>                                    │
//!   │   ┌─────────┬──────────┐                                         │
//!   │   │  "a"    │  id_1  ──┼──┐                                      │
//!   │   │  "b"    │  id_2  ──┼──┼──┐                                   │
//!   │   └─────────┴──────────┘  │  │                                   │
//!   │                           ▼  ▼                                   │
//!   │   order: IntrusiveList<(K, V)>                                   │
//!   │     front ──► [a] ◄──► [b] ◄──► [c] ◄── back                     │
//!   │               LRU                 MRU                            │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method           | Complexity | Effect on order                      |
//! |------------------|------------|--------------------------------------|
//! | `insert(k, v)`   | O(1)       | new or updated key moves to MRU      |
//! | `get(&k)`        | O(1)       | hit moves to MRU                     |
//! | `peek(&k)`       | O(1)       | none                                 |
//! | `peek_lru()`     | O(1)       | none                                 |
//! | `recency_rank()` | O(n)       | none (0 = MRU)                       |
//!
//! Recency is only changed by `insert` and by `get` hits, never by eviction.
//!
//! ## Example
//!
//! ```
//! use regime_cache::policy::lru::LruSubCache;
//! use regime_cache::traits::SubCache;
//!
//! let mut cache = LruSubCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3); // evicts "b"
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.get(&"a"), Some(&1));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::regime::EvictionPolicy;
use crate::traits::SubCache;

/// Recency-ordered sub-cache.
#[derive(Debug)]
pub struct LruSubCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<(K, V)>,
    capacity: usize,
}

impl<K, V> LruSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty sub-cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts or replaces `key` at the MRU end.
    ///
    /// Returns the evicted LRU entry when the insert pushed the sub-cache
    /// past capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.1 = value;
            }
            self.order.move_to_back(id);
            return None;
        }

        let id = self.order.push_back((key.clone(), value));
        self.index.insert(key, id);

        if self.order.len() > self.capacity {
            return self.pop_lru();
        }
        None
    }

    /// Returns the value for `key` and promotes it to MRU.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_back(id);
        self.order.get(id).map(|(_, v)| v)
    }

    /// Returns the value for `key` without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|(_, v)| v)
    }

    /// Least recently used entry.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|(k, v)| (k, v))
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_front()?;
        self.index.remove(&key);
        Some((key, value))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|(_, v)| v)
    }

    /// Position of `key` in recency order, 0 being the most recent.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let id = *self.index.get(key)?;
        let from_front = self.order.iter_entries().position(|(slot, _)| slot == id)?;
        Some(self.order.len() - 1 - from_front)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|(k, _)| k)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_links()?;
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "lru index has {} keys but order list has {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new("lru sub-cache exceeds capacity"));
        }
        for (id, (key, _)) in self.order.iter_entries() {
            if self.index.get(key) != Some(&id) {
                return Err(InvariantError::new("lru index points at wrong node"));
            }
        }
        Ok(())
    }
}

impl<K, V> SubCache<K, V> for LruSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruSubCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.insert("c", 3), Some(("b", 2)));
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn reinsert_updates_value_and_recency() {
        let mut cache = LruSubCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert("a", 10), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek_lru(), Some((&"b", &2)));
        cache.insert("c", 3);
        assert_eq!(cache.peek(&"a"), Some(&10));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn idempotent_reset_keeps_size() {
        let mut cache = LruSubCache::new(4);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 1);
        cache.insert("a", 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.recency_rank(&"a"), Some(0));
        assert_eq!(cache.recency_rank(&"b"), Some(1));
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = LruSubCache::new(2);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.peek(&1), Some(&"one"));
        cache.insert(3, "three");
        assert!(!cache.contains(&1));
    }

    #[test]
    fn remove_and_clear() {
        let mut cache = LruSubCache::new(3);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.remove(&1), Some(1));
        assert_eq!(cache.remove(&1), None);
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![2]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.pop_lru(), None);
        cache.check_invariants().unwrap();
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_len_never_exceeds_capacity(
                capacity in 1usize..16,
                ops in prop::collection::vec((any::<bool>(), 0u8..32), 0..200)
            ) {
                let mut cache = LruSubCache::new(capacity);
                for (is_get, key) in ops {
                    if is_get {
                        cache.get(&key);
                    } else {
                        cache.insert(key, key as u32);
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }
        }
    }
}

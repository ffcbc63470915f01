//! # Least Frequently Used (LFU) sub-cache
//!
//! Backs the **Optimization** regime: entries that keep being used survive,
//! one-off entries are the first to go.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!   entries: IntrusiveList<LfuEntry<K, V>>   (first-insertion order)
//!
//!     front ──► [a:3] ◄──► [b:1] ◄──► [c:1] ◄── back
//!               oldest                 newest
//!
//!   insert(d) at capacity:
//!     scan front → back for the minimum access_count
//!     b and c tie at 1, b is met first → evict b
//! ```
//!
//! Re-inserting an existing key counts as a use: the counter goes up by one,
//! the value is replaced, and the entry keeps its position. Positions never
//! move, so "first in iteration order" always means "present the longest".
//!
//! ## Performance
//!
//! | Operation           | Time | Notes                        |
//! |---------------------|------|------------------------------|
//! | `get` hit           | O(1) | counter increment            |
//! | `insert` existing   | O(1) | counter increment + replace  |
//! | `insert` new, full  | O(n) | linear scan for the minimum  |
//!
//! n is bounded by the sub-cache capacity.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::regime::EvictionPolicy;
use crate::traits::SubCache;

#[derive(Debug)]
struct LfuEntry<K, V> {
    key: K,
    value: V,
    access_count: u64,
}

/// Frequency-ordered sub-cache with oldest-first tie-breaking.
#[derive(Debug)]
pub struct LfuSubCache<K, V> {
    index: FxHashMap<K, SlotId>,
    entries: IntrusiveList<LfuEntry<K, V>>,
    capacity: usize,
}

impl<K, V> LfuSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: IntrusiveList::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts `key` with a count of 1, or bumps and overwrites an existing one.
    ///
    /// Returns the evicted entry when a new key arrived at capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.access_count = entry.access_count.saturating_add(1);
                entry.value = value;
            }
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.pop_lfu()
        } else {
            None
        };

        let id = self.entries.push_back(LfuEntry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);
        evicted
    }

    /// Returns the value for `key` and counts the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        let entry = self.entries.get_mut(id)?;
        entry.access_count = entry.access_count.saturating_add(1);
        Some(&entry.value)
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|e| &e.value)
    }

    /// Access count for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|e| e.access_count)
    }

    /// The entry `pop_lfu` would evict next.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let id = self.lfu_victim()?;
        self.entries.get(id).map(|e| (&e.key, &e.value))
    }

    /// Removes and returns the least frequently used entry.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let id = self.lfu_victim()?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.entries.remove(id).map(|e| e.value)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    // Strict `<` keeps the earliest entry among equal counts.
    fn lfu_victim(&self) -> Option<SlotId> {
        let mut victim: Option<(SlotId, u64)> = None;
        for (id, entry) in self.entries.iter_entries() {
            match victim {
                Some((_, min)) if entry.access_count >= min => {},
                _ => victim = Some((id, entry.access_count)),
            }
        }
        victim.map(|(id, _)| id)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.entries.check_links()?;
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "lfu index has {} keys but entry list has {} nodes",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new("lfu sub-cache exceeds capacity"));
        }
        for (id, entry) in self.entries.iter_entries() {
            if entry.access_count == 0 {
                return Err(InvariantError::new("lfu entry with zero access count"));
            }
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new("lfu index points at wrong node"));
            }
        }
        Ok(())
    }
}

impl<K, V> SubCache<K, V> for LfuSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lfu
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }
}

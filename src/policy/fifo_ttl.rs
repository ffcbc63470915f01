//! # FIFO + TTL sub-cache
//!
//! Backs the **Exploration** regime: entries are evicted in arrival order and
//! expire once older than the configured time-to-live.
//!
//! ## Architecture
//!
//! ```text
//!   index:  FxHashMap<K, SlotId>              key → queue node
//!   queue:  IntrusiveList<FifoEntry<K, V>>    arrival order, drives eviction
//!   expiry: IntrusiveList<K>                  last-write order, drives purging
//!
//!   queue   front ──► [a @t0] ◄──► [b @t1] ◄──► [c @t2] ◄── back
//!   expiry  front ──► [b]     ◄──► [c]     ◄──► [a]     ◄── back   (a rewritten at t3)
//! ```
//!
//! ## Expiry
//!
//! Expiry is lazy. There is no background sweep; expired entries are reaped
//! when they are touched:
//!
//! - `insert` first purges expired entries, then evicts the front of the
//!   arrival queue if a new key would exceed capacity.
//! - `get` deletes an expired entry on sight and reports [`FifoLookup::Expired`].
//! - `purge_expired` can be called explicitly to reclaim memory.
//!
//! An entry is expired iff `now_ms - inserted_at_ms > ttl_ms`; an entry
//! exactly `ttl` old is still served. Overwriting a key refreshes its
//! timestamp and value but keeps its place in the arrival queue. The rewrite
//! does move the key to the back of the expiry list, so that list stays
//! sorted by timestamp and a purge stops at the first fresh key: O(1) per
//! expired entry, nothing for fresh ones. The early stop assumes the clock
//! does not run backwards. If it does, a stale entry may outlive a purge, but
//! `get` and `peek` still check its stamp and never serve it.
//!
//! ## Example
//!
//! ```
//! use regime_cache::policy::fifo_ttl::{FifoLookup, FifoTtlSubCache};
//!
//! let mut cache = FifoTtlSubCache::new(8, 1);
//! cache.insert("a", 1, 0);
//! assert_eq!(cache.get(&"a", 500), FifoLookup::Hit(&1));
//! assert_eq!(cache.get(&"a", 1_500), FifoLookup::Expired);
//! assert_eq!(cache.get(&"a", 1_500), FifoLookup::Missing);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::regime::EvictionPolicy;
use crate::traits::SubCache;

#[derive(Debug)]
struct FifoEntry<K, V> {
    key: K,
    value: V,
    inserted_at_ms: u64,
    expiry_slot: SlotId,
}

/// Outcome of a [`FifoTtlSubCache::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoLookup<'a, V> {
    Hit(&'a V),
    /// The entry was present but past its TTL; it has been removed.
    Expired,
    Missing,
}

impl<'a, V> FifoLookup<'a, V> {
    pub fn hit(self) -> Option<&'a V> {
        match self {
            FifoLookup::Hit(v) => Some(v),
            FifoLookup::Expired | FifoLookup::Missing => None,
        }
    }
}

/// What a [`FifoTtlSubCache::insert`] displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoInsert<K, V> {
    /// Oldest entry pushed out to make room for a new key.
    pub evicted: Option<(K, V)>,
    /// Entries dropped by the purge that runs before the write.
    pub expired: usize,
}

/// Arrival-ordered sub-cache with per-entry expiry.
#[derive(Debug)]
pub struct FifoTtlSubCache<K, V> {
    index: FxHashMap<K, SlotId>,
    queue: IntrusiveList<FifoEntry<K, V>>,
    expiry: IntrusiveList<K>,
    capacity: usize,
    ttl_ms: u64,
}

impl<K, V> FifoTtlSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            queue: IntrusiveList::with_capacity(capacity),
            expiry: IntrusiveList::with_capacity(capacity),
            capacity,
            ttl_ms: ttl_secs.saturating_mul(1000),
        }
    }

    #[inline]
    fn is_expired(&self, inserted_at_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(inserted_at_ms) > self.ttl_ms
    }

    /// Purges expired entries, then inserts or overwrites `key` stamped `now_ms`.
    pub fn insert(&mut self, key: K, value: V, now_ms: u64) -> FifoInsert<K, V> {
        let expired = self.purge_expired(now_ms);

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.queue.get_mut(id) {
                entry.value = value;
                entry.inserted_at_ms = now_ms;
                self.expiry.move_to_back(entry.expiry_slot);
            }
            return FifoInsert {
                evicted: None,
                expired,
            };
        }

        let evicted = if self.queue.len() >= self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        let expiry_slot = self.expiry.push_back(key.clone());
        let id = self.queue.push_back(FifoEntry {
            key: key.clone(),
            value,
            inserted_at_ms: now_ms,
            expiry_slot,
        });
        self.index.insert(key, id);
        FifoInsert { evicted, expired }
    }

    /// Looks up `key`, deleting it if it has outlived the TTL.
    pub fn get(&mut self, key: &K, now_ms: u64) -> FifoLookup<'_, V> {
        let Some(&id) = self.index.get(key) else {
            return FifoLookup::Missing;
        };
        let expired = match self.queue.get(id) {
            Some(entry) => self.is_expired(entry.inserted_at_ms, now_ms),
            None => return FifoLookup::Missing,
        };
        if expired {
            self.unlink(id);
            return FifoLookup::Expired;
        }
        match self.queue.get(id) {
            Some(entry) => FifoLookup::Hit(&entry.value),
            None => FifoLookup::Missing,
        }
    }

    /// Returns the value for `key` if present and fresh, without removing
    /// expired entries.
    pub fn peek(&self, key: &K, now_ms: u64) -> Option<&V> {
        let id = *self.index.get(key)?;
        let entry = self.queue.get(id)?;
        (!self.is_expired(entry.inserted_at_ms, now_ms)).then_some(&entry.value)
    }

    /// Oldest entry in arrival order, expired or not.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.queue.front().map(|e| (&e.key, &e.value))
    }

    /// Removes and returns the oldest entry.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let id = self.queue.front_id()?;
        self.unlink(id).map(|e| (e.key, e.value))
    }

    /// Insertion timestamp of `key`.
    pub fn inserted_at_ms(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.queue.get(id).map(|e| e.inserted_at_ms)
    }

    /// Removes expired entries from the front of the expiry list and returns
    /// how many were removed.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let mut removed = 0;
        while let Some(id) = self.expiry.front().and_then(|key| self.index.get(key).copied()) {
            let stale = match self.queue.get(id) {
                Some(entry) => self.is_expired(entry.inserted_at_ms, now_ms),
                None => false,
            };
            if !stale {
                break;
            }
            self.unlink(id);
            removed += 1;
        }
        removed
    }

    /// Keys in arrival order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.queue.iter().map(|e| &e.key)
    }

    fn unlink(&mut self, id: SlotId) -> Option<FifoEntry<K, V>> {
        let entry = self.queue.remove(id)?;
        self.expiry.remove(entry.expiry_slot);
        self.index.remove(&entry.key);
        Some(entry)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.queue.check_links()?;
        self.expiry.check_links()?;
        if self.index.len() != self.queue.len() || self.queue.len() != self.expiry.len() {
            return Err(InvariantError::new(format!(
                "fifo index has {} keys, queue {} nodes, expiry list {} nodes",
                self.index.len(),
                self.queue.len(),
                self.expiry.len()
            )));
        }
        if self.queue.len() > self.capacity {
            return Err(InvariantError::new("fifo sub-cache exceeds capacity"));
        }
        for (id, entry) in self.queue.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new("fifo index points at wrong node"));
            }
            if self.expiry.get(entry.expiry_slot) != Some(&entry.key) {
                return Err(InvariantError::new("fifo expiry slot holds another key"));
            }
        }
        Ok(())
    }
}

impl<K, V> SubCache<K, V> for FifoTtlSubCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::FifoTtl
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn clear(&mut self) {
        self.index.clear();
        self.queue.clear();
        self.expiry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_in_arrival_order() {
        let mut cache = FifoTtlSubCache::new(3, 60);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 0);
        cache.insert("c", 3, 0);
        assert_eq!(cache.insert("d", 4, 0).evicted, Some(("a", 1)));
        assert_eq!(cache.get(&"a", 0), FifoLookup::Missing);
        assert_eq!(cache.get(&"b", 0), FifoLookup::Hit(&2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn get_does_not_reorder() {
        let mut cache = FifoTtlSubCache::new(2, 60);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 0);
        cache.get(&"a", 0);
        assert_eq!(cache.insert("c", 3, 0).evicted, Some(("a", 1)));
    }

    #[test]
    fn ttl_boundary_is_inclusive() {
        let mut cache = FifoTtlSubCache::new(2, 1);
        cache.insert("a", 1, 1_000);
        assert_eq!(cache.get(&"a", 2_000), FifoLookup::Hit(&1));
        assert_eq!(cache.get(&"a", 2_001), FifoLookup::Expired);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_purges_expired_before_capacity_check() {
        let mut cache = FifoTtlSubCache::new(2, 1);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 1_500);
        // "a" expired at 2_500; "b" still fresh, so no eviction is needed
        let outcome = cache.insert("c", 3, 2_500);
        assert_eq!(outcome.evicted, None);
        assert_eq!(outcome.expired, 1);
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn overwrite_refreshes_timestamp_in_place() {
        let mut cache = FifoTtlSubCache::new(2, 1);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 0);
        assert_eq!(cache.insert("a", 10, 900).evicted, None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.inserted_at_ms(&"a"), Some(900));
        assert_eq!(cache.peek_oldest(), Some((&"a", &10)));
        // b expires at 1_001, a survives until 1_900
        assert_eq!(cache.get(&"a", 1_500), FifoLookup::Hit(&10));
        assert_eq!(cache.get(&"b", 1_500), FifoLookup::Expired);
    }

    #[test]
    fn peek_respects_ttl_without_removing() {
        let mut cache = FifoTtlSubCache::new(2, 1);
        cache.insert(1, "x", 0);
        assert_eq!(cache.peek(&1, 1_000), Some(&"x"));
        assert_eq!(cache.peek(&1, 1_001), None);
        assert!(cache.contains(&1));
    }

    #[test]
    fn purge_expired_counts_removed() {
        let mut cache = FifoTtlSubCache::new(4, 1);
        cache.insert(1, 1, 0);
        cache.insert(2, 2, 0);
        // nothing is older than a second yet, so this write purges nothing
        assert_eq!(cache.insert(3, 3, 900).expired, 0);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.purge_expired(1_500), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(1_500), 0);
        assert_eq!(cache.pop_oldest(), Some((3, 3)));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn purge_keeps_rewritten_entry_and_drops_older_ones_behind_it() {
        let mut cache = FifoTtlSubCache::new(4, 1);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 100);
        cache.insert("c", 3, 200);
        // "a" stays first in arrival order but is now the freshest write
        cache.insert("a", 10, 800);
        cache.check_invariants().unwrap();

        assert_eq!(cache.purge_expired(1_250), 2);
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(cache.peek(&"a", 1_250), Some(&10));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn purge_with_nothing_stale_is_a_no_op() {
        let mut cache = FifoTtlSubCache::new(3, 5);
        for (i, t) in [0u64, 1_000, 2_000].into_iter().enumerate() {
            cache.insert(i, i, t);
        }
        assert_eq!(cache.purge_expired(5_000), 0);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.purge_expired(5_001), 1);
        assert_eq!(cache.peek_oldest(), Some((&1, &1)));
    }

    #[test]
    fn clock_moving_backwards_never_serves_stale_entry() {
        let mut cache = FifoTtlSubCache::new(4, 1);
        cache.insert("late", 1, 5_000);
        cache.insert("early", 2, 0);
        // "late" heads the expiry list and is fresh, so the purge stops there
        assert_eq!(cache.purge_expired(5_500), 0);
        assert_eq!(cache.get(&"early", 5_500), FifoLookup::Expired);
        assert_eq!(cache.get(&"late", 5_500), FifoLookup::Hit(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn clear_empties_every_list() {
        let mut cache = FifoTtlSubCache::new(2, 1);
        cache.insert(1, 1, 0);
        cache.insert(2, 2, 0);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.purge_expired(10_000), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lookup_hit_helper() {
        assert_eq!(FifoLookup::Hit(&3).hit(), Some(&3));
        assert_eq!(FifoLookup::<u8>::Expired.hit(), None);
        assert_eq!(FifoLookup::<u8>::Missing.hit(), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_never_serves_expired(
                capacity in 1usize..10,
                ttl_secs in 1u64..4,
                ops in prop::collection::vec((any::<bool>(), 0u8..16, 0u64..1_500), 0..120)
            ) {
                let mut cache = FifoTtlSubCache::new(capacity, ttl_secs);
                let mut now = 0u64;
                for (is_get, key, step) in ops {
                    now += step;
                    if is_get {
                        let stamp = cache.inserted_at_ms(&key);
                        if let FifoLookup::Hit(_) = cache.get(&key, now) {
                            let stamp = stamp.expect("hit implies stamp");
                            prop_assert!(now - stamp <= ttl_secs * 1000);
                        }
                    } else {
                        cache.insert(key, key, now);
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }
        }
    }
}

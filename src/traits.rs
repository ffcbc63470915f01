//! # Sub-cache trait
//!
//! Each regime owns one sub-cache with its own eviction policy. The policies
//! differ in how they insert and look up (LFU counts uses, FIFO+TTL needs the
//! current time), so those operations live on the concrete types. What the
//! adaptive cache needs uniformly (occupancy, membership, clearing) is
//! captured by [`SubCache`].
//!
//! ```text
//!                    ┌───────────────────────────────┐
//!                    │        SubCache<K, V>         │
//!                    │                               │
//!                    │  policy() → EvictionPolicy    │
//!                    │  len / is_empty / capacity    │
//!                    │  contains(&K) → bool          │
//!                    │  clear(&mut)                  │
//!                    └───────────────┬───────────────┘
//!                                    │
//!          ┌─────────────────────────┼─────────────────────────┐
//!          ▼                         ▼                         ▼
//!   ┌──────────────┐        ┌────────────────┐        ┌──────────────────┐
//!   │ LruSubCache  │        │  LfuSubCache   │        │ FifoTtlSubCache  │
//!   │ Stabilization│        │  Optimization  │        │   Exploration    │
//!   │ get: promote │        │ get: count + 1 │        │ get(now): expire │
//!   └──────────────┘        └────────────────┘        └──────────────────┘
//! ```
//!
//! `contains` reports physical presence only: an expired FIFO entry that
//! has not been touched yet still counts.

use crate::regime::EvictionPolicy;

/// Operations shared by every regime sub-cache.
pub trait SubCache<K, V> {
    /// Eviction algorithm of this sub-cache.
    fn policy(&self) -> EvictionPolicy;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the sub-cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries retained after any insert.
    fn capacity(&self) -> usize;

    /// Checks for a key without touching recency, frequency or expiry.
    fn contains(&self, key: &K) -> bool;

    /// Removes every entry and any policy bookkeeping.
    fn clear(&mut self);
}

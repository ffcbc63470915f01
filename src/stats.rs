//! Point-in-time snapshot of cache occupancy and lookup counters.

use crate::regime::Regime;

/// Snapshot returned by [`AdaptiveCache::stats`](crate::cache::AdaptiveCache::stats).
///
/// Sizes are physical occupancy: exploration entries past their TTL still
/// count until a `get`, `set` or purge reaps them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub lru_size: usize,
    pub lfu_size: usize,
    pub fifo_size: usize,

    pub hits: u64,
    pub misses: u64,

    // not part of the hit rate; reset together with hits/misses
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    /// Entries across all three sub-caches.
    pub fn total_size(&self) -> usize {
        self.lru_size + self.lfu_size + self.fifo_size
    }

    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / (hits + misses)`, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Occupancy of the sub-cache backing `regime`.
    pub fn size_of(&self, regime: Regime) -> usize {
        match regime {
            Regime::Stabilization => self.lru_size,
            Regime::Optimization => self.lfu_size,
            Regime::Exploration => self.fifo_size,
        }
    }
}

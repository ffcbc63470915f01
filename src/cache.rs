//! # Regime-aware adaptive cache
//!
//! One cache made of three independently bounded sub-caches. The caller picks
//! the regime on `set`; the regime picks the eviction policy.
//!
//! ## Architecture
//!
//! ```text
//!   set(key, value, regime)
//!        │
//!        ├── Stabilization ──► LruSubCache      (recency)
//!        ├── Optimization  ──► LfuSubCache      (frequency, oldest on ties)
//!        └── Exploration   ──► FifoTtlSubCache  (arrival order + TTL)
//!
//!   get(key)
//!        │
//!        └── Stabilization ──► Optimization ──► Exploration ──► miss
//!            first hit wins; an expired exploration entry is deleted
//!            and counted as a miss
//! ```
//!
//! Each sub-cache holds at most `max_entries_per_policy` entries, so the
//! whole cache never exceeds three times that.
//!
//! ## Keys in more than one regime
//!
//! Sub-caches do not coordinate. Setting the same key under two regimes keeps
//! two independent copies; `get` returns whichever the search order reaches
//! first and `clear(Some(regime))` only drops the copy in that regime.
//!
//! ## Expiry
//!
//! TTL expiry is lazy and read-checked. Expired exploration entries are
//! reaped by `set(.., Exploration)`, by a `get` that reaches them, or by an
//! explicit [`AdaptiveCache::purge_expired`]. Until then they still count
//! towards [`CacheStats::fifo_size`], but are never returned.
//!
//! ## Example
//!
//! ```
//! use regime_cache::cache::AdaptiveCache;
//! use regime_cache::clock::ManualClock;
//! use regime_cache::config::CacheConfig;
//! use regime_cache::regime::Regime;
//!
//! let clock = ManualClock::new(0);
//! let config = CacheConfig { max_entries_per_policy: 2, fifo_ttl_secs: 1, ..CacheConfig::default() };
//! let mut cache = AdaptiveCache::with_clock(config, clock.clone()).unwrap();
//!
//! cache.set("fixture", 1, Regime::Stabilization);
//! cache.set("draft", 2, Regime::Exploration);
//! assert_eq!(cache.get(&"fixture"), Some(1));
//!
//! clock.advance_ms(1_500);
//! assert_eq!(cache.get(&"draft"), None);
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::classifier;
use crate::clock::{Clock, SystemClock};
use crate::confidence::ConfidenceAggregator;
use crate::config::CacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::metadata::RegimeMetadataTable;
use crate::policy::fifo_ttl::{FifoLookup, FifoTtlSubCache};
use crate::policy::lfu::LfuSubCache;
use crate::policy::lru::LruSubCache;
use crate::regime::Regime;
use crate::stats::CacheStats;
use crate::traits::SubCache;

/// Three-policy cache routed by [`Regime`].
pub struct AdaptiveCache<K, V, C = SystemClock> {
    stabilization: LruSubCache<K, V>,
    optimization: LfuSubCache<K, V>,
    exploration: FifoTtlSubCache<K, V>,
    config: CacheConfig,
    metadata: RegimeMetadataTable,
    clock: C,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
}

impl<K, V> AdaptiveCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache on the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`CacheConfig::validate`].
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> AdaptiveCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`CacheConfig::validate`].
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self, ConfigError> {
        let metadata = config.validate()?;
        let capacity = config.max_entries_per_policy;

        tracing::info!(
            max_entries_per_policy = capacity,
            fifo_ttl_secs = config.fifo_ttl_secs,
            profile = %config.profile,
            "adaptive cache created"
        );

        Ok(Self {
            stabilization: LruSubCache::new(capacity),
            optimization: LfuSubCache::new(capacity),
            exploration: FifoTtlSubCache::new(capacity, config.fifo_ttl_secs),
            config,
            metadata,
            clock,
            hits: 0,
            misses: 0,
            evictions: 0,
            expirations: 0,
        })
    }

    /// Stores `value` under `key` in the sub-cache for `regime`.
    pub fn set(&mut self, key: K, value: V, regime: Regime) {
        let evicted = match regime {
            Regime::Stabilization => self.stabilization.insert(key, value).is_some(),
            Regime::Optimization => self.optimization.insert(key, value).is_some(),
            Regime::Exploration => {
                let outcome = self.exploration.insert(key, value, self.clock.now_ms());
                self.record_expired(outcome.expired);
                outcome.evicted.is_some()
            },
        };

        if evicted {
            self.evictions += 1;
            tracing::debug!(
                %regime,
                policy = %regime.eviction_policy(),
                "evicted entry at capacity"
            );
        }
    }

    /// Classifies `description` and stores the entry under the chosen regime.
    pub fn set_classified(&mut self, key: K, value: V, description: &str) -> Regime {
        let regime = classifier::classify(description);
        self.set(key, value, regime);
        regime
    }

    /// Looks `key` up in search order, updating recency, frequency and the
    /// hit/miss counters.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.stabilization.get(key) {
            self.hits += 1;
            return Some(value.clone());
        }
        if let Some(value) = self.optimization.get(key) {
            self.hits += 1;
            return Some(value.clone());
        }

        let now = self.clock.now_ms();
        match self.exploration.get(key, now) {
            FifoLookup::Hit(value) => {
                self.hits += 1;
                Some(value.clone())
            },
            FifoLookup::Expired => {
                self.expirations += 1;
                self.misses += 1;
                tracing::trace!("exploration entry expired on read");
                None
            },
            FifoLookup::Missing => {
                self.misses += 1;
                None
            },
        }
    }

    /// Returns `true` if a lookup would hit. No counters, recency or
    /// frequencies change.
    pub fn contains(&self, key: &K) -> bool {
        self.regime_of(key).is_some()
    }

    /// Regime of the first live copy of `key` in search order.
    pub fn regime_of(&self, key: &K) -> Option<Regime> {
        let now = self.clock.now_ms();
        Regime::SEARCH_ORDER.into_iter().find(|&regime| match regime {
            Regime::Stabilization => self.stabilization.contains(key),
            Regime::Optimization => self.optimization.contains(key),
            Regime::Exploration => self.exploration.peek(key, now).is_some(),
        })
    }

    /// Empties one sub-cache, or all of them and the counters when `regime`
    /// is `None`.
    pub fn clear(&mut self, regime: Option<Regime>) {
        match regime {
            Some(Regime::Stabilization) => self.stabilization.clear(),
            Some(Regime::Optimization) => self.optimization.clear(),
            Some(Regime::Exploration) => self.exploration.clear(),
            None => {
                self.stabilization.clear();
                self.optimization.clear();
                self.exploration.clear();
                self.hits = 0;
                self.misses = 0;
                self.evictions = 0;
                self.expirations = 0;
            },
        }
        tracing::debug!(regime = ?regime, "cache cleared");
    }

    /// Drops every expired exploration entry now and returns how many went.
    pub fn purge_expired(&mut self) -> usize {
        let purged = self.exploration.purge_expired(self.clock.now_ms());
        self.record_expired(purged);
        purged
    }

    fn record_expired(&mut self, purged: usize) {
        if purged > 0 {
            self.expirations += purged as u64;
            tracing::debug!(purged, "purged expired exploration entries");
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            lru_size: self.stabilization.len(),
            lfu_size: self.optimization.len(),
            fifo_size: self.exploration.len(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expirations: self.expirations,
        }
    }

    /// Entries held across all sub-caches, including unreaped expired ones.
    pub fn len(&self) -> usize {
        self.stabilization.len() + self.optimization.len() + self.exploration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Metadata table validated at construction.
    #[inline]
    pub fn metadata(&self) -> &RegimeMetadataTable {
        &self.metadata
    }

    /// Aggregator over this cache's distribution profile.
    pub fn confidence(&self) -> ConfidenceAggregator<'_> {
        ConfidenceAggregator::new(&self.metadata)
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.stabilization.check_invariants()?;
        self.optimization.check_invariants()?;
        self.exploration.check_invariants()?;
        check_bound::<K, V>(Regime::Stabilization, &self.stabilization)?;
        check_bound::<K, V>(Regime::Optimization, &self.optimization)?;
        check_bound::<K, V>(Regime::Exploration, &self.exploration)?;
        if self.len() > self.config.max_total_entries() {
            return Err(InvariantError::new("cache exceeds three times the per-policy capacity"));
        }
        Ok(())
    }
}

/// A sub-cache must run its regime's policy and stay within its own capacity.
fn check_bound<K, V>(regime: Regime, sub: &dyn SubCache<K, V>) -> Result<(), InvariantError> {
    let policy = sub.policy();
    if policy != regime.eviction_policy() {
        return Err(InvariantError::new(format!(
            "{regime} is backed by a {policy} sub-cache, expected {}",
            regime.eviction_policy()
        )));
    }
    if sub.len() > sub.capacity() {
        return Err(InvariantError::new(format!(
            "{policy} sub-cache holds {} entries, capacity is {}",
            sub.len(),
            sub.capacity()
        )));
    }
    Ok(())
}

impl<K, V, C> fmt::Debug for AdaptiveCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveCache")
            .field("config", &self.config)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}

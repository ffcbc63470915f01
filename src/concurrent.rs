//! Thread-safe [`AdaptiveCache`] behind one `parking_lot::Mutex`.
//!
//! A single lock guards all three sub-caches, so each `get` walks the search
//! order against one consistent state and each `set` is atomic with its TTL
//! purge and eviction. Share the cache between threads with `Arc`.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use regime_cache::concurrent::ConcurrentAdaptiveCache;
//! use regime_cache::config::CacheConfig;
//! use regime_cache::regime::Regime;
//!
//! let cache = Arc::new(ConcurrentAdaptiveCache::new(CacheConfig::default()).unwrap());
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || cache.set(t, t * 10, Regime::Optimization))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.get(&2), Some(20));
//! ```

use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::AdaptiveCache;
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::regime::Regime;
use crate::stats::CacheStats;

#[derive(Debug)]
pub struct ConcurrentAdaptiveCache<K, V, C = SystemClock> {
    inner: Mutex<AdaptiveCache<K, V, C>>,
    config: CacheConfig,
}

impl<K, V> ConcurrentAdaptiveCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        AdaptiveCache::new(config).map(Self::from_cache)
    }
}

impl<K, V, C> ConcurrentAdaptiveCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self, ConfigError> {
        AdaptiveCache::with_clock(config, clock).map(Self::from_cache)
    }

    /// Wraps an existing cache, keeping its contents and counters.
    pub fn from_cache(cache: AdaptiveCache<K, V, C>) -> Self {
        let config = *cache.config();
        Self {
            inner: Mutex::new(cache),
            config,
        }
    }

    pub fn set(&self, key: K, value: V, regime: Regime) {
        self.inner.lock().set(key, value, regime);
    }

    /// Tries to store without blocking; returns `false` if the lock is held.
    pub fn try_set(&self, key: K, value: V, regime: Regime) -> bool {
        match self.inner.try_lock() {
            Some(mut cache) => {
                cache.set(key, value, regime);
                true
            },
            None => false,
        }
    }

    pub fn set_classified(&self, key: K, value: V, description: &str) -> Regime {
        self.inner.lock().set_classified(key, value, description)
    }

    /// Looks `key` up and returns a clone of the value.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Tries a lookup without blocking. The outer `None` means the lock was
    /// held.
    pub fn try_get(&self, key: &K) -> Option<Option<V>> {
        let mut cache = self.inner.try_lock()?;
        Some(cache.get(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn regime_of(&self, key: &K) -> Option<Regime> {
        self.inner.lock().regime_of(key)
    }

    pub fn clear(&self, regime: Option<Regime>) {
        self.inner.lock().clear(regime);
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Config the cache was built with. Does not take the lock.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut AdaptiveCache<K, V, C>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    pub fn into_inner(self) -> AdaptiveCache<K, V, C> {
        self.inner.into_inner()
    }
}

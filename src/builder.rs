//! Fluent construction of adaptive caches.
//!
//! ## Example
//!
//! ```rust
//! use regime_cache::builder::AdaptiveCacheBuilder;
//! use regime_cache::metadata::DistributionProfile;
//! use regime_cache::regime::Regime;
//!
//! let mut cache = AdaptiveCacheBuilder::new()
//!     .max_entries_per_policy(64)
//!     .fifo_ttl_secs(30)
//!     .profile(DistributionProfile::Baseline)
//!     .build::<u64, String>()
//!     .unwrap();
//!
//! cache.set(1, "hello".to_string(), Regime::Stabilization);
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::hash::Hash;

use crate::cache::AdaptiveCache;
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::ConfigError;
use crate::metadata::DistributionProfile;

#[cfg(feature = "concurrency")]
use crate::concurrent::ConcurrentAdaptiveCache;

/// Builder for [`AdaptiveCache`] and its concurrent wrapper.
///
/// Starts from [`CacheConfig::default`]. Validation happens in `build*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveCacheBuilder {
    config: CacheConfig,
}

impl AdaptiveCacheBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config, e.g. one loaded from a file.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn max_entries_per_policy(mut self, max_entries: usize) -> Self {
        self.config.max_entries_per_policy = max_entries;
        self
    }

    pub fn fifo_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.config.fifo_ttl_secs = ttl_secs;
        self
    }

    pub fn profile(mut self, profile: DistributionProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds a cache on the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero capacity, a zero TTL or an invalid
    /// profile.
    pub fn build<K, V>(self) -> Result<AdaptiveCache<K, V, SystemClock>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        AdaptiveCache::new(self.config)
    }

    /// Builds a cache that reads time from `clock`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_clock<K, V, C>(self, clock: C) -> Result<AdaptiveCache<K, V, C>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
        C: Clock,
    {
        AdaptiveCache::with_clock(self.config, clock)
    }

    /// Builds a mutex-guarded cache on the wall clock.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(
        self,
    ) -> Result<ConcurrentAdaptiveCache<K, V, SystemClock>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        self.build().map(ConcurrentAdaptiveCache::from_cache)
    }
}

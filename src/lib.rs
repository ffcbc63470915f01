//! regime-cache: a three-policy cache routed by workload regime.
//!
//! Work is classified as Exploration, Optimization or Stabilization. Each
//! regime owns a bounded sub-cache with its own eviction policy (FIFO+TTL,
//! LFU and LRU respectively), a distribution proportion and a confidence
//! weight used to aggregate per-regime pass rates into one score.
//!
//! ```
//! use regime_cache::prelude::*;
//!
//! let mut cache = AdaptiveCache::new(CacheConfig::default()).unwrap();
//! let regime = cache.set_classified("job-42", "payload", "fix login regression");
//! assert_eq!(regime, Regime::Stabilization);
//! assert_eq!(cache.get(&"job-42"), Some("payload"));
//! ```
//!
//! See `DESIGN.md` for how the pieces fit together.

pub mod builder;
pub mod cache;
pub mod classifier;
pub mod clock;
pub mod confidence;
pub mod config;
pub mod ds;
pub mod error;
pub mod metadata;
pub mod policy;
pub mod prelude;
pub mod regime;
pub mod stats;
pub mod traits;

#[cfg(feature = "concurrency")]
pub mod concurrent;

pub use classifier::classify;

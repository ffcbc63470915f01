pub use crate::builder::AdaptiveCacheBuilder;
pub use crate::cache::AdaptiveCache;
pub use crate::classifier::{Classification, RegimeClassifier, classify};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::confidence::{ConfidenceAggregator, PassRates};
pub use crate::config::CacheConfig;
pub use crate::error::{ConfigError, InvariantError, ParseRegimeError};
pub use crate::metadata::{
    DistributionProfile, PlannerSummary, RegimeAllocation, RegimeMetadata, RegimeMetadataTable,
};
pub use crate::regime::{EvictionPolicy, Regime};
pub use crate::stats::CacheStats;
pub use crate::traits::SubCache;

#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentAdaptiveCache;

//! Construction parameters for [`AdaptiveCache`](crate::cache::AdaptiveCache).
//!
//! With the `serde` feature the config deserializes from any serde format.
//! Missing fields fall back to [`CacheConfig::default`]:
//!
//! ```text
//! max_entries_per_policy = 256
//! fifo_ttl_secs = 600
//! profile = "baseline"
//! ```

use crate::error::ConfigError;
use crate::metadata::{DistributionProfile, RegimeMetadataTable};

pub const DEFAULT_MAX_ENTRIES_PER_POLICY: usize = 128;
pub const DEFAULT_FIFO_TTL_SECS: u64 = 3600;

/// Sizing, expiry and profile for an adaptive cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Capacity of each sub-cache. The whole cache holds at most three times
    /// this many entries.
    pub max_entries_per_policy: usize,
    /// Time-to-live of exploration entries, in seconds.
    pub fifo_ttl_secs: u64,
    pub profile: DistributionProfile,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries_per_policy: DEFAULT_MAX_ENTRIES_PER_POLICY,
            fifo_ttl_secs: DEFAULT_FIFO_TTL_SECS,
            profile: DistributionProfile::default(),
        }
    }
}

impl CacheConfig {
    /// Checks every parameter and builds the profile's metadata table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the capacity or TTL is zero, or when the
    /// profile's proportions fail validation.
    pub fn validate(&self) -> Result<RegimeMetadataTable, ConfigError> {
        if self.max_entries_per_policy == 0 {
            return Err(ConfigError::new("max_entries_per_policy must be greater than zero"));
        }
        if self.fifo_ttl_secs == 0 {
            return Err(ConfigError::new("fifo_ttl_secs must be greater than zero"));
        }
        RegimeMetadataTable::new(self.profile)
    }

    /// Upper bound on entries held across all three sub-caches.
    pub fn max_total_entries(&self) -> usize {
        self.max_entries_per_policy.saturating_mul(3)
    }
}

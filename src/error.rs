//! Error types for the regime-cache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache or profile configuration is invalid
//!   (zero capacity, zero TTL, proportions that do not sum to 1.0).
//! - [`ParseRegimeError`]: Returned when a string does not name a regime.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! Every runtime cache operation is total; construction is the only fallible
//! step.
//!
//! ## Example Usage
//!
//! ```
//! use regime_cache::cache::AdaptiveCache;
//! use regime_cache::config::CacheConfig;
//! use regime_cache::error::ConfigError;
//!
//! let cache: Result<AdaptiveCache<String, i32>, ConfigError> =
//!     AdaptiveCache::new(CacheConfig::default());
//! assert!(cache.is_ok());
//!
//! let bad = AdaptiveCache::<String, i32>::new(CacheConfig {
//!     max_entries_per_policy: 0,
//!     ..CacheConfig::default()
//! });
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration parameters are invalid.
///
/// Produced by [`CacheConfig::validate`](crate::config::CacheConfig::validate),
/// [`RegimeMetadataTable::new`](crate::metadata::RegimeMetadataTable::new) and
/// every constructor that goes through them. There is no partially built cache:
/// a `ConfigError` means nothing was constructed.
///
/// # Example
///
/// ```
/// use regime_cache::metadata::RegimeMetadataTable;
///
/// let err = RegimeMetadataTable::from_proportions([0.5, 0.5, 0.5]).unwrap_err();
/// assert!(err.to_string().contains("sum"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ParseRegimeError
// ---------------------------------------------------------------------------

/// Error returned by [`Regime::from_str`](crate::regime::Regime) for unknown names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRegimeError(String);

impl ParseRegimeError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }

    /// Returns the input that failed to parse.
    #[inline]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseRegimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown regime {:?} (expected exploration, optimization or stabilization)",
            self.0
        )
    }
}

impl std::error::Error for ParseRegimeError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by debug-only `check_invariants` methods
/// (e.g. [`AdaptiveCache::check_invariants`](crate::cache::AdaptiveCache::check_invariants)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

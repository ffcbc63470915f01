//! Static per-regime metadata and distribution profiles.
//!
//! A [`RegimeMetadataTable`] is built once from a [`DistributionProfile`] and
//! never changes afterwards. Lookups are array indexed by
//! [`Regime::index`](crate::regime::Regime::index).
//!
//! ## Profiles
//!
//! | Profile    | Exploration | Optimization | Stabilization |
//! |------------|-------------|--------------|---------------|
//! | `Baseline` | 0.30        | 0.20         | 0.50          |
//! | `Tuned`    | 0.3385      | 0.2872       | 0.3744        |
//!
//! Confidence weights are fixed at 0.70 / 0.85 / 1.00 for every profile.
//!
//! ## Example
//!
//! ```
//! use regime_cache::metadata::{DistributionProfile, RegimeMetadataTable};
//! use regime_cache::regime::Regime;
//!
//! let table = RegimeMetadataTable::new(DistributionProfile::Baseline).unwrap();
//! let meta = table.metadata(Regime::Stabilization);
//! assert_eq!(meta.distribution_proportion, 0.50);
//! assert_eq!(meta.confidence_weight, 1.00);
//! assert_eq!(meta.eviction_policy.name(), "LRU");
//!
//! let allocation = table.allocate(100);
//! assert_eq!(allocation.stabilization, 50);
//! ```

use std::fmt;

use crate::classifier;
use crate::error::ConfigError;
use crate::regime::{EvictionPolicy, Regime};

/// Allowed deviation of the proportion sum from 1.0.
///
/// The tuned profile is published to four decimal places and sums to 1.0001,
/// so the tolerance has to admit that rounding and little more.
pub const PROPORTION_SUM_EPSILON: f64 = 2e-4;

/// Fixed confidence weights, indexed by [`Regime::index`].
pub const CONFIDENCE_WEIGHTS: [f64; 3] = [0.70, 0.85, 1.00];

const DESCRIPTIONS: [&str; 3] = [
    "New features, edge cases and experiments; favours novelty, entries expire",
    "Performance and refactoring work; keeps entries that prove their value by reuse",
    "Regressions, validation and critical paths; keeps recently used entries hot",
];

/// Named set of per-regime distribution proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistributionProfile {
    /// Theoretical 30/20/50 split.
    Baseline,
    /// Empirically tuned 33.85/28.72/37.44 split.
    #[default]
    Tuned,
}

impl DistributionProfile {
    /// Proportions indexed by [`Regime::index`].
    pub const fn proportions(self) -> [f64; 3] {
        match self {
            DistributionProfile::Baseline => [0.30, 0.20, 0.50],
            DistributionProfile::Tuned => [0.3385, 0.2872, 0.3744],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DistributionProfile::Baseline => "baseline",
            DistributionProfile::Tuned => "tuned",
        }
    }
}

impl fmt::Display for DistributionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Per-regime record.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeMetadata {
    pub regime: Regime,
    /// Share of the workload expected in this regime, in (0, 1).
    pub distribution_proportion: f64,
    /// Multiplier applied to the regime's pass rate, in (0, 1].
    pub confidence_weight: f64,
    pub eviction_policy: EvictionPolicy,
    pub description: &'static str,
}

/// Immutable regime → metadata lookup built from one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeMetadataTable {
    profile: Option<DistributionProfile>,
    entries: [RegimeMetadata; 3],
}

impl RegimeMetadataTable {
    /// Builds the table for a named profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the profile's proportions fail validation.
    pub fn new(profile: DistributionProfile) -> Result<Self, ConfigError> {
        let mut table = Self::from_proportions(profile.proportions())?;
        table.profile = Some(profile);
        Ok(table)
    }

    /// Builds a table from raw proportions ordered Exploration, Optimization,
    /// Stabilization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any proportion is outside (0, 1), the sum
    /// differs from 1.0 by more than [`PROPORTION_SUM_EPSILON`], or the
    /// weighted sum exceeds 1.0 (a perfect run would then score above 1).
    pub fn from_proportions(proportions: [f64; 3]) -> Result<Self, ConfigError> {
        for regime in Regime::ALL {
            let p = proportions[regime.index()];
            if !p.is_finite() || p <= 0.0 || p >= 1.0 {
                return Err(ConfigError::new(format!(
                    "{regime} distribution proportion must be in (0, 1), got {p}"
                )));
            }
        }

        let sum: f64 = proportions.iter().sum();
        if (sum - 1.0).abs() > PROPORTION_SUM_EPSILON {
            return Err(ConfigError::new(format!(
                "distribution proportions must sum to 1.0, got {sum}"
            )));
        }

        let ceiling: f64 = Regime::ALL
            .iter()
            .map(|r| CONFIDENCE_WEIGHTS[r.index()] * proportions[r.index()])
            .sum();
        if ceiling > 1.0 {
            return Err(ConfigError::new(format!(
                "weighted proportions reach {ceiling}, confidence would exceed 1.0"
            )));
        }

        let entries = Regime::ALL.map(|regime| RegimeMetadata {
            regime,
            distribution_proportion: proportions[regime.index()],
            confidence_weight: CONFIDENCE_WEIGHTS[regime.index()],
            eviction_policy: regime.eviction_policy(),
            description: DESCRIPTIONS[regime.index()],
        });

        Ok(Self {
            profile: None,
            entries,
        })
    }

    /// Profile the table was built from, `None` for raw proportions.
    #[inline]
    pub fn profile(&self) -> Option<DistributionProfile> {
        self.profile
    }

    #[inline]
    pub fn metadata(&self, regime: Regime) -> &RegimeMetadata {
        &self.entries[regime.index()]
    }

    #[inline]
    pub fn proportion(&self, regime: Regime) -> f64 {
        self.entries[regime.index()].distribution_proportion
    }

    #[inline]
    pub fn weight(&self, regime: Regime) -> f64 {
        self.entries[regime.index()].confidence_weight
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegimeMetadata> {
        self.entries.iter()
    }

    /// Splits `total` units of work across regimes by proportion.
    ///
    /// Each regime receives the floor of its share; whatever rounding leaves
    /// over goes to Stabilization, so the parts always sum to `total`.
    pub fn allocate(&self, total: usize) -> RegimeAllocation {
        let share = |regime: Regime| (total as f64 * self.proportion(regime)).floor() as usize;
        let exploration = share(Regime::Exploration).min(total);
        let optimization = share(Regime::Optimization).min(total - exploration);
        let stabilization = total - exploration - optimization;

        let allocation = RegimeAllocation {
            exploration,
            optimization,
            stabilization,
            total,
        };
        tracing::debug!(
            total,
            exploration,
            optimization,
            stabilization,
            "allocated work across regimes"
        );
        allocation
    }

    /// Configuration summary for reporting.
    pub fn summary(&self) -> PlannerSummary {
        PlannerSummary {
            profile: self.profile,
            proportions: Regime::ALL.map(|r| self.proportion(r)),
            weights: Regime::ALL.map(|r| self.weight(r)),
            policies: Regime::ALL.map(|r| self.metadata(r).eviction_policy.name()),
            keyword_counts: classifier::builtin_keyword_counts(),
        }
    }
}

/// Work units assigned to each regime by [`RegimeMetadataTable::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegimeAllocation {
    pub exploration: usize,
    pub optimization: usize,
    pub stabilization: usize,
    pub total: usize,
}

impl RegimeAllocation {
    pub fn get(&self, regime: Regime) -> usize {
        match regime {
            Regime::Exploration => self.exploration,
            Regime::Optimization => self.optimization,
            Regime::Stabilization => self.stabilization,
        }
    }
}

/// Snapshot of a table's configuration, indexed by [`Regime::index`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlannerSummary {
    pub profile: Option<DistributionProfile>,
    pub proportions: [f64; 3],
    pub weights: [f64; 3],
    pub policies: [&'static str; 3],
    /// Size of each built-in classifier keyword set.
    pub keyword_counts: [usize; 3],
}

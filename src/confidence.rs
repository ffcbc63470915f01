//! Weighted confidence aggregation across regimes.
//!
//! ```text
//!   overall = Σ_r  pass_rate(r) × confidence_weight(r) × distribution_proportion(r)
//! ```
//!
//! A regime with no recorded pass rate contributes nothing. Inputs are not
//! clamped: a pass rate outside `[0, 1]` is a caller bug and is reported by a
//! `debug_assert!` only, so release builds surface the bad value downstream
//! instead of hiding it.
//!
//! ## Example
//!
//! ```
//! use regime_cache::confidence::{ConfidenceAggregator, PassRates};
//! use regime_cache::metadata::{DistributionProfile, RegimeMetadataTable};
//! use regime_cache::regime::Regime;
//!
//! let table = RegimeMetadataTable::new(DistributionProfile::Tuned).unwrap();
//! let aggregator = ConfidenceAggregator::new(&table);
//!
//! let rates: PassRates = Regime::ALL.into_iter().map(|r| (r, 1.0)).collect();
//! assert!((aggregator.overall_confidence(&rates) - 0.85547).abs() < 1e-5);
//! ```

use crate::metadata::RegimeMetadataTable;
use crate::regime::Regime;

/// Pass rate per regime; absent regimes count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassRates {
    rates: [Option<f64>; 3],
}

impl PassRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pass rate for `regime`, replacing any previous value.
    pub fn with(mut self, regime: Regime, rate: f64) -> Self {
        self.set(regime, rate);
        self
    }

    pub fn set(&mut self, regime: Regime, rate: f64) {
        self.rates[regime.index()] = Some(rate);
    }

    pub fn get(&self, regime: Regime) -> Option<f64> {
        self.rates[regime.index()]
    }

    /// Pass rate used in aggregation (missing = 0.0).
    #[inline]
    pub fn rate_or_zero(&self, regime: Regime) -> f64 {
        self.rates[regime.index()].unwrap_or(0.0)
    }
}

impl FromIterator<(Regime, f64)> for PassRates {
    fn from_iter<I: IntoIterator<Item = (Regime, f64)>>(iter: I) -> Self {
        let mut rates = PassRates::new();
        for (regime, rate) in iter {
            rates.set(regime, rate);
        }
        rates
    }
}

/// Combines per-regime pass rates into one score using a metadata table.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceAggregator<'a> {
    table: &'a RegimeMetadataTable,
}

impl<'a> ConfidenceAggregator<'a> {
    pub fn new(table: &'a RegimeMetadataTable) -> Self {
        Self { table }
    }

    #[inline]
    pub fn table(&self) -> &'a RegimeMetadataTable {
        self.table
    }

    /// Weighted contribution of a single regime.
    #[inline]
    pub fn contribution(&self, regime: Regime, rate: f64) -> f64 {
        rate * self.table.weight(regime) * self.table.proportion(regime)
    }

    /// Weighted overall confidence. In `[0, 1]` whenever every rate is.
    pub fn overall_confidence(&self, rates: &PassRates) -> f64 {
        let mut total = 0.0;
        for regime in Regime::ALL {
            let rate = rates.rate_or_zero(regime);
            debug_assert!(
                (0.0..=1.0).contains(&rate),
                "{regime} pass rate {rate} outside [0, 1]"
            );
            let contribution = self.contribution(regime, rate);
            tracing::trace!(%regime, rate, contribution, "confidence contribution");
            total += contribution;
        }
        tracing::debug!(total, "overall confidence calculated");
        total
    }
}

//! Operational regimes and the eviction policy each one selects.
//!
//! ```text
//!   Regime          Policy      Weight   Conservativeness
//!   ─────────────   ─────────   ──────   ────────────────
//!   Exploration     FIFO+TTL    0.70     lowest
//!   Optimization    LFU         0.85
//!   Stabilization   LRU         1.00     highest
//! ```
//!
//! `Ord` follows conservativeness, so `max` of two regimes is the safer one.
//! Lookup order is a separate constant, [`Regime::SEARCH_ORDER`].

use std::fmt;
use std::str::FromStr;

use crate::error::ParseRegimeError;

/// Workload regime used to pick an eviction policy and a confidence weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Regime {
    /// New work, edge cases, experiments. Served by FIFO with TTL expiry.
    Exploration,
    /// Performance and refactoring work. Served by LFU.
    Optimization,
    /// Regressions, validation, critical paths. Served by LRU.
    Stabilization,
}

impl Regime {
    /// All regimes in declaration (ascending conservativeness) order.
    pub const ALL: [Regime; 3] = [
        Regime::Exploration,
        Regime::Optimization,
        Regime::Stabilization,
    ];

    /// Order in which sub-caches are consulted on lookup.
    pub const SEARCH_ORDER: [Regime; 3] = [
        Regime::Stabilization,
        Regime::Optimization,
        Regime::Exploration,
    ];

    /// Stable array index, used by fixed three-slot tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Regime::Exploration => 0,
            Regime::Optimization => 1,
            Regime::Stabilization => 2,
        }
    }

    /// Lower-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Regime::Exploration => "exploration",
            Regime::Optimization => "optimization",
            Regime::Stabilization => "stabilization",
        }
    }

    /// Eviction policy backing this regime's sub-cache.
    #[inline]
    pub const fn eviction_policy(self) -> EvictionPolicy {
        match self {
            Regime::Exploration => EvictionPolicy::FifoTtl,
            Regime::Optimization => EvictionPolicy::Lfu,
            Regime::Stabilization => EvictionPolicy::Lru,
        }
    }

    /// Returns the more conservative of two regimes.
    #[inline]
    pub fn most_conservative(self, other: Regime) -> Regime {
        self.max(other)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = ParseRegimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Regime::ALL
            .into_iter()
            .find(|regime| regime.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseRegimeError::new(s))
    }
}

/// Eviction algorithm of a sub-cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Least recently used.
    Lru,
    /// Least frequently used, oldest entry wins ties.
    Lfu,
    /// First in, first out with per-entry time-to-live.
    FifoTtl,
}

impl EvictionPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
            EvictionPolicy::FifoTtl => "FIFO+TTL",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_ranks_stabilization_highest() {
        assert!(Regime::Stabilization > Regime::Optimization);
        assert!(Regime::Optimization > Regime::Exploration);
        assert_eq!(
            Regime::Exploration.most_conservative(Regime::Stabilization),
            Regime::Stabilization
        );
        assert_eq!(
            Regime::Optimization.most_conservative(Regime::Exploration),
            Regime::Optimization
        );
    }

    #[test]
    fn search_order_starts_with_stabilization() {
        assert_eq!(Regime::SEARCH_ORDER[0], Regime::Stabilization);
        assert_eq!(Regime::SEARCH_ORDER[2], Regime::Exploration);
    }

    #[test]
    fn indices_are_distinct_and_dense() {
        let mut seen = [false; 3];
        for regime in Regime::ALL {
            seen[regime.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn policy_mapping() {
        assert_eq!(Regime::Stabilization.eviction_policy(), EvictionPolicy::Lru);
        assert_eq!(Regime::Optimization.eviction_policy(), EvictionPolicy::Lfu);
        assert_eq!(Regime::Exploration.eviction_policy(), EvictionPolicy::FifoTtl);
        assert_eq!(EvictionPolicy::FifoTtl.to_string(), "FIFO+TTL");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Stabilization".parse::<Regime>(), Ok(Regime::Stabilization));
        assert_eq!(" OPTIMIZATION ".parse::<Regime>(), Ok(Regime::Optimization));
        assert_eq!("exploration".parse::<Regime>(), Ok(Regime::Exploration));
        assert!("chaos".parse::<Regime>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for regime in Regime::ALL {
            assert_eq!(regime.to_string().parse::<Regime>(), Ok(regime));
        }
    }
}

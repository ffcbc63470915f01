// ==============================================
// REGIME CACHE BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end checks of classification, confidence aggregation and the
// adaptive cache through the public API only. Time-dependent cases drive a
// ManualClock instead of sleeping.

use regime_cache::prelude::*;

fn cache_with(
    capacity: usize,
    ttl_secs: u64,
) -> (AdaptiveCache<&'static str, i32, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let cache = AdaptiveCacheBuilder::new()
        .max_entries_per_policy(capacity)
        .fifo_ttl_secs(ttl_secs)
        .build_with_clock(clock.clone())
        .expect("valid config");
    (cache, clock)
}

// ==============================================
// Classification
// ==============================================

mod classification {
    use super::*;

    #[test]
    fn stabilization_beats_exploration() {
        assert_eq!(classify("fix crash in new experimental parser"), Regime::Stabilization);
        assert_eq!(classify("Explore SECURITY hardening"), Regime::Stabilization);
    }

    #[test]
    fn no_match_defaults_to_stabilization() {
        assert_eq!(classify(""), Regime::Stabilization);
        assert_eq!(classify("xyz"), Regime::Stabilization);
    }

    #[test]
    fn optimization_beats_exploration() {
        assert_eq!(classify("improve the prototype"), Regime::Optimization);
    }

    #[test]
    fn classify_task_reports_reasoning() {
        let classifier = RegimeClassifier::default();
        let c = classifier.classify_task("research_ocr", &["trial"], Some("early look"));
        assert_eq!(c.regime, Regime::Exploration);
        assert_eq!(c.confidence_weight, 0.70);
        assert!(c.reasoning.contains("exploration"));
    }
}

// ==============================================
// Confidence
// ==============================================

mod confidence {
    use super::*;

    #[test]
    fn tuned_profile_all_pass() {
        let table = RegimeMetadataTable::new(DistributionProfile::Tuned).unwrap();
        let rates: PassRates = Regime::ALL.into_iter().map(|r| (r, 1.0)).collect();
        let score = ConfidenceAggregator::new(&table).overall_confidence(&rates);
        assert!((score - 0.85547).abs() < 1e-5, "got {score}");
    }

    #[test]
    fn baseline_profile_all_pass() {
        let table = RegimeMetadataTable::new(DistributionProfile::Baseline).unwrap();
        let rates: PassRates = Regime::ALL.into_iter().map(|r| (r, 1.0)).collect();
        let score = ConfidenceAggregator::new(&table).overall_confidence(&rates);
        // 0.30*0.70 + 0.20*0.85 + 0.50*1.00
        assert!((score - 0.88).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn missing_regime_contributes_nothing() {
        let table = RegimeMetadataTable::new(DistributionProfile::Baseline).unwrap();
        let rates = PassRates::new().with(Regime::Stabilization, 1.0);
        let score = ConfidenceAggregator::new(&table).overall_confidence(&rates);
        assert!((score - 0.5).abs() < 1e-12);
    }
}

// ==============================================
// Eviction per policy
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn lru_evicts_least_recently_used() {
        let (mut cache, _) = cache_with(2, 3600);
        cache.set("A", 1, Regime::Stabilization);
        cache.set("B", 2, Regime::Stabilization);
        assert_eq!(cache.get(&"A"), Some(1));
        cache.set("C", 3, Regime::Stabilization);

        assert_eq!(cache.get(&"B"), None);
        assert_eq!(cache.get(&"A"), Some(1));
        assert_eq!(cache.get(&"C"), Some(3));
    }

    #[test]
    fn lfu_evicts_lowest_frequency() {
        let (mut cache, _) = cache_with(2, 3600);
        cache.set("A", 1, Regime::Optimization);
        cache.set("B", 2, Regime::Optimization);
        cache.get(&"A");
        cache.get(&"A");
        cache.set("C", 3, Regime::Optimization);

        assert_eq!(cache.get(&"B"), None);
        assert_eq!(cache.get(&"A"), Some(1));
        assert_eq!(cache.get(&"C"), Some(3));
    }

    #[test]
    fn lfu_tie_breaks_on_oldest() {
        let (mut cache, _) = cache_with(2, 3600);
        cache.set("A", 1, Regime::Optimization);
        cache.set("B", 2, Regime::Optimization);
        cache.set("C", 3, Regime::Optimization);

        assert!(!cache.contains(&"A"));
        assert!(cache.contains(&"B"));
        assert!(cache.contains(&"C"));
    }

    #[test]
    fn fifo_ignores_reads_when_evicting() {
        let (mut cache, _) = cache_with(2, 3600);
        cache.set("A", 1, Regime::Exploration);
        cache.set("B", 2, Regime::Exploration);
        cache.get(&"A");
        cache.set("C", 3, Regime::Exploration);

        assert!(!cache.contains(&"A"));
        assert_eq!(cache.stats().evictions, 1);
    }
}

// ==============================================
// TTL expiry
// ==============================================

mod expiry {
    use super::*;

    #[test]
    fn expired_entry_is_a_miss_and_is_removed() {
        let (mut cache, clock) = cache_with(8, 1);
        cache.set("A", 1, Regime::Exploration);

        clock.advance_ms(500);
        assert_eq!(cache.get(&"A"), Some(1));
        let size_before = cache.stats().fifo_size;

        clock.advance_ms(1_000);
        assert_eq!(cache.get(&"A"), None);

        let stats = cache.stats();
        assert_eq!(stats.fifo_size, size_before - 1);
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn unreaped_entries_still_count_towards_size() {
        let (mut cache, clock) = cache_with(8, 1);
        cache.set("A", 1, Regime::Exploration);
        clock.advance_secs(5);
        assert_eq!(cache.stats().fifo_size, 1);
        assert!(!cache.contains(&"A"));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.stats().fifo_size, 0);
    }

    #[test]
    fn overwrite_refreshes_ttl() {
        let (mut cache, clock) = cache_with(8, 2);
        cache.set("A", 1, Regime::Exploration);
        clock.advance_ms(1_500);
        cache.set("A", 2, Regime::Exploration);
        clock.advance_ms(1_500);
        assert_eq!(cache.get(&"A"), Some(2));
        assert_eq!(cache.stats().fifo_size, 1);
    }
}

// ==============================================
// Clearing and counters
// ==============================================

mod clearing {
    use super::*;

    #[test]
    fn clear_other_regime_keeps_key() {
        for regime in Regime::ALL {
            let (mut cache, _) = cache_with(4, 3600);
            cache.set("K", 1, regime);
            for other in Regime::ALL.into_iter().filter(|r| *r != regime) {
                cache.clear(Some(other));
            }
            assert_eq!(cache.get(&"K"), Some(1), "{regime} copy was cleared");
        }
    }

    #[test]
    fn hit_rate_counts() {
        let (mut cache, _) = cache_with(4, 3600);
        assert_eq!(cache.stats().hit_rate(), 0.0);

        cache.set("A", 1, Regime::Stabilization);
        cache.get(&"A");
        cache.get(&"A");
        cache.get(&"A");
        cache.get(&"missing");
        assert_eq!(cache.stats().hit_rate(), 0.75);

        cache.clear(Some(Regime::Stabilization));
        assert_eq!(cache.stats().hit_rate(), 0.75);
        cache.clear(None);
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }

    #[test]
    fn idempotent_reset() {
        let (mut cache, _) = cache_with(4, 3600);
        cache.set("A", 1, Regime::Stabilization);
        cache.set("B", 2, Regime::Stabilization);
        cache.set("A", 1, Regime::Stabilization);
        cache.set("A", 1, Regime::Stabilization);
        assert_eq!(cache.stats().lru_size, 2);
    }
}

// ==============================================
// Configuration
// ==============================================

mod configuration {
    use super::*;

    #[test]
    fn invalid_parameters_fail_construction() {
        let cases = [
            CacheConfig {
                max_entries_per_policy: 0,
                ..CacheConfig::default()
            },
            CacheConfig {
                fifo_ttl_secs: 0,
                ..CacheConfig::default()
            },
        ];
        for config in cases {
            let err = AdaptiveCache::<u8, u8>::new(config).unwrap_err();
            assert!(!err.message().is_empty());
        }
    }

    #[test]
    fn bad_proportions_fail() {
        let err = RegimeMetadataTable::from_proportions([0.4, 0.4, 0.4]).unwrap_err();
        assert!(err.to_string().contains("sum"));
    }

    #[test]
    fn baseline_allocation() {
        let table = RegimeMetadataTable::new(DistributionProfile::Baseline).unwrap();
        let allocation = table.allocate(100);
        assert_eq!(
            (allocation.exploration, allocation.optimization, allocation.stabilization),
            (30, 20, 50)
        );
        let summary = table.summary();
        assert_eq!(summary.policies, ["FIFO+TTL", "LFU", "LRU"]);
    }
}

// ==============================================
// SERDE SUPPORT TESTS (integration)
// ==============================================

#![cfg(feature = "serde")]

use regime_cache::prelude::*;

#[test]
fn config_loads_with_defaults_for_missing_fields() {
    let config: CacheConfig =
        serde_json::from_str(r#"{ "max_entries_per_policy": 256, "profile": "baseline" }"#).unwrap();
    assert_eq!(config.max_entries_per_policy, 256);
    assert_eq!(config.fifo_ttl_secs, 3600);
    assert_eq!(config.profile, DistributionProfile::Baseline);

    let cache = AdaptiveCacheBuilder::from_config(config)
        .build::<u64, u64>()
        .unwrap();
    assert_eq!(cache.metadata().proportion(Regime::Stabilization), 0.50);
}

#[test]
fn regimes_use_lowercase_names() {
    let json = serde_json::to_string(&Regime::ALL).unwrap();
    assert_eq!(json, r#"["exploration","optimization","stabilization"]"#);
    let back: Vec<Regime> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Regime::ALL.to_vec());
}

#[test]
fn stats_serialize_every_counter() {
    let mut cache = AdaptiveCache::with_clock(CacheConfig::default(), ManualClock::new(0)).unwrap();
    cache.set(1u32, 1u32, Regime::Optimization);
    cache.get(&1);
    let value = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(value["lfu_size"], 1);
    assert_eq!(value["hits"], 1);
    assert_eq!(value["misses"], 0);
}

#[test]
fn unknown_profile_is_rejected() {
    let result: Result<CacheConfig, _> = serde_json::from_str(r#"{ "profile": "aggressive" }"#);
    assert!(result.is_err());
}

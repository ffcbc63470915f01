//! Walks through the three regime sub-caches of an adaptive cache.
//!
//! Run with: cargo run --example basic_adaptive
//! Set RUST_LOG=regime_cache=debug to see evictions and purges.

use std::error::Error;

use regime_cache::builder::AdaptiveCacheBuilder;
use regime_cache::clock::ManualClock;
use regime_cache::regime::Regime;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Adaptive Cache ===\n");

    let clock = ManualClock::new(0);
    let mut cache = AdaptiveCacheBuilder::new()
        .max_entries_per_policy(2)
        .fifo_ttl_secs(1)
        .build_with_clock::<&str, u32, _>(clock.clone())?;

    // Stabilization: LRU
    println!("1. Stabilization (LRU)");
    cache.set("A", 1, Regime::Stabilization);
    cache.set("B", 2, Regime::Stabilization);
    cache.get(&"A");
    cache.set("C", 3, Regime::Stabilization);
    println!("   contains B? {} (least recently used)", cache.contains(&"B"));
    println!("   contains A? {} (touched before C arrived)", cache.contains(&"A"));
    println!();

    // Optimization: LFU
    println!("2. Optimization (LFU)");
    cache.set("X", 1, Regime::Optimization);
    cache.set("Y", 2, Regime::Optimization);
    cache.get(&"X");
    cache.get(&"X");
    cache.set("Z", 3, Regime::Optimization);
    println!("   contains Y? {} (lowest frequency)", cache.contains(&"Y"));
    println!("   contains X? {} (used three times)", cache.contains(&"X"));
    println!();

    // Exploration: FIFO + TTL
    println!("3. Exploration (FIFO+TTL, 1s)");
    cache.set("draft", 7, Regime::Exploration);
    clock.advance_ms(500);
    println!("   after 0.5s: {:?}", cache.get(&"draft"));
    clock.advance_ms(1_000);
    println!("   after 1.5s: {:?} (expired)", cache.get(&"draft"));
    println!();

    let stats = cache.stats();
    println!("Stats");
    println!(
        "   sizes lru={} lfu={} fifo={}",
        stats.lru_size, stats.lfu_size, stats.fifo_size
    );
    println!(
        "   hits={} misses={} hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.hit_rate()
    );
    println!("   evictions={} expirations={}", stats.evictions, stats.expirations);

    Ok(())
}

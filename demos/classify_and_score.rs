//! Classifies a batch of tasks, splits a test budget across regimes and
//! scores pass rates into one confidence value.
//!
//! Run with: cargo run --example classify_and_score

use std::error::Error;

use regime_cache::classifier::RegimeClassifier;
use regime_cache::confidence::{ConfidenceAggregator, PassRates};
use regime_cache::metadata::{DistributionProfile, RegimeMetadataTable};
use regime_cache::regime::Regime;

fn main() -> Result<(), Box<dyn Error>> {
    let classifier = RegimeClassifier::default();
    let tasks: [(&str, &[&str], &str); 4] = [
        ("login_timeout", &["bug"], "users logged out after deploy"),
        ("batch_ocr", &["performance"], "tune page batching"),
        ("vector_search", &["research"], "try an approximate index"),
        ("release_notes", &[], "draft the changelog"),
    ];

    println!("=== Classification ===\n");
    for (name, tags, description) in tasks {
        let c = classifier.classify_task(name, tags, Some(description));
        println!("{name:<14} -> {:<13} weight={:.2}  {}", c.regime, c.confidence_weight, c.reasoning);
    }
    println!();

    for profile in [DistributionProfile::Baseline, DistributionProfile::Tuned] {
        let table = RegimeMetadataTable::new(profile)?;
        let allocation = table.allocate(200);

        println!("=== {profile} profile ===");
        for meta in table.iter() {
            println!(
                "{:<13} {:>6.2}%  policy={:<8} tests={}",
                meta.regime,
                meta.distribution_proportion * 100.0,
                meta.eviction_policy,
                allocation.get(meta.regime)
            );
        }

        let rates = PassRates::new()
            .with(Regime::Exploration, 0.80)
            .with(Regime::Optimization, 0.95)
            .with(Regime::Stabilization, 1.00);
        let score = ConfidenceAggregator::new(&table).overall_confidence(&rates);
        println!("overall confidence: {score:.4}\n");
    }

    Ok(())
}

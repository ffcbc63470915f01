//! Keyword-priority workload classifier.
//!
//! Three keyword sets are tried in a fixed order and the first set with a
//! case-insensitive substring hit decides the regime:
//!
//! ```text
//!   text ──► Stabilization set? ──yes──► Stabilization
//!                 │ no
//!                 ▼
//!            Optimization set?  ──yes──► Optimization
//!                 │ no
//!                 ▼
//!            Exploration set?   ──yes──► Exploration
//!                 │ no
//!                 ▼
//!            Stabilization (default)
//! ```
//!
//! Ambiguous text therefore always lands on the more conservative regime.
//! Classification is pure and never fails.
//!
//! ## Example
//!
//! ```
//! use regime_cache::classifier::{classify, RegimeClassifier};
//! use regime_cache::regime::Regime;
//!
//! assert_eq!(classify("prototype a new parser"), Regime::Exploration);
//! assert_eq!(classify("fix the new parser"), Regime::Stabilization);
//! assert_eq!(classify(""), Regime::Stabilization);
//!
//! let classifier = RegimeClassifier::default();
//! let c = classifier.classify_task("tune_batch_ocr", &["performance"], None);
//! assert_eq!(c.regime, Regime::Optimization);
//! assert_eq!(c.matched_keywords, vec!["tune", "performance"]);
//! ```

use std::sync::OnceLock;

use crate::metadata::CONFIDENCE_WEIGHTS;
use crate::regime::Regime;

pub const STABILIZATION_KEYWORDS: &[&str] = &[
    "fix",
    "bug",
    "regression",
    "critical",
    "core",
    "stable",
    "production",
    "security",
    "validate",
    "test",
];

pub const OPTIMIZATION_KEYWORDS: &[&str] = &[
    "optimize",
    "refactor",
    "improve",
    "enhance",
    "tune",
    "performance",
    "efficiency",
    "speed",
    "memory",
    "scale",
];

pub const EXPLORATION_KEYWORDS: &[&str] = &[
    "explore",
    "discover",
    "create",
    "new",
    "experimental",
    "prototype",
    "research",
    "edge",
    "trial",
];

/// Classifies `description` with the default keyword sets.
pub fn classify(description: &str) -> Regime {
    static DEFAULT: OnceLock<RegimeClassifier> = OnceLock::new();
    DEFAULT
        .get_or_init(RegimeClassifier::default)
        .classify(description)
}

/// Result of [`RegimeClassifier::classify_task`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub regime: Regime,
    pub confidence_weight: f64,
    /// Keywords of the winning set found in the text, in set order.
    pub matched_keywords: Vec<String>,
    pub reasoning: String,
}

/// Sizes of the built-in keyword sets, indexed by [`Regime::index`].
pub const fn builtin_keyword_counts() -> [usize; 3] {
    [
        EXPLORATION_KEYWORDS.len(),
        OPTIMIZATION_KEYWORDS.len(),
        STABILIZATION_KEYWORDS.len(),
    ]
}

/// Fixed keyword sets checked in priority order.
#[derive(Debug, Clone)]
pub struct RegimeClassifier {
    // Stabilization, Optimization, Exploration.
    sets: [(Regime, Vec<String>); 3],
}

impl Default for RegimeClassifier {
    fn default() -> Self {
        Self::with_keywords(
            STABILIZATION_KEYWORDS,
            OPTIMIZATION_KEYWORDS,
            EXPLORATION_KEYWORDS,
        )
    }
}

impl RegimeClassifier {
    /// Builds a classifier from custom keyword sets.
    ///
    /// Keywords are lower-cased; empty ones are dropped since they would match
    /// any text.
    pub fn with_keywords<S: AsRef<str>>(
        stabilization: &[S],
        optimization: &[S],
        exploration: &[S],
    ) -> Self {
        fn normalize<S: AsRef<str>>(words: &[S]) -> Vec<String> {
            words
                .iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        Self {
            sets: [
                (Regime::Stabilization, normalize(stabilization)),
                (Regime::Optimization, normalize(optimization)),
                (Regime::Exploration, normalize(exploration)),
            ],
        }
    }

    /// Keyword set for `regime`.
    pub fn keywords(&self, regime: Regime) -> &[String] {
        self.sets
            .iter()
            .find(|(r, _)| *r == regime)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Number of keywords per regime, indexed by [`Regime::index`].
    pub fn keyword_counts(&self) -> [usize; 3] {
        Regime::ALL.map(|regime| self.keywords(regime).len())
    }

    pub fn classify(&self, description: &str) -> Regime {
        let text = description.to_lowercase();
        let regime = self
            .sets
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w.as_str())))
            .map(|(regime, _)| *regime)
            .unwrap_or(Regime::Stabilization);
        tracing::trace!(%regime, "classified description");
        regime
    }

    /// Classifies a named task with optional tags and description.
    ///
    /// Name, tags and description are joined into one text and run through
    /// the same priority rule as [`classify`](Self::classify).
    pub fn classify_task(
        &self,
        name: &str,
        tags: &[&str],
        description: Option<&str>,
    ) -> Classification {
        let text = format!("{} {} {}", name, tags.join(" "), description.unwrap_or(""))
            .to_lowercase();

        for (regime, words) in &self.sets {
            let matched: Vec<String> = words
                .iter()
                .filter(|w| text.contains(w.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                continue;
            }
            let reasoning = format!(
                "matched {} {} keyword(s): {}",
                matched.len(),
                regime,
                matched.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
            );
            tracing::debug!(task = name, %regime, matched = matched.len(), "task classified");
            return Classification {
                regime: *regime,
                confidence_weight: CONFIDENCE_WEIGHTS[regime.index()],
                matched_keywords: matched,
                reasoning,
            };
        }

        tracing::debug!(task = name, "no regime keywords, defaulting to stabilization");
        Classification {
            regime: Regime::Stabilization,
            confidence_weight: CONFIDENCE_WEIGHTS[Regime::Stabilization.index()],
            matched_keywords: Vec::new(),
            reasoning: "no regime keywords found, defaulting to stabilization".to_string(),
        }
    }
}

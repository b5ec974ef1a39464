//! Turning raw scores into a probability distribution.

use std::{
    collections::HashMap as StdHashMap,
    hash::{BuildHasher, Hash},
};

use ahash::HashMap;
use tracing::debug;

/// Exponent base of [`softmax`].
///
/// Raw Naive Bayes scores are sums of log-probabilities and easily reach
/// several hundred below zero; with base `e` every term would underflow, a
/// base this close to 1 keeps them representable.
pub const SOFTMAX_BASE: f64 = 1.1;

/// Normalize `scores` so the values sum to 1, preserving their order.
///
/// Each key maps to `b^s / Σ b^s` with `b = SOFTMAX_BASE`. An empty input
/// gives an empty output and equal scores share the mass equally.
///
/// If the denominator leaves the representable range (scores beyond roughly
/// ±7400) every exponent is first shifted by the maximum score; the result is
/// mathematically the same distribution.
pub fn softmax<K, S>(scores: &StdHashMap<K, f64, S>) -> HashMap<K, f64>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    debug_assert!(
        scores.values().all(|s| !s.is_nan() && *s != f64::INFINITY),
        "scores must be finite or negative infinity"
    );
    if scores.is_empty() {
        return HashMap::default();
    }

    let denominator = scores.values().map(|&s| SOFTMAX_BASE.powf(s)).sum::<f64>();
    if denominator > 0.0 && denominator.is_finite() {
        return scores
            .iter()
            .map(|(key, &s)| (key.clone(), SOFTMAX_BASE.powf(s) / denominator))
            .collect();
    }

    let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    debug!(max_score = max, "Shifting scores before normalization");
    let denominator = scores
        .values()
        .map(|&s| SOFTMAX_BASE.powf(s - max))
        .sum::<f64>();
    scores
        .iter()
        .map(|(key, &s)| (key.clone(), SOFTMAX_BASE.powf(s - max) / denominator))
        .collect()
}

/// Key with the greatest value, `None` for an empty map.
///
/// Among equal maxima the first one met while iterating wins. Hash map
/// iteration order is unspecified, so which tied key is returned is too.
pub fn top_label<K, S: BuildHasher>(values: &StdHashMap<K, f64, S>) -> Option<&K> {
    let mut best: Option<(&K, f64)> = None;
    for (key, &value) in values {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((key, value)),
        }
    }
    best.map(|(key, _)| key)
}

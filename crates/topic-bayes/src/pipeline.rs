use core::fmt;
use std::cmp::Ordering;

use ahash::HashMap;
use topic_bayes_preprocessing::Label;

use crate::softmax::{softmax, top_label};

/// Probability of a document belonging to each trained label.
///
/// Probabilities are non-negative and sum to 1; a model with no labels
/// yields an empty prediction.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Prediction {
    probabilities: HashMap<Label, f64>,
}

impl Prediction {
    /// Normalize raw per-label scores with [`softmax`].
    #[must_use]
    pub fn from_raw_scores(scores: &HashMap<Label, f64>) -> Self {
        let probabilities = softmax(scores);
        debug_assert!(
            probabilities.is_empty() || (probabilities.values().sum::<f64>() - 1.0).abs() < 1e-9,
            "Probabilities must sum to 1.0"
        );
        Self { probabilities }
    }

    #[must_use]
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Most probable label; ties are broken arbitrarily.
    #[must_use]
    pub fn top_label(&self) -> Option<&str> {
        top_label(&self.probabilities).map(String::as_str)
    }

    /// Most probable label together with its probability.
    #[must_use]
    pub fn top(&self) -> Option<(&str, f64)> {
        top_label(&self.probabilities).map(|label| (label.as_str(), self.probabilities[label]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities
            .iter()
            .map(|(label, &probability)| (label.as_str(), probability))
    }

    /// Labels from most to least probable, ties ordered by label.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked = self.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<Label, f64> {
        self.probabilities
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, probability)) in self.ranked().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "P({label})={probability:.3}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(pairs: &[(&str, f64)]) -> Prediction {
        let scores = pairs
            .iter()
            .map(|&(label, score)| (label.to_string(), score))
            .collect::<HashMap<_, _>>();
        Prediction::from_raw_scores(&scores)
    }

    #[test]
    fn test_empty_prediction() {
        let prediction = prediction(&[]);
        assert!(prediction.is_empty());
        assert_eq!(prediction.top_label(), None);
        assert_eq!(prediction.top(), None);
        assert_eq!(prediction.to_string(), "");
    }

    #[test]
    fn test_probabilities_and_top_label() {
        let prediction = prediction(&[("sport", -3.0), ("business", -9.0), ("tech", -6.0)]);
        assert_eq!(prediction.len(), 3);
        assert_eq!(prediction.top_label(), Some("sport"));
        let (label, probability) = prediction.top().unwrap();
        assert_eq!(label, "sport");
        assert!((probability - prediction.probability("sport").unwrap()).abs() < f64::EPSILON);
        assert_eq!(prediction.probability("weather"), None);

        let ranked = prediction
            .ranked()
            .into_iter()
            .map(|(label, _)| label)
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec!["sport", "tech", "business"]);
    }

    #[test]
    fn test_display() {
        let prediction = prediction(&[("a", 0.0), ("b", 0.0)]);
        assert_eq!(prediction.to_string(), "P(a)=0.500, P(b)=0.500");
    }

    #[test]
    fn test_serializes_as_a_map() {
        let prediction = prediction(&[("only", -1.0)]);
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json, serde_json::json!({ "only": 1.0 }));
    }
}

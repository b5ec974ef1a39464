//! # topic-bayes
//!
//! A Naive Bayes topic classifier with add-one (Laplace) smoothing.
//!
//! Training counts how often every word occurs under every label. A new
//! document is scored against each label by summing the log-likelihoods of
//! its words, and the scores are normalized into a probability distribution.
//!
//! ## Quick Start
//!
//! ```rust
//! use topic_bayes::{Classifier, Document, TokenizerParams};
//!
//! let training = vec![
//!     Document::new("sport", ["match", "goal", "team"]),
//!     Document::new("business", ["shares", "market", "profit"]),
//! ];
//! let classifier = Classifier::fit(&training, TokenizerParams::default());
//!
//! let prediction = classifier.predict("The team scored a late goal!");
//! assert_eq!(prediction.top_label(), Some("sport"));
//!
//! assert_eq!(
//!     classifier.classify("Market shares fell").as_deref(),
//!     Some("business")
//! );
//! ```
//!
//! ## Working on tokens
//!
//! [`FrequencyModel`] is the trained artifact and works on already cleaned
//! tokens; [`softmax`] is usable on its own for any score map.
//!
//! ```rust
//! use topic_bayes::{Document, FrequencyModel};
//!
//! let model = FrequencyModel::fit(&[
//!     Document::new("sports", ["score", "score", "game"]),
//!     Document::new("politics", ["vote", "election"]),
//! ]);
//! let scores = model.raw_scores(&["score", "game"]);
//! assert!(scores["sports"] > scores["politics"]);
//! ```

#[cfg(feature = "cli")]
pub mod cli;

mod evaluation;
mod model;
mod pipeline;
pub mod softmax;

pub use evaluation::{Evaluation, EvaluationSummary, Outcome, evaluate};
pub use model::{FrequencyModel, SCORE_OFFSET};
pub use pipeline::Prediction;
pub use softmax::{SOFTMAX_BASE, softmax, top_label};
pub use topic_bayes_preprocessing::{CorpusReader, Document, Label, LoadError, TokenizerParams};

use rayon::prelude::*;
use topic_bayes_preprocessing::clean_text;

/// A trained [`FrequencyModel`] together with the tokenizer settings used to
/// turn raw text into tokens at prediction time.
///
/// Use the same [`TokenizerParams`] the training corpus was cleaned with.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: FrequencyModel,
    tokenizer: TokenizerParams,
}

impl Classifier {
    #[must_use]
    pub fn new(model: FrequencyModel, tokenizer: TokenizerParams) -> Self {
        Self { model, tokenizer }
    }

    /// Train on `documents` and keep `tokenizer` for raw-text predictions.
    #[must_use]
    pub fn fit(documents: &[Document], tokenizer: TokenizerParams) -> Self {
        Self::new(FrequencyModel::fit(documents), tokenizer)
    }

    #[must_use]
    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    #[must_use]
    pub fn tokenizer(&self) -> &TokenizerParams {
        &self.tokenizer
    }

    /// Clean `text` and predict its label distribution.
    pub fn predict<T: AsRef<str>>(&self, text: T) -> Prediction {
        self.predict_tokens(&clean_text(text.as_ref(), &self.tokenizer))
    }

    /// Predict from tokens that are already cleaned.
    pub fn predict_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Prediction {
        self.model.predict(tokens)
    }

    /// Predict every text in parallel; output order matches input order.
    pub fn predict_batch<T: AsRef<str> + Sync>(&self, texts: &[T]) -> Vec<Prediction> {
        texts.par_iter().map(|text| self.predict(text)).collect()
    }

    /// Most probable label of `text`, `None` for an untrained model.
    pub fn classify<T: AsRef<str>>(&self, text: T) -> Option<Label> {
        self.predict(text).top_label().map(str::to_owned)
    }

    pub fn classify_batch<T: AsRef<str> + Sync>(&self, texts: &[T]) -> Vec<Option<Label>> {
        self.predict_batch(texts)
            .into_iter()
            .map(|prediction| prediction.top_label().map(str::to_owned))
            .collect()
    }

    /// See [`evaluate`].
    pub fn evaluate<'a>(&self, documents: &'a [Document]) -> Evaluation<'a> {
        evaluate(&self.model, documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        let training = vec![
            Document::new("sport", ["match", "goal", "team", "coach"]),
            Document::new("sport", ["league", "goal", "season"]),
            Document::new("business", ["shares", "market", "profit"]),
            Document::new("business", ["bank", "market", "investors"]),
        ];
        Classifier::fit(&training, TokenizerParams::default())
    }

    #[test]
    fn test_predict_cleans_raw_text() {
        let prediction = classifier().predict("GOAL! The TEAM won the league.");
        assert_eq!(prediction.len(), 2);
        assert!((prediction.iter().map(|(_, p)| p).sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(prediction.top_label(), Some("sport"));
    }

    #[test]
    fn test_predict_matches_tokens() {
        let classifier = classifier();
        let from_text = classifier.predict("Market, shares!");
        let from_tokens = classifier.predict_tokens(&["market", "shares"]);
        assert_eq!(from_text.len(), from_tokens.len());
        for (label, probability) in from_tokens.iter() {
            assert!((from_text.probability(label).unwrap() - probability).abs() < 1e-12);
        }
    }

    #[test]
    fn test_classify() {
        let classifier = classifier();
        assert_eq!(classifier.classify("bank profit").as_deref(), Some("business"));
        assert_eq!(classifier.classify("coach season").as_deref(), Some("sport"));
    }

    #[test]
    fn test_batch_predictions() {
        let classifier = classifier();
        let texts = vec!["goal goal goal", "market investors", "unknown words only"];

        let predictions = classifier.predict_batch(&texts);
        assert_eq!(predictions.len(), 3);
        for prediction in &predictions {
            assert!((prediction.iter().map(|(_, p)| p).sum::<f64>() - 1.0).abs() < 1e-9);
        }

        let classes = classifier.classify_batch(&texts);
        assert_eq!(classes[0].as_deref(), Some("sport"));
        assert_eq!(classes[1].as_deref(), Some("business"));
        assert!(classes[2].is_some());
    }

    #[test]
    fn test_untrained_classifier() {
        let classifier = Classifier::fit(&[], TokenizerParams::default());
        assert!(classifier.predict("anything at all").is_empty());
        assert_eq!(classifier.classify("anything at all"), None);
    }

    #[test]
    fn test_evaluate_through_classifier() {
        let classifier = classifier();
        let held_out = vec![Document::new("sport", ["goal"]), Document::new("business", ["market"])];
        let evaluation = classifier.evaluate(&held_out);
        assert_eq!(evaluation.hit_count(), 2);
        assert_eq!(evaluation.accuracy(), Some(1.0));
    }
}

mod counts;

use ahash::HashMap;
use topic_bayes_preprocessing::{Document, Label};
use tracing::debug;

use crate::pipeline::Prediction;
use counts::{CountTables, LabelCounts};

/// Added to every raw document score before the per-word log-probabilities.
///
/// It shifts all labels equally and never changes a ranking.
pub const SCORE_OFFSET: f64 = 1.0;

/// Word-frequency Naive Bayes model.
///
/// Built once from a training corpus by [`FrequencyModel::fit`] and immutable
/// afterwards, so a single instance can serve predictions from many threads.
///
/// Each word's likelihood under a label uses add-one smoothing:
///
/// ```text
/// P(word | label) = (count(word, label) + 1) / (total_words(label) + vocabulary_size)
/// ```
///
/// where `vocabulary_size` counts the distinct words of the whole corpus and
/// is shared by every label.
#[derive(Clone, Debug, Default)]
pub struct FrequencyModel {
    labels: HashMap<Label, LabelCounts>,
    vocabulary_size: usize,
    num_documents: usize,
}

impl FrequencyModel {
    /// Train on `documents`. An empty corpus produces an empty model whose
    /// predictions are empty distributions.
    #[must_use]
    pub fn fit(documents: &[Document]) -> Self {
        debug!(num_documents = documents.len(), "Fitting FrequencyModel");
        let tables = CountTables::from_documents(documents);
        let vocabulary_size = tables.vocabulary_size();
        debug!(
            num_labels = tables.by_label.len(),
            vocabulary_size, "FrequencyModel fitting complete"
        );

        Self {
            labels: tables.by_label,
            vocabulary_size,
            num_documents: documents.len(),
        }
    }

    /// Labels seen during training, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    #[must_use]
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// Distinct words across the entire training corpus.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Occurrences of `word` in training documents labeled `label`.
    #[must_use]
    pub fn word_count(&self, label: &str, word: &str) -> usize {
        self.labels
            .get(label)
            .and_then(|counts| counts.word_counts.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Word table of one label, `None` for labels never seen in training.
    #[must_use]
    pub fn word_counts(&self, label: &str) -> Option<&HashMap<String, usize>> {
        self.labels.get(label).map(|counts| &counts.word_counts)
    }

    #[must_use]
    pub fn total_word_count(&self, label: &str) -> usize {
        self.labels.get(label).map_or(0, |counts| counts.total_words)
    }

    /// Training documents of `label` that contributed at least one token.
    #[must_use]
    pub fn document_count(&self, label: &str) -> usize {
        self.labels.get(label).map_or(0, |counts| counts.documents)
    }

    /// Smoothed `P(word | label)`. Unseen words and unseen labels count as
    /// zero occurrences, so the result is always positive.
    ///
    /// A model trained without a single token has nothing to smooth against;
    /// every word then gets probability 1.
    #[must_use]
    pub fn word_probability(&self, word: &str, label: &str) -> f64 {
        let occurrences = self.word_count(label, word) + 1;
        let denominator = (self.total_word_count(label) + self.vocabulary_size).max(1);
        occurrences as f64 / denominator as f64
    }

    /// `SCORE_OFFSET + Σ ln P(word | label)` over `tokens`, summed in order.
    pub fn raw_score<S: AsRef<str>>(&self, tokens: &[S], label: &str) -> f64 {
        tokens.iter().fold(SCORE_OFFSET, |score, token| {
            score + self.word_probability(token.as_ref(), label).ln()
        })
    }

    /// Raw score of `tokens` under every trained label.
    pub fn raw_scores<S: AsRef<str>>(&self, tokens: &[S]) -> HashMap<Label, f64> {
        self.labels
            .keys()
            .map(|label| (label.clone(), self.raw_score(tokens, label)))
            .collect()
    }

    /// Normalized distribution of `tokens` over the trained labels.
    pub fn predict<S: AsRef<str>>(&self, tokens: &[S]) -> Prediction {
        Prediction::from_raw_scores(&self.raw_scores(tokens))
    }
}

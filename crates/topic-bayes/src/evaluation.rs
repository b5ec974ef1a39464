use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Serialize;
use topic_bayes_preprocessing::{Document, Label, progress::progress_bar};
use tracing::{debug, info};

use crate::model::FrequencyModel;

/// A held-out document next to the label the model chose for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<'a> {
    document: &'a Document,
    predicted: Option<Label>,
}

impl<'a> Outcome<'a> {
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.document
    }

    #[must_use]
    pub fn expected(&self) -> &'a str {
        self.document.label()
    }

    /// `None` when the model had no label to offer.
    #[must_use]
    pub fn predicted(&self) -> Option<&str> {
        self.predicted.as_deref()
    }

    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.predicted() == Some(self.expected())
    }
}

/// Held-out documents split by whether the top prediction matched.
#[derive(Debug, Clone, Default)]
pub struct Evaluation<'a> {
    hits: Vec<Outcome<'a>>,
    misses: Vec<Outcome<'a>>,
}

/// Counts-only view of an [`Evaluation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub hits: usize,
    pub misses: usize,
    pub accuracy: Option<f64>,
}

impl<'a> Evaluation<'a> {
    #[must_use]
    pub fn hits(&self) -> &[Outcome<'a>] {
        &self.hits
    }

    #[must_use]
    pub fn misses(&self) -> &[Outcome<'a>] {
        &self.misses
    }

    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.misses.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.hits.len() + self.misses.len()
    }

    /// Fraction of hits, `None` when nothing was evaluated.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.hits.len() as f64 / total as f64)
    }

    #[must_use]
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            hits: self.hit_count(),
            misses: self.miss_count(),
            accuracy: self.accuracy(),
        }
    }
}

/// Predict the top label of every document and compare it with the true one.
///
/// Documents are scored in parallel against the shared, read-only model.
/// Hits and misses keep the relative order of `documents`.
pub fn evaluate<'a>(model: &FrequencyModel, documents: &'a [Document]) -> Evaluation<'a> {
    debug!(num_documents = documents.len(), "Evaluating model");
    let pb = progress_bar(documents.len(), "Evaluating documents");
    let (hits, misses): (Vec<_>, Vec<_>) = documents
        .par_iter()
        .progress_with(pb.clone())
        .map(|document| Outcome {
            document,
            predicted: model
                .predict(document.tokens())
                .top_label()
                .map(str::to_owned),
        })
        .partition(Outcome::is_hit);
    pb.finish_with_message("Evaluation complete");

    let evaluation = Evaluation { hits, misses };
    info!(
        hits = evaluation.hit_count(),
        misses = evaluation.miss_count(),
        "Evaluation complete"
    );
    evaluation
}

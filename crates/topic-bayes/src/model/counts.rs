use ahash::{HashMap, HashSet};
use rayon::prelude::*;
use topic_bayes_preprocessing::{Document, Label};
use tracing::debug;

/// Corpora at least this large are counted in parallel.
const MIN_DOCUMENTS_FOR_PARALLEL: usize = 1_000;

/// Word statistics of every training document sharing one label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LabelCounts {
    pub(crate) word_counts: HashMap<String, usize>,
    /// Always equal to the sum of `word_counts` values.
    pub(crate) total_words: usize,
    pub(crate) documents: usize,
}

impl LabelCounts {
    fn add_document(&mut self, tokens: &[String]) {
        for token in tokens {
            *self.word_counts.entry(token.clone()).or_insert(0) += 1;
        }
        self.total_words += tokens.len();
        self.documents += 1;
    }

    fn merge(&mut self, other: Self) {
        for (word, count) in other.word_counts {
            *self.word_counts.entry(word).or_insert(0) += count;
        }
        self.total_words += other.total_words;
        self.documents += other.documents;
    }
}

/// Per-label count tables, accumulated document by document and mergeable
/// across partitions of the corpus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CountTables {
    pub(crate) by_label: HashMap<Label, LabelCounts>,
}

impl CountTables {
    pub(crate) fn from_documents(documents: &[Document]) -> Self {
        if documents.len() >= MIN_DOCUMENTS_FOR_PARALLEL {
            Self::count_par(documents)
        } else {
            Self::count(documents)
        }
    }

    fn count(documents: &[Document]) -> Self {
        debug!(num_documents = documents.len(), "Counting words sequentially");
        documents.iter().fold(Self::default(), Self::add_document)
    }

    fn count_par(documents: &[Document]) -> Self {
        debug!(num_documents = documents.len(), "Counting words in parallel");
        documents
            .par_iter()
            .fold(Self::default, Self::add_document)
            .reduce(Self::default, Self::merge)
    }

    /// Documents with no tokens leave the tables untouched, so their label
    /// only exists if some other document gives it a word.
    fn add_document(mut self, document: &Document) -> Self {
        if document.is_empty() {
            return self;
        }
        self.by_label
            .entry(document.label().to_owned())
            .or_default()
            .add_document(document.tokens());
        self
    }

    fn merge(mut self, other: Self) -> Self {
        for (label, counts) in other.by_label {
            self.by_label.entry(label).or_default().merge(counts);
        }
        self
    }

    /// Number of distinct words over all labels.
    pub(crate) fn vocabulary_size(&self) -> usize {
        self.by_label
            .values()
            .flat_map(|counts| counts.word_counts.keys())
            .collect::<HashSet<_>>()
            .len()
    }
}

use indicatif::{ParallelProgressIterator, ProgressIterator};
use rayon::prelude::*;
use tracing::debug;

use super::params::TokenizerParams;
use crate::progress::progress_bar;

/// Minimum number of texts to consider parallelization
const MIN_TEXTS_FOR_PARALLEL: usize = 100;

/// Minimum total character count to consider parallelization
const MIN_CHARS_FOR_PARALLEL: usize = 10_000;

/// Turn one raw text into its cleaned token sequence.
///
/// Carriage returns and the configured punctuation are removed, the text is
/// optionally lowercased, split on whitespace (newlines included) and tokens
/// shorter than [`TokenizerParams::min_token_chars`] are dropped.
pub fn clean_text(text: &str, params: &TokenizerParams) -> Vec<String> {
    let stripped = text
        .chars()
        .filter(|&c| c != '\r' && !params.is_punctuation(c))
        .collect::<String>();
    let normalized = if params.lowercase() {
        stripped.to_lowercase()
    } else {
        stripped
    };

    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() >= params.min_token_chars())
        .map(str::to_owned)
        .collect()
}

fn tokenize_texts_par<T: AsRef<str> + Sync>(texts: &[T], params: &TokenizerParams) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Using parallel tokenization");
    let pb = progress_bar(texts.len(), "Cleaning texts in parallel");
    let result = texts
        .par_iter()
        .progress_with(pb.clone())
        .map(|text| clean_text(text.as_ref(), params))
        .collect();
    pb.finish_with_message("Parallel cleaning complete");
    result
}

fn tokenize_texts<T: AsRef<str>>(texts: &[T], params: &TokenizerParams) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Using sequential tokenization");
    let pb = progress_bar(texts.len(), "Cleaning texts");
    let result = texts
        .iter()
        .progress_with(pb.clone())
        .map(|text| clean_text(text.as_ref(), params))
        .collect();
    pb.finish_with_message("Cleaning complete");
    result
}

/// Parallelize when there are many texts, or when a small batch is long
/// enough in total. Large batches are estimated from their first 20 texts.
#[inline]
fn should_use_parallel<T: AsRef<str>>(texts: &[T]) -> bool {
    let num_texts = texts.len();
    if num_texts >= MIN_TEXTS_FOR_PARALLEL {
        return true;
    }

    let total_chars: usize = if num_texts > 20 {
        let sample_chars: usize = texts.iter().take(20).map(|s| s.as_ref().len()).sum();
        (sample_chars * num_texts) / 20
    } else {
        texts.iter().map(|s| s.as_ref().len()).sum()
    };

    total_chars >= MIN_CHARS_FOR_PARALLEL
}

/// Clean a batch of texts. Output order matches input order.
pub fn tokenize<T: AsRef<str> + Sync>(texts: &[T], params: &TokenizerParams) -> Vec<Vec<String>> {
    if should_use_parallel(texts) {
        tokenize_texts_par(texts, params)
    } else {
        tokenize_texts(texts, params)
    }
}

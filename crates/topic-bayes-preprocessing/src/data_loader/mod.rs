//! Reading `label<delimiter>text` corpora into [`Document`]s.
//!
//! ```text
//! business,"Shares in the company rose sharply..."
//! sport,"The match ended in a draw..."
//! ```
//!
//! The first field of every record is the label; everything after the first
//! delimiter is the text, which is cleaned with the reader's
//! [`TokenizerParams`].

mod document;
mod error;

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

pub use document::{Document, Label};
pub use error::{LoadError, Result};

use crate::pre_processor::{TokenizerParams, tokenize};

#[derive(Clone, Debug)]
pub struct CorpusReader {
    delimiter: u8,
    /// Skip the first record when it is a header row.
    has_headers: bool,
    tokenizer: TokenizerParams,
}

impl Default for CorpusReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusReader {
    /// Comma delimited, no header row, default tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            tokenizer: TokenizerParams::default(),
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: TokenizerParams) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    #[must_use]
    pub fn tokenizer(&self) -> &TokenizerParams {
        &self.tokenizer
    }

    /// Load every document from the file at `path`.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<Document>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening corpus file");
        let file = File::open(path).map_err(|source| LoadError::io(path, source))?;
        let documents = self.read(file)?;
        info!(
            path = %path.display(),
            num_documents = documents.len(),
            "Loaded corpus"
        );
        Ok(documents)
    }

    /// Load every document from `reader`. Blank lines are ignored; the first
    /// malformed record aborts the whole load.
    pub fn read<R: io::Read>(&self, reader: R) -> Result<Vec<Document>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut labels = Vec::new();
        let mut texts = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let (label, text) = self.split_record(&record)?;
            labels.push(label);
            texts.push(text);
        }
        debug!(num_records = labels.len(), "Parsed corpus records");

        let tokenized = tokenize(&texts, &self.tokenizer);
        Ok(labels
            .into_iter()
            .zip(tokenized)
            .map(|(label, tokens)| Document::new(label, tokens))
            .collect())
    }

    /// Split on the first delimiter only: any further fields belong to the text.
    fn split_record(&self, record: &StringRecord) -> Result<(Label, String)> {
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() < 2 {
            return Err(LoadError::malformed(
                line,
                format!(
                    "expected a label and a text separated by {:?}, found {} field",
                    char::from(self.delimiter),
                    record.len()
                ),
            ));
        }

        let label = record[0].trim();
        if label.is_empty() {
            return Err(LoadError::malformed(line, "label is empty"));
        }

        let separator = char::from(self.delimiter).to_string();
        let text = record.iter().skip(1).collect::<Vec<_>>().join(&separator);
        Ok((label.to_owned(), text))
    }
}

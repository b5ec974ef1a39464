use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while reading a labeled corpus.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("corpus file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read corpus file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record that cannot be split into a label and a text.
    /// `line` is 1-based and points at the first line of the record.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

//! Preprocessing for topic-bayes: raw text cleansing and labeled corpus loading.
//!
//! ```rust
//! use topic_bayes_preprocessing::{CorpusReader, TokenizerParams, clean_text};
//!
//! let tokens = clean_text("Stocks rallied, again!", &TokenizerParams::default());
//! assert_eq!(tokens, vec!["stocks", "rallied", "again"]);
//!
//! let corpus = "business,\"Stocks rallied again\"\n";
//! let documents = CorpusReader::new().read(corpus.as_bytes())?;
//! assert_eq!(documents[0].label(), "business");
//! # Ok::<(), topic_bayes_preprocessing::LoadError>(())
//! ```

pub mod data_loader;
pub mod pre_processor;
pub mod progress;

pub use data_loader::{CorpusReader, Document, Label, LoadError};
pub use pre_processor::{TokenizerParams, clean_text, tokenize};

//! Text cleansing: raw strings in, normalized word tokens out.

mod params;
mod tokenizer;

pub use params::{DEFAULT_MIN_TOKEN_CHARS, DEFAULT_PUNCTUATION, TokenizerParams};
pub use tokenizer::{clean_text, tokenize};

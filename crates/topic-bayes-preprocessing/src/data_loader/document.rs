use crate::pre_processor::{TokenizerParams, clean_text};

/// The class a document belongs to.
pub type Label = String;

/// One labeled training or test example.
///
/// Tokens are expected to be cleaned already (see [`clean_text`]); nothing
/// downstream re-validates them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    label: Label,
    tokens: Vec<String>,
}

impl Document {
    pub fn new<S: Into<String>>(label: impl Into<Label>, tokens: impl IntoIterator<Item = S>) -> Self {
        Self {
            label: label.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a document by cleaning raw `text` with `params`.
    pub fn from_text(label: impl Into<Label>, text: &str, params: &TokenizerParams) -> Self {
        Self {
            label: label.into(),
            tokens: clean_text(text, params),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

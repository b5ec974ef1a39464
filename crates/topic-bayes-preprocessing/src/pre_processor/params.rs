/// Characters removed from text before it is split into tokens.
pub const DEFAULT_PUNCTUATION: [char; 9] = ['!', '.', ',', '?', '"', ':', ';', '(', ')'];

/// Tokens with fewer characters than this are discarded.
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 4;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizerParams {
    punctuation: Vec<char>,
    /// Minimum length of a kept token, counted in `char`s.
    /// The default of 4 drops every token of three characters or fewer.
    min_token_chars: usize,
    lowercase: bool,
}

impl TokenizerParams {
    pub fn new(
        punctuation: impl IntoIterator<Item = char>,
        min_token_chars: usize,
        lowercase: bool,
    ) -> Self {
        assert!(
            min_token_chars > 0,
            "min_token_chars must be at least 1 (empty tokens are always dropped)"
        );
        Self {
            punctuation: punctuation.into_iter().collect(),
            min_token_chars,
            lowercase,
        }
    }

    #[must_use]
    pub fn with_min_token_chars(mut self, min_token_chars: usize) -> Self {
        assert!(min_token_chars > 0, "min_token_chars must be at least 1");
        self.min_token_chars = min_token_chars;
        self
    }

    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    #[must_use]
    pub fn punctuation(&self) -> &[char] {
        &self.punctuation
    }

    #[must_use]
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    #[must_use]
    pub fn min_token_chars(&self) -> usize {
        self.min_token_chars
    }

    #[must_use]
    pub fn lowercase(&self) -> bool {
        self.lowercase
    }
}

impl Default for TokenizerParams {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
            lowercase: true,
        }
    }
}

impl From<(&str, usize, bool)> for TokenizerParams {
    fn from(value: (&str, usize, bool)) -> Self {
        Self::new(value.0.chars(), value.1, value.2)
    }
}

//! Splitting raw text into token sequences.
//!
//! The model itself only consumes token sequences. A [`Tokenizer`] is the
//! pluggable step in front of it used by the text-level entry points
//! (`learn_texts`, `transform_texts`), where each text is split on a
//! Rayon worker.

use fancy_regex::Regex;

use crate::error::TokenizeError;

/// Runs of word characters; a sensible pattern for plain prose.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// Turns a text into an ordered sequence of tokens.
///
/// Implementations must be pure: the same text always yields the same
/// tokens. `Sync` lets one tokenizer serve every worker of a batch.
pub trait Tokenizer: Sync {
    /// Splits `text` into tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError`] if the underlying matcher fails.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

/// Splits on Unicode whitespace. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Creates a whitespace tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.split_whitespace().map(str::to_owned).collect())
    }
}

/// Emits every match of a regex pattern as a token.
///
/// Uses `fancy_regex`, so look-around patterns are accepted.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    pattern: Regex,
    lowercase: bool,
}

impl RegexTokenizer {
    /// Compiles `pattern` into a tokenizer.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::InvalidPattern`] if the pattern fails to compile.
    pub fn new(pattern: &str) -> Result<Self, TokenizeError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            lowercase: false,
        })
    }

    /// Lowercases every token after matching.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut tokens = Vec::new();
        for mat in self.pattern.find_iter(text) {
            let m = mat.map_err(|e| TokenizeError::RegexMatch(e.to_string()))?;
            let chunk = m.as_str();

            if chunk.is_empty() {
                continue;
            }

            tokens.push(if self.lowercase {
                chunk.to_lowercase()
            } else {
                chunk.to_owned()
            });
        }

        Ok(tokens)
    }
}

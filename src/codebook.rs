//! Codebook - the bijective mapping between tokens and integer codes.
//!
//! Codes are handed out in first-seen order while scanning a corpus
//! sequence by sequence, left to right. Because assignment depends on that
//! order, learning is strictly sequential; only reads are shared across
//! workers.
//!
//! The forward map is the source of truth. The inverse is a `Vec` indexed
//! by code, which makes the dense `[0, size)` invariant structural: a code
//! is valid exactly when it indexes into `code_to_token`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::CodebookError, types::Code};

/// Bidirectional token <-> code mapping that only grows during learning.
///
/// # Example
///
/// ```
/// use bagofwords::Codebook;
///
/// let mut codebook = Codebook::new();
/// codebook.learn([vec!["a", "b"], vec!["b", "c"]]);
///
/// assert_eq!(codebook.size(), 3);
/// assert_eq!(codebook.code_of("c"), Some(2));
/// assert_eq!(codebook.token_of(1).ok(), Some("b"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CodebookRepr", try_from = "CodebookRepr")]
pub struct Codebook {
    /// Token -> code. Source of truth.
    token_to_code: HashMap<String, Code>,

    /// Code -> token, rebuilt from `token_to_code` on load.
    ///
    /// `code_to_token[c]` is the token whose code is `c`.
    code_to_token: Vec<String>,
}

impl Codebook {
    /// Creates an empty codebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tokens known.
    pub fn size(&self) -> usize {
        self.code_to_token.len()
    }

    /// Returns `true` if nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.code_to_token.is_empty()
    }

    /// Looks up the code for `token`.
    ///
    /// Unseen tokens yield `None`; callers treat them as contributing nothing.
    #[inline]
    pub fn code_of(&self, token: &str) -> Option<Code> {
        self.token_to_code.get(token).copied()
    }

    /// Returns `true` if `token` has a code.
    pub fn contains(&self, token: &str) -> bool {
        self.token_to_code.contains_key(token)
    }

    /// Looks up the token assigned to `code`.
    ///
    /// # Errors
    ///
    /// Returns [`CodebookError::UnknownCode`] if `code >= size()`.
    pub fn token_of(&self, code: Code) -> Result<&str, CodebookError> {
        self.code_to_token
            .get(code)
            .map(String::as_str)
            .ok_or(CodebookError::UnknownCode(code))
    }

    /// Extends the vocabulary with every token of `corpus` not seen before.
    ///
    /// Sequences are scanned in the order given and tokens within each
    /// sequence left to right. Each unseen token receives the next code
    /// (the current `size()`). Codes that were already assigned never change,
    /// so vectors produced earlier stay valid as prefixes of the grown space.
    ///
    /// # Arguments
    ///
    /// * `corpus` - Token sequences; an empty corpus or sequence is a no-op.
    ///
    /// # Returns
    ///
    /// The number of tokens added by this call.
    pub fn learn<I, S, T>(&mut self, corpus: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let before = self.size();
        for sequence in corpus {
            for token in sequence {
                self.insert(token.as_ref());
            }
        }
        let added = self.size() - before;
        debug!(added, size = self.size(), "codebook learned");
        added
    }

    /// Read-only view of the token -> code mapping.
    pub fn token_to_code(&self) -> &HashMap<String, Code> {
        &self.token_to_code
    }

    /// Read-only view of the code -> token mapping, indexed by code.
    pub fn code_to_token(&self) -> &[String] {
        &self.code_to_token
    }

    /// Iterates `(code, token)` pairs in code order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Code, &str)> + '_ {
        self.code_to_token
            .iter()
            .enumerate()
            .map(|(code, token)| (code, token.as_str()))
    }

    /// Rebuilds a codebook from a forward mapping alone.
    ///
    /// # Arguments
    ///
    /// * `token_to_code` - Forward mapping, as persisted.
    ///
    /// # Returns
    ///
    /// A codebook whose inverse mapping is derived from `token_to_code`.
    ///
    /// # Errors
    ///
    /// Returns [`CodebookError::NonDenseCodes`] unless the codes are exactly
    /// `0..token_to_code.len()`, each used once.
    pub fn from_token_to_code(token_to_code: HashMap<String, Code>) -> Result<Self, CodebookError> {
        let expected = token_to_code.len();
        let mut slots: Vec<Option<String>> = vec![None; expected];

        for (token, &code) in &token_to_code {
            match slots.get_mut(code) {
                Some(slot) if slot.is_none() => *slot = Some(token.clone()),
                // out of range, or two tokens claiming one code
                _ => return Err(CodebookError::NonDenseCodes { expected, found: code }),
            }
        }

        // len == expected and no duplicates means every slot is filled
        let code_to_token = slots.into_iter().flatten().collect();

        Ok(Self {
            token_to_code,
            code_to_token,
        })
    }

    /// Returns the code for `token`, assigning the next one if unseen.
    fn insert(&mut self, token: &str) -> Code {
        if let Some(&code) = self.token_to_code.get(token) {
            return code;
        }
        let code = self.code_to_token.len();
        self.token_to_code.insert(token.to_owned(), code);
        self.code_to_token.push(token.to_owned());
        code
    }
}

/// Persisted form: the forward mapping only.
///
/// A `BTreeMap` keeps the written file stable across runs.
#[derive(Serialize, Deserialize)]
struct CodebookRepr {
    token_to_code: BTreeMap<String, Code>,
}

impl From<Codebook> for CodebookRepr {
    fn from(codebook: Codebook) -> Self {
        Self {
            token_to_code: codebook.token_to_code.into_iter().collect(),
        }
    }
}

impl TryFrom<CodebookRepr> for Codebook {
    type Error = CodebookError;

    fn try_from(repr: CodebookRepr) -> Result<Self, Self::Error> {
        Codebook::from_token_to_code(repr.token_to_code.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learned(corpus: &[&[&str]]) -> Codebook {
        let mut codebook = Codebook::new();
        codebook.learn(corpus.iter().map(|s| s.iter()));
        codebook
    }

    #[test]
    fn test_first_seen_order() {
        let codebook = learned(&[&["a", "b"], &["b", "c"]]);
        assert_eq!(codebook.code_of("a"), Some(0));
        assert_eq!(codebook.code_of("b"), Some(1));
        assert_eq!(codebook.code_of("c"), Some(2));
        assert_eq!(codebook.size(), 3);
    }

    #[test]
    fn test_unseen_token_is_none() {
        let codebook = learned(&[&["a"]]);
        assert_eq!(codebook.code_of("z"), None);
        assert!(!codebook.contains("z"));
    }

    #[test]
    fn test_token_of_unknown_code_errors() {
        let codebook = learned(&[&["a"]]);
        assert_eq!(codebook.token_of(1), Err(CodebookError::UnknownCode(1)));
    }

    #[test]
    fn test_relearn_extends_and_keeps_codes() {
        let mut codebook = learned(&[&["x", "y"]]);
        let added = codebook.learn([["y", "z"]]);
        assert_eq!(added, 1);
        assert_eq!(codebook.code_of("x"), Some(0));
        assert_eq!(codebook.code_of("y"), Some(1));
        assert_eq!(codebook.code_of("z"), Some(2));
    }

    #[test]
    fn test_empty_corpus_is_noop() {
        let mut codebook = Codebook::new();
        let added = codebook.learn(Vec::<Vec<String>>::new());
        assert_eq!(added, 0);
        assert!(codebook.is_empty());
    }

    #[test]
    fn test_empty_string_is_a_token() {
        let codebook = learned(&[&["", "a", ""]]);
        assert_eq!(codebook.code_of(""), Some(0));
        assert_eq!(codebook.size(), 2);
    }

    #[test]
    fn test_iter_in_code_order() {
        let codebook = learned(&[&["c", "a", "b"]]);
        let pairs: Vec<(Code, &str)> = codebook.iter().collect();
        assert_eq!(pairs, vec![(0, "c"), (1, "a"), (2, "b")]);
    }

    #[test]
    fn test_from_token_to_code_rebuilds_inverse() {
        let forward: HashMap<String, Code> =
            [("b".to_string(), 1), ("a".to_string(), 0)].into_iter().collect();
        let codebook = Codebook::from_token_to_code(forward).expect("dense codes should load");
        assert_eq!(codebook.code_to_token(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_token_to_code_rejects_gap() {
        let forward: HashMap<String, Code> =
            [("a".to_string(), 0), ("b".to_string(), 2)].into_iter().collect();
        let result = Codebook::from_token_to_code(forward);
        assert_eq!(
            result,
            Err(CodebookError::NonDenseCodes { expected: 2, found: 2 })
        );
    }

    #[test]
    fn test_from_token_to_code_rejects_duplicate() {
        let forward: HashMap<String, Code> =
            [("a".to_string(), 0), ("b".to_string(), 0)].into_iter().collect();
        assert!(matches!(
            Codebook::from_token_to_code(forward),
            Err(CodebookError::NonDenseCodes { expected: 2, found: 0 })
        ));
    }

    #[test]
    fn test_serde_writes_forward_map_only() {
        let codebook = learned(&[&["b", "a"]]);
        let json = serde_json::to_string(&codebook).expect("codebook should serialize");
        assert_eq!(json, r#"{"token_to_code":{"a":1,"b":0}}"#);

        let back: Codebook = serde_json::from_str(&json).expect("codebook should deserialize");
        assert_eq!(back, codebook);
    }

    #[test]
    fn test_serde_rejects_non_dense_codes() {
        let result: Result<Codebook, _> = serde_json::from_str(r#"{"token_to_code":{"a":3}}"#);
        assert!(result.is_err());
    }
}

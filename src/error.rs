//! Error types for codebook, learning, transform and persistence operations.

use std::{error::Error, fmt, io};

use indicatif::style::TemplateError;

use crate::types::{Code, Count};

/// Errors raised by direct codebook lookups and codebook reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodebookError {
    /// Code is not currently assigned to any token.
    UnknownCode(Code),
    /// A forward mapping whose codes do not cover `[0, size)` exactly once.
    NonDenseCodes {
        /// Number of tokens in the mapping, i.e. the expected code range end.
        expected: usize,
        /// First code found to be missing, duplicated or out of range.
        found: Code,
    },
}

impl fmt::Display for CodebookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode(c) => write!(f, "unknown code: {c}"),
            Self::NonDenseCodes { expected, found } => write!(
                f,
                "codes must form the dense range [0, {expected}); offending code: {found}"
            ),
        }
    }
}

impl Error for CodebookError {}

/// Violations of the sparse vector layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparseVectorError {
    /// `positions` and `values` have different lengths.
    LengthMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of values.
        values: usize,
    },
    /// A position is not strictly greater than the one before it.
    Unsorted(Code),
    /// A position lies outside `[0, dimension)`.
    OutOfRange {
        /// Offending position.
        position: Code,
        /// Logical length of the vector.
        dimension: usize,
    },
    /// A zero value is stored explicitly.
    StoredZero(Code),
}

impl fmt::Display for SparseVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { positions, values } => write!(
                f,
                "{positions} positions but {values} values"
            ),
            Self::Unsorted(p) => write!(f, "positions must be strictly increasing at {p}"),
            Self::OutOfRange { position, dimension } => {
                write!(f, "position {position} out of range for dimension {dimension}")
            }
            Self::StoredZero(p) => write!(f, "explicit zero stored at position {p}"),
        }
    }
}

impl Error for SparseVectorError {}

/// Errors that can occur while learning a vocabulary.
///
/// A failed learn call never leaves a partially extended codebook behind.
#[derive(Debug)]
pub enum LearnError {
    /// A corpus, sequence or token was missing or malformed.
    InvalidArgument(String),
    /// The caller asked for a capability this model does not provide.
    UnsupportedFeature(&'static str),
    /// Tokenizer failed while splitting raw text.
    Tokenize(TokenizeError),
}

impl fmt::Display for LearnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::UnsupportedFeature(what) => write!(f, "unsupported feature: {what}"),
            Self::Tokenize(e) => write!(f, "tokenization failed: {e}"),
        }
    }
}

impl Error for LearnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tokenize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TokenizeError> for LearnError {
    fn from(e: TokenizeError) -> Self {
        Self::Tokenize(e)
    }
}

/// Errors that can occur while transforming sequences into feature vectors.
#[derive(Debug)]
pub enum TransformError {
    /// Caller-provided output buffer does not match the vocabulary size.
    LengthMismatch {
        /// Current codebook size.
        expected: usize,
        /// Length of the buffer that was passed in.
        actual: usize,
    },
    /// Tokenizer failed while splitting raw text.
    Tokenize(TokenizeError),
    /// Progress bar template string was invalid.
    ProgressBarSetup(TemplateError),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "output length mismatch: expected {expected}, got {actual}"
            ),
            Self::Tokenize(e) => write!(f, "tokenization failed: {e}"),
            Self::ProgressBarSetup(msg) => write!(f, "template parsing failed: {msg}"),
        }
    }
}

impl Error for TransformError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tokenize(e) => Some(e),
            Self::ProgressBarSetup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TokenizeError> for TransformError {
    fn from(e: TokenizeError) -> Self {
        Self::Tokenize(e)
    }
}

/// Errors that can occur when splitting raw text into tokens.
#[derive(Debug)]
pub enum TokenizeError {
    /// The regex pattern failed to compile.
    InvalidPattern(fancy_regex::Error),
    /// Regex engine failed during text splitting (e.g. backtracking limit exceeded).
    RegexMatch(String),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern(e) => write!(f, "invalid pattern: {e}"),
            Self::RegexMatch(msg) => write!(f, "regex match failed: {msg}"),
        }
    }
}

impl Error for TokenizeError {}

impl From<fancy_regex::Error> for TokenizeError {
    fn from(e: fancy_regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}

/// Errors that can occur when building or loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// `maximum_occurrence` must be at least 1.
    InvalidMaximumOccurrence(Count),
    /// `parallelism` must be at least 1 when set.
    InvalidParallelism(usize),
    /// The dedicated worker pool could not be built.
    ThreadPool(String),
    /// Configuration file could not be read.
    Io(io::Error),
    /// Configuration text is not valid JSON for this schema.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaximumOccurrence(v) => {
                write!(f, "maximum_occurrence must be positive, got {v}")
            }
            Self::InvalidParallelism(v) => write!(f, "parallelism must be positive, got {v}"),
            Self::ThreadPool(msg) => write!(f, "failed to build worker pool: {msg}"),
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Errors that can occur when saving or loading a model.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying file operation failed.
    Io(io::Error),
    /// Model JSON was malformed or inconsistent.
    Json(serde_json::Error),
    /// Persisted settings were out of range.
    Config(ConfigError),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "model i/o failed: {e}"),
            Self::Json(e) => write!(f, "invalid model json: {e}"),
            Self::Config(e) => write!(f, "invalid model settings: {e}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ConfigError> for PersistError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

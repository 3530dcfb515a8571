//! Bag-of-words feature extraction.
//!
//! A [`Codebook`] assigns every distinct token a dense integer code in
//! first-seen order. A [`BagOfWords`] model counts the tokens of a sequence
//! against that codebook, capping each count at `maximum_occurrence`, and
//! emits fixed-length vectors (dense `i32`, dense `f64` or sparse `f64`).
//! Batches are transformed in parallel with Rayon, preserving input order.
//!
//! With the `python` feature this crate also builds a PyO3 extension module.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]

mod types;

pub mod bag_of_words;
pub mod codebook;
pub mod config;
pub mod counter;
pub mod error;
pub mod features;
pub mod tokenizer;

#[cfg(feature = "python")]
mod python;

pub use bag_of_words::BagOfWords;
pub use codebook::Codebook;
pub use config::BagOfWordsConfig;
pub use counter::TokenCounts;
pub use error::{
    CodebookError, ConfigError, LearnError, PersistError, SparseVectorError, TokenizeError,
    TransformError,
};
pub use features::{FeatureShape, FeatureVector, Shape, SparseVector};
pub use tokenizer::{RegexTokenizer, Tokenizer, WhitespaceTokenizer, DEFAULT_PATTERN};
pub use types::{Code, Count};

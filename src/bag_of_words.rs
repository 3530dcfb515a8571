//! The bag-of-words model: a codebook plus the transform pipeline.
//!
//! Learning grows the codebook sequentially. Transforms only read it, so a
//! batch of sequences is counted on Rayon workers, each worker allocating
//! its own counts. `collect()` on an indexed parallel iterator preserves
//! input order, so output `i` always belongs to input `i`.
//!
//! `learn` takes `&mut self` and every transform takes `&self`: the borrow
//! checker rules out a learn racing a transform on the same model.
//!
//! A configured worker budget is backed by one Rayon pool, built when the
//! budget is set and shared by every batch call and every clone of the model.

use std::{fs, path::Path, sync::Arc};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle, style::TemplateError};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    codebook::Codebook,
    config::BagOfWordsConfig,
    counter::TokenCounts,
    error::{ConfigError, LearnError, PersistError, TokenizeError, TransformError},
    features::{FeatureShape, FeatureVector, Shape},
    tokenizer::Tokenizer,
    types::Count,
};

/// Fixed-length count features from variable-length token sequences.
///
/// # Example
///
/// ```
/// use bagofwords::BagOfWords;
///
/// let mut bow = BagOfWords::new().with_maximum_occurrence(2);
/// bow.learn([vec!["a", "b"], vec!["b", "c"]]);
///
/// let v: Vec<i32> = bow.transform(["b", "b", "b", "z"]);
/// assert_eq!(v, vec![0, 2, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BagOfWords {
    codebook: Codebook,
    config: BagOfWordsConfig,
    /// Dedicated pool for `config.parallelism`; `None` means the global pool.
    pool: Option<Arc<ThreadPool>>,
}

impl BagOfWords {
    /// Creates an unlearned model with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unlearned model with the given options.
    ///
    /// A `parallelism` budget builds the worker pool here, once.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation, or
    /// [`ConfigError::ThreadPool`] if the worker pool cannot be built.
    pub fn with_config(config: BagOfWordsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = config.parallelism.map(build_pool).transpose()?;
        Ok(Self {
            codebook: Codebook::new(),
            config,
            pool,
        })
    }

    /// Creates a model and learns `corpus` in one step.
    ///
    /// # Errors
    ///
    /// Same as [`with_config`](Self::with_config).
    pub fn from_corpus<I, S, T>(corpus: I, config: BagOfWordsConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut bow = Self::with_config(config)?;
        bow.learn(corpus);
        Ok(bow)
    }

    /// Sets the per-token saturation cap. Zero is raised to 1.
    #[must_use]
    pub fn with_maximum_occurrence(mut self, maximum_occurrence: Count) -> Self {
        self.config.maximum_occurrence = maximum_occurrence.max(1);
        self
    }

    /// Runs batch operations on a dedicated pool of `workers` threads.
    /// Zero is raised to 1.
    ///
    /// The pool is built now and reused by every later batch call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThreadPool`] if the pool cannot be built.
    pub fn with_parallelism(mut self, workers: usize) -> Result<Self, ConfigError> {
        let workers = workers.max(1);
        self.pool = Some(build_pool(workers)?);
        self.config.parallelism = Some(workers);
        Ok(self)
    }

    /// Renders a progress bar during batch operations.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.config.show_progress = show_progress;
        self
    }

    /// Current options.
    pub fn config(&self) -> &BagOfWordsConfig {
        &self.config
    }

    /// Per-token saturation cap.
    pub fn maximum_occurrence(&self) -> Count {
        self.config.maximum_occurrence
    }

    /// Read-only access to the learned vocabulary.
    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Vocabulary size, which is also the length of every produced vector.
    pub fn size(&self) -> usize {
        self.codebook.size()
    }

    /// Alias for [`size`](Self::size).
    pub fn number_of_words(&self) -> usize {
        self.size()
    }

    /// Returns `true` once at least one token has been learned.
    pub fn is_learned(&self) -> bool {
        !self.codebook.is_empty()
    }

    /// Extends the vocabulary with the unseen tokens of `corpus`.
    ///
    /// Existing codes are kept; new tokens are appended in first-seen order.
    ///
    /// # Arguments
    ///
    /// * `corpus` - Token sequences, visited in order.
    ///
    /// # Returns
    ///
    /// The model, for chaining.
    pub fn learn<I, S, T>(&mut self, corpus: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.codebook.learn(corpus);
        self
    }

    /// Learning entry point that accepts per-sample weights.
    ///
    /// Sample weighting is not part of this model, so any `Some` weights are
    /// refused before the vocabulary is touched.
    ///
    /// # Arguments
    ///
    /// * `corpus` - Token sequences, visited in order.
    /// * `weights` - Must be `None`.
    ///
    /// # Returns
    ///
    /// The model, for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::UnsupportedFeature`] if `weights` is `Some`.
    pub fn learn_weighted<I, S, T>(
        &mut self,
        corpus: I,
        weights: Option<&[f64]>,
    ) -> Result<&mut Self, LearnError>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if weights.is_some() {
            return Err(LearnError::UnsupportedFeature("sample weights"));
        }
        Ok(self.learn(corpus))
    }

    /// Tokenizes `texts` and learns the resulting corpus.
    ///
    /// Every text is tokenized before the vocabulary changes, so a failure
    /// leaves the model exactly as it was.
    ///
    /// # Arguments
    ///
    /// * `texts` - Raw texts, learned in order.
    /// * `tokenizer` - Splits each text into tokens.
    ///
    /// # Returns
    ///
    /// The model, for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::Tokenize`] if `tokenizer` fails on any text.
    pub fn learn_texts<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        tokenizer: &dyn Tokenizer,
    ) -> Result<&mut Self, LearnError> {
        let corpus = texts
            .iter()
            .map(|text| tokenizer.tokenize(text.as_ref()))
            .collect::<Result<Vec<_>, TokenizeError>>()?;
        Ok(self.learn(corpus))
    }

    /// Counts one sequence into the requested shape.
    ///
    /// Unknown tokens are skipped. The result has length [`size`](Self::size).
    pub fn transform<V, I, T>(&self, sequence: I) -> V
    where
        V: FeatureShape,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if !self.is_learned() {
            warn!("transform called on an empty codebook");
        }
        V::from_counts(self.size(), self.count(sequence))
    }

    /// Counts one sequence into a runtime-selected shape.
    pub fn transform_shape<I, T>(&self, sequence: I, shape: Shape) -> FeatureVector
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        FeatureVector::from_counts(shape, self.size(), self.count(sequence))
    }

    /// Counts one sequence into a caller-provided dense buffer.
    ///
    /// Every slot of `output` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::LengthMismatch`] unless `output.len() == size()`.
    pub fn transform_into<I, T>(&self, sequence: I, output: &mut [f64]) -> Result<(), TransformError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if output.len() != self.size() {
            return Err(TransformError::LengthMismatch {
                expected: self.size(),
                actual: output.len(),
            });
        }

        output.fill(0.0);
        for (code, count) in self.count(sequence) {
            if let Some(slot) = output.get_mut(code) {
                *slot = f64::from(count);
            }
        }
        Ok(())
    }

    /// Counts many sequences in parallel.
    ///
    /// Output `i` is the transform of `sequences[i]`, whatever order the
    /// workers finish in.
    ///
    /// # Arguments
    ///
    /// * `sequences` - Token sequences to count.
    ///
    /// # Returns
    ///
    /// One vector of length [`size`](Self::size) per input sequence, in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ProgressBarSetup`] if the progress bar
    /// template fails to compile.
    pub fn transform_many<V, S, T>(&self, sequences: &[S]) -> Result<Vec<V>, TransformError>
    where
        V: FeatureShape,
        S: AsRef<[T]> + Sync,
        T: AsRef<str>,
    {
        debug!(batch = sequences.len(), shape = %V::SHAPE, "transforming sequences");
        self.par_map(sequences, "Transforming sequences", |seq| {
            Ok(V::from_counts(self.size(), self.count(seq.as_ref())))
        })
    }

    /// Counts many sequences in parallel into a runtime-selected shape.
    ///
    /// # Arguments
    ///
    /// * `sequences` - Token sequences to count.
    /// * `shape` - Storage shape of every output vector.
    ///
    /// # Returns
    ///
    /// One tagged vector per input sequence, in input order.
    ///
    /// # Errors
    ///
    /// Same as [`transform_many`](Self::transform_many).
    pub fn transform_many_shape<S, T>(
        &self,
        sequences: &[S],
        shape: Shape,
    ) -> Result<Vec<FeatureVector>, TransformError>
    where
        S: AsRef<[T]> + Sync,
        T: AsRef<str>,
    {
        debug!(batch = sequences.len(), %shape, "transforming sequences");
        self.par_map(sequences, "Transforming sequences", |seq| {
            Ok(self.transform_shape(seq.as_ref(), shape))
        })
    }

    /// Tokenizes and counts many texts in parallel.
    ///
    /// Each text is split and counted on one worker. The first tokenizer
    /// failure aborts the batch; no partial result is returned.
    ///
    /// # Arguments
    ///
    /// * `texts` - Raw texts to count.
    /// * `tokenizer` - Splits each text into tokens.
    ///
    /// # Returns
    ///
    /// One vector per input text, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Tokenize`] if `tokenizer` fails, or the
    /// setup errors of [`transform_many`](Self::transform_many).
    pub fn transform_texts<V, S>(
        &self,
        texts: &[S],
        tokenizer: &dyn Tokenizer,
    ) -> Result<Vec<V>, TransformError>
    where
        V: FeatureShape,
        S: AsRef<str> + Sync,
    {
        debug!(batch = texts.len(), shape = %V::SHAPE, "transforming texts");
        self.par_map(texts, "Transforming texts", |text| {
            let tokens = tokenizer.tokenize(text.as_ref())?;
            Ok(V::from_counts(self.size(), self.count(&tokens)))
        })
    }

    /// Learns `corpus`, then transforms it.
    ///
    /// # Arguments
    ///
    /// * `corpus` - Token sequences to learn and then count.
    ///
    /// # Returns
    ///
    /// One vector per sequence, each of the post-learn
    /// [`size`](Self::size).
    ///
    /// # Errors
    ///
    /// Same as [`transform_many`](Self::transform_many).
    pub fn fit_transform<V, S, T>(&mut self, corpus: &[S]) -> Result<Vec<V>, TransformError>
    where
        V: FeatureShape,
        S: AsRef<[T]> + Sync,
        T: AsRef<str>,
    {
        self.learn(corpus.iter().map(|seq| seq.as_ref()));
        self.transform_many(corpus)
    }

    /// Serializes the vocabulary and saturation cap to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(&PersistedModel::from(self))?)
    }

    /// Rebuilds a model from [`to_json_string`](Self::to_json_string) output.
    ///
    /// Runtime options other than the saturation cap take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] for malformed JSON or a codebook whose
    /// codes are not dense, and [`PersistError::Config`] for a zero cap.
    pub fn from_json_str(json: &str) -> Result<Self, PersistError> {
        let persisted: PersistedModel = serde_json::from_str(json)?;
        Ok(Self::try_from(persisted)?)
    }

    /// Writes the model to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the file cannot be written.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!(path = %path.display(), size = self.size(), "saved bag-of-words model");
        Ok(())
    }

    /// Reads a model written by [`save_json`](Self::save_json).
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_json_str`](Self::from_json_str).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let bow = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), size = bow.size(), "loaded bag-of-words model");
        Ok(bow)
    }

    /// Shared counting core for every transform.
    #[inline]
    fn count<I, T>(&self, sequence: I) -> TokenCounts
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        TokenCounts::count(&self.codebook, sequence, self.config.maximum_occurrence)
    }

    /// Maps `f` over `items` on Rayon workers, preserving input order.
    ///
    /// Runs on the global pool unless a worker pool was built.
    fn par_map<S, R, F>(&self, items: &[S], msg: &str, f: F) -> Result<Vec<R>, TransformError>
    where
        S: Sync,
        R: Send,
        F: Fn(&S) -> Result<R, TransformError> + Sync + Send,
    {
        if !self.is_learned() {
            warn!(batch = items.len(), "batch transform on an empty codebook");
        }

        let pb = if self.config.show_progress {
            match progress_bar(items.len() as u64, msg) {
                Ok(pb) => pb,
                Err(te) => return Err(TransformError::ProgressBarSetup(te)),
            }
        } else {
            // create dummy progress bar and force to not render
            let pb = ProgressBar::new(items.len() as u64);
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
            pb
        };

        let run = || {
            items
                .par_iter()
                .progress_with(pb)
                .map(&f)
                .collect::<Result<Vec<R>, TransformError>>()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// On-disk form: the forward mapping and the saturation cap.
#[derive(Serialize, Deserialize)]
struct PersistedModel {
    maximum_occurrence: Count,
    codebook: Codebook,
}

impl From<&BagOfWords> for PersistedModel {
    fn from(bow: &BagOfWords) -> Self {
        Self {
            maximum_occurrence: bow.config.maximum_occurrence,
            codebook: bow.codebook.clone(),
        }
    }
}

impl TryFrom<PersistedModel> for BagOfWords {
    type Error = ConfigError;

    fn try_from(persisted: PersistedModel) -> Result<Self, Self::Error> {
        let config = BagOfWordsConfig {
            maximum_occurrence: persisted.maximum_occurrence,
            ..BagOfWordsConfig::default()
        };
        config.validate()?;
        Ok(Self {
            codebook: persisted.codebook,
            config,
            pool: None,
        })
    }
}

/// Builds the dedicated worker pool for a `workers` budget.
fn build_pool(workers: usize) -> Result<Arc<ThreadPool>, ConfigError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("bagofwords-{i}"))
        .build()
        .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;
    debug!(workers, "built worker pool");
    Ok(Arc::new(pool))
}

/// Creates a styled progress bar with elapsed time, a fixed-width message label, and position/total counters.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the progress bar style template is invalid.
fn progress_bar(size: u64, msg: impl Into<String>) -> Result<ProgressBar, TemplateError> {
    let pb = ProgressBar::new(size);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<30!} {wide_bar} {pos}/{len}")?;

    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(std::time::Duration::from_secs(1));

    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{features::SparseVector, tokenizer::WhitespaceTokenizer};

    fn learned(corpus: &[&[&str]], cap: Count) -> BagOfWords {
        let mut bow = BagOfWords::new().with_maximum_occurrence(cap);
        bow.learn(corpus.iter().copied());
        bow
    }

    #[test]
    fn test_saturation_cap() {
        let bow = learned(&[&["x"]], 2);
        let v: Vec<i32> = bow.transform(["x", "x", "x", "x"]);
        assert_eq!(v, vec![2]);
    }

    #[test]
    fn test_unknown_tokens_give_zero_vector() {
        let bow = learned(&[&["a", "b"]], 1);
        let v: Vec<f64> = bow.transform(["z"]);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_unlearned_transform_is_empty() {
        let bow = BagOfWords::new();
        let v: Vec<i32> = bow.transform(["a"]);
        assert!(v.is_empty());
        assert!(!bow.is_learned());
    }

    #[test]
    fn test_zero_cap_raised_to_one() {
        let bow = BagOfWords::new().with_maximum_occurrence(0);
        assert_eq!(bow.maximum_occurrence(), 1);
    }

    #[test]
    fn test_with_config_rejects_zero_cap() {
        let config = BagOfWordsConfig {
            maximum_occurrence: 0,
            ..BagOfWordsConfig::default()
        };
        assert!(matches!(
            BagOfWords::with_config(config),
            Err(ConfigError::InvalidMaximumOccurrence(0))
        ));
    }

    #[test]
    fn test_learn_weighted_rejects_weights_without_mutation() {
        let mut bow = learned(&[&["a"]], 1);
        let result = bow.learn_weighted([["b", "c"]], Some(&[1.0][..]));
        match result {
            Err(LearnError::UnsupportedFeature(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("weights should be rejected"),
        }
        assert_eq!(bow.size(), 1);
    }

    #[test]
    fn test_learn_weighted_accepts_none() {
        let mut bow = BagOfWords::new();
        bow.learn_weighted([["a", "b"]], None)
            .expect("unweighted learning should succeed");
        assert_eq!(bow.size(), 2);
    }

    #[test]
    fn test_transform_into_fills_buffer() {
        let bow = learned(&[&["a", "b", "c"]], 3);
        let mut out = vec![9.0; 3];
        bow.transform_into(["c", "c", "a"], &mut out)
            .expect("buffer length matches");
        assert_eq!(out, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_transform_into_length_mismatch() {
        let bow = learned(&[&["a", "b"]], 1);
        let mut out = vec![0.0; 3];
        match bow.transform_into(["a"], &mut out) {
            Err(TransformError::LengthMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (2, 3));
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_many_preserves_order() {
        let bow = learned(&[&["a", "b", "c"]], 1)
            .with_parallelism(3)
            .expect("pool should build");
        let batch = vec![vec!["c"], vec!["a"], vec!["b", "a"], vec![]];
        let out: Vec<Vec<i32>> = bow.transform_many(&batch).expect("batch should transform");
        assert_eq!(
            out,
            vec![vec![0, 0, 1], vec![1, 0, 0], vec![1, 1, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn test_worker_pool_reused_across_batches() {
        let bow = learned(&[&["a", "b"]], 2)
            .with_parallelism(2)
            .expect("pool should build");
        let pool = bow.pool.clone().expect("budget should build a pool");
        assert_eq!(pool.current_num_threads(), 2);

        let batch = vec![vec!["b", "b", "b"], vec!["a"], vec!["z"]];
        for _ in 0..5 {
            let out: Vec<Vec<i32>> = bow.transform_many(&batch).expect("batch should transform");
            assert_eq!(out, vec![vec![0, 2], vec![1, 0], vec![0, 0]]);
            let same = bow.pool.as_ref().expect("pool should persist");
            assert!(Arc::ptr_eq(same, &pool));
        }

        let copy = bow.clone();
        let shared = copy.pool.as_ref().expect("clone should keep the pool");
        assert!(Arc::ptr_eq(shared, &pool));
    }

    #[test]
    fn test_with_config_builds_pool_once() {
        let config = BagOfWordsConfig {
            parallelism: Some(3),
            ..BagOfWordsConfig::default()
        };
        let bow = BagOfWords::with_config(config).expect("config is valid");
        let pool = bow.pool.as_ref().expect("budget should build a pool");
        assert_eq!(pool.current_num_threads(), 3);
        assert!(BagOfWords::new().pool.is_none());
    }

    #[test]
    fn test_transform_many_with_progress_bar() {
        let bow = learned(&[&["a", "b", "c"]], 1).with_progress(true);
        assert!(bow.config().show_progress);
        let batch = vec![vec!["c"], vec!["a", "c"], vec![]];
        let out: Vec<Vec<i32>> = bow.transform_many(&batch).expect("batch should transform");
        assert_eq!(out, vec![vec![0, 0, 1], vec![1, 0, 1], vec![0, 0, 0]]);

        let texts: Vec<Vec<i32>> = bow
            .transform_texts(&["b a", "c"], &WhitespaceTokenizer)
            .expect("texts should transform");
        assert_eq!(texts, vec![vec![1, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_progress_bar_template_compiles() {
        let pb = progress_bar(4, "Transforming sequences").expect("template should compile");
        assert_eq!(pb.length(), Some(4));
        assert_eq!(pb.message(), "Transforming sequences");
        pb.finish_and_clear();
    }

    #[test]
    fn test_transform_many_empty_batch() {
        let bow = learned(&[&["a"]], 1);
        let batch: Vec<Vec<&str>> = Vec::new();
        let out: Vec<SparseVector> = bow.transform_many(&batch).expect("empty batch is fine");
        assert!(out.is_empty());
    }

    #[test]
    fn test_transform_many_shape_sparse() {
        let bow = learned(&[&["a", "b"]], 2);
        let batch = [vec!["b".to_string(), "b".to_string()]];
        let out = bow
            .transform_many_shape(&batch, Shape::Sparse)
            .expect("batch should transform");
        match &out[0] {
            FeatureVector::Sparse(v) => {
                assert_eq!(v.positions(), &[1]);
                assert_eq!(v.values(), &[2.0]);
            }
            other => panic!("expected sparse vector, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_texts() {
        let mut bow = BagOfWords::new();
        bow.learn_texts(&["the cat", "the dog"], &WhitespaceTokenizer)
            .expect("whitespace tokenizer never fails");
        let out: Vec<Vec<i32>> = bow
            .transform_texts(&["dog the bird", "cat"], &WhitespaceTokenizer)
            .expect("texts should transform");
        assert_eq!(out, vec![vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_fit_transform() {
        let mut bow = BagOfWords::new();
        let corpus = [vec!["a", "b"], vec!["b", "c"]];
        let out: Vec<Vec<i32>> = bow.fit_transform(&corpus).expect("fit_transform should succeed");
        assert_eq!(out, vec![vec![1, 1, 0], vec![0, 1, 1]]);
    }

    #[test]
    fn test_json_keeps_cap_and_codes() {
        let bow = learned(&[&["b", "a"]], 4);
        let json = bow.to_json_string().expect("model should serialize");
        let back = BagOfWords::from_json_str(&json).expect("model should deserialize");
        assert_eq!(back.maximum_occurrence(), 4);
        assert_eq!(back.codebook(), bow.codebook());
    }

    #[test]
    fn test_json_rejects_zero_cap() {
        let json = r#"{"maximum_occurrence":0,"codebook":{"token_to_code":{}}}"#;
        assert!(matches!(
            BagOfWords::from_json_str(json),
            Err(PersistError::Config(ConfigError::InvalidMaximumOccurrence(0)))
        ));
    }
}

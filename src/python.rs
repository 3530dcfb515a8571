//! PyO3 bindings exposing the model as `_bagofwords.BagOfWords`.

use pyo3::{
    exceptions::{PyIndexError, PyValueError},
    prelude::*,
};

use crate::{
    bag_of_words::BagOfWords,
    config::BagOfWordsConfig,
    error::LearnError,
    features::{FeatureVector, Shape},
    types::{Code, Count},
};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Rejects a `None` corpus, sequence or token before anything is learned.
fn checked_corpus(
    corpus: Option<Vec<Option<Vec<Option<String>>>>>,
) -> Result<Vec<Vec<String>>, LearnError> {
    corpus
        .ok_or_else(|| LearnError::InvalidArgument("corpus is None".to_string()))?
        .into_iter()
        .enumerate()
        .map(|(i, seq)| {
            let seq =
                seq.ok_or_else(|| LearnError::InvalidArgument(format!("sequence {i} is None")))?;
            seq.into_iter()
                .enumerate()
                .map(|(j, tok)| {
                    tok.ok_or_else(|| {
                        LearnError::InvalidArgument(format!("token {j} of sequence {i} is None"))
                    })
                })
                .collect()
        })
        .collect()
}

/// Dense vectors become lists; sparse vectors become `(dimension, positions, values)`.
fn vector_to_py(py: Python<'_>, vector: FeatureVector) -> PyObject {
    match vector {
        FeatureVector::DenseInt(v) => v.into_py(py),
        FeatureVector::DenseFloat(v) => v.into_py(py),
        FeatureVector::Sparse(v) => {
            (v.dimension(), v.positions().to_vec(), v.values().to_vec()).into_py(py)
        }
    }
}

/// Python wrapper for the bag-of-words model.
#[pyclass(name = "BagOfWords")]
pub struct PyBagOfWords {
    model: BagOfWords,
}

#[pymethods]
impl PyBagOfWords {
    #[new]
    #[pyo3(signature = (maximum_occurrence = 1, parallelism = None, show_progress = false))]
    fn new(
        maximum_occurrence: Count,
        parallelism: Option<usize>,
        show_progress: bool,
    ) -> PyResult<Self> {
        let config = BagOfWordsConfig {
            maximum_occurrence,
            parallelism,
            show_progress,
        };
        let model = BagOfWords::with_config(config).map_err(value_error)?;
        Ok(Self { model })
    }

    #[pyo3(signature = (corpus, weights = None))]
    fn learn(
        &mut self,
        corpus: Option<Vec<Option<Vec<Option<String>>>>>,
        weights: Option<Vec<f64>>,
    ) -> PyResult<()> {
        let corpus = checked_corpus(corpus).map_err(value_error)?;
        self.model
            .learn_weighted(corpus, weights.as_deref())
            .map_err(value_error)?;
        Ok(())
    }

    #[pyo3(signature = (tokens, shape = "dense_float"))]
    fn transform(&self, py: Python<'_>, tokens: Vec<String>, shape: &str) -> PyResult<PyObject> {
        let shape: Shape = shape.parse().map_err(PyValueError::new_err)?;
        Ok(vector_to_py(py, self.model.transform_shape(&tokens, shape)))
    }

    #[pyo3(signature = (sequences, shape = "dense_float"))]
    fn transform_many(
        &self,
        py: Python<'_>,
        sequences: Vec<Vec<String>>,
        shape: &str,
    ) -> PyResult<Vec<PyObject>> {
        let shape: Shape = shape.parse().map_err(PyValueError::new_err)?;
        let vectors = py
            .allow_threads(|| self.model.transform_many_shape(&sequences, shape))
            .map_err(value_error)?;
        Ok(vectors.into_iter().map(|v| vector_to_py(py, v)).collect())
    }

    fn size(&self) -> usize {
        self.model.size()
    }

    #[getter]
    fn maximum_occurrence(&self) -> Count {
        self.model.maximum_occurrence()
    }

    fn code_of(&self, token: &str) -> Option<Code> {
        self.model.codebook().code_of(token)
    }

    fn token_of(&self, code: Code) -> PyResult<String> {
        self.model
            .codebook()
            .token_of(code)
            .map(str::to_owned)
            .map_err(|e| PyIndexError::new_err(e.to_string()))
    }

    /// Tokens in code order.
    fn vocabulary(&self) -> Vec<String> {
        self.model.codebook().code_to_token().to_vec()
    }

    fn save(&self, path: &str) -> PyResult<()> {
        self.model.save_json(path).map_err(value_error)
    }

    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        let model = BagOfWords::load_json(path).map_err(value_error)?;
        Ok(Self { model })
    }
}

#[pymodule]
fn _bagofwords(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBagOfWords>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_corpus_rejects_none_token() {
        let corpus = Some(vec![Some(vec![Some("a".to_string()), None])]);
        match checked_corpus(corpus) {
            Err(LearnError::InvalidArgument(msg)) => assert!(msg.contains("token 1")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_corpus_rejects_none_sequence() {
        let corpus = Some(vec![Some(vec![]), None]);
        assert!(matches!(
            checked_corpus(corpus),
            Err(LearnError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_checked_corpus_rejects_missing_corpus() {
        match checked_corpus(None) {
            Err(e @ LearnError::InvalidArgument(_)) => {
                assert_eq!(e.to_string(), "invalid argument: corpus is None");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_corpus_keeps_valid_corpus() {
        let corpus = Some(vec![Some(vec![Some("a".to_string()), Some("b".to_string())])]);
        let checked = checked_corpus(corpus).expect("corpus without None should pass");
        assert_eq!(checked, vec![vec!["a".to_string(), "b".to_string()]]);
    }
}

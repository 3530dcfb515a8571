//! Feature vector representations produced by a transform.
//!
//! Three storage shapes carry the same logical count vector:
//! dense `i32`, dense `f64`, and sparse `f64`. All of them are built from
//! [`TokenCounts`], so counting semantics cannot drift between shapes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    counter::TokenCounts,
    error::SparseVectorError,
    types::Code,
};

/// A vector that only stores non-zero values.
///
/// `dimension` is the logical length; positions not stored are zero.
/// Positions are kept strictly increasing and below `dimension`, and no
/// stored value is zero. Deserialization checks the same layout, so a
/// decoded vector always agrees between [`get`](Self::get) and
/// [`to_dense`](Self::to_dense).
///
/// # Example
///
/// ```
/// use bagofwords::SparseVector;
///
/// let sparse = SparseVector::from_dense(&[0.0, 2.0, 0.0, 1.0]);
/// assert_eq!(sparse.dimension(), 4);
/// assert_eq!(sparse.nnz(), 2);
/// assert_eq!(sparse.get(1), 2.0);
/// assert_eq!(sparse.get(0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseVectorRepr")]
pub struct SparseVector {
    dimension: usize,
    positions: Vec<Code>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Creates an all-zero sparse vector of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            positions: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a sparse vector from parallel position/value arrays,
    /// normalizing whatever it is given.
    ///
    /// The arrays are zipped, so when their lengths differ the surplus
    /// entries of the longer one are ignored. Zeros and positions outside
    /// `dimension` are dropped, and the rest is sorted by position. For
    /// repeated positions the last value wins.
    ///
    /// Use [`try_from_parts`](Self::try_from_parts) to reject such input
    /// instead.
    pub fn from_parts(dimension: usize, positions: Vec<Code>, values: Vec<f64>) -> Self {
        let mut pairs: Vec<(Code, f64)> = positions
            .into_iter()
            .zip(values)
            .filter(|&(p, v)| p < dimension && v != 0.0)
            .collect();

        // stable sort keeps insertion order among equal positions
        pairs.sort_by_key(|&(p, _)| p);
        let mut deduped: Vec<(Code, f64)> = Vec::with_capacity(pairs.len());
        for (p, v) in pairs {
            match deduped.last_mut() {
                Some(last) if last.0 == p => last.1 = v,
                _ => deduped.push((p, v)),
            }
        }

        let (positions, values) = deduped.into_iter().unzip();
        Self {
            dimension,
            positions,
            values,
        }
    }

    /// Creates a sparse vector from parallel arrays that already satisfy the
    /// sparse layout.
    ///
    /// # Arguments
    ///
    /// * `dimension` - Logical length of the vector.
    /// * `positions` - Strictly increasing positions, each below `dimension`.
    /// * `values` - Non-zero values, one per position.
    ///
    /// # Errors
    ///
    /// Returns [`SparseVectorError`] on a length mismatch, an unsorted or
    /// repeated position, a position outside `dimension`, or a stored zero.
    pub fn try_from_parts(
        dimension: usize,
        positions: Vec<Code>,
        values: Vec<f64>,
    ) -> Result<Self, SparseVectorError> {
        if positions.len() != values.len() {
            return Err(SparseVectorError::LengthMismatch {
                positions: positions.len(),
                values: values.len(),
            });
        }

        let mut previous: Option<Code> = None;
        for (&position, &value) in positions.iter().zip(&values) {
            if position >= dimension {
                return Err(SparseVectorError::OutOfRange {
                    position,
                    dimension,
                });
            }
            if previous.is_some_and(|p| p >= position) {
                return Err(SparseVectorError::Unsorted(position));
            }
            if value == 0.0 {
                return Err(SparseVectorError::StoredZero(position));
            }
            previous = Some(position);
        }

        Ok(Self {
            dimension,
            positions,
            values,
        })
    }

    /// Creates a sparse vector from a dense slice, storing only non-zeros.
    pub fn from_dense(dense: &[f64]) -> Self {
        let (positions, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .unzip();

        Self {
            dimension: dense.len(),
            positions,
            values,
        }
    }

    /// Logical length of the vector.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored non-zero values.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Value at `index`; 0.0 if nothing is stored there.
    pub fn get(&self, index: usize) -> f64 {
        match self.positions.binary_search(&index) {
            Ok(i) => self.values.get(i).copied().unwrap_or(0.0),
            Err(_) => 0.0,
        }
    }

    /// Stored positions, ascending.
    pub fn positions(&self) -> &[Code] {
        &self.positions
    }

    /// Stored values, parallel to [`positions`](Self::positions).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates stored `(position, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Code, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Expands to a dense vector of length `dimension`.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (pos, val) in self.iter() {
            if let Some(slot) = dense.get_mut(pos) {
                *slot = val;
            }
        }
        dense
    }
}

/// Wire form of [`SparseVector`], checked before it becomes one.
#[derive(Deserialize)]
struct SparseVectorRepr {
    dimension: usize,
    positions: Vec<Code>,
    values: Vec<f64>,
}

impl TryFrom<SparseVectorRepr> for SparseVector {
    type Error = SparseVectorError;

    fn try_from(repr: SparseVectorRepr) -> Result<Self, Self::Error> {
        Self::try_from_parts(repr.dimension, repr.positions, repr.values)
    }
}

/// Storage shape a transform can produce.
///
/// Implemented for `Vec<i32>`, `Vec<f64>` and [`SparseVector`].
pub trait FeatureShape: Sized + Send {
    /// Tag naming this shape.
    const SHAPE: Shape;

    /// Builds a vector of logical length `dimension` from saturated counts.
    ///
    /// Every code in `counts` is below `dimension`.
    fn from_counts(dimension: usize, counts: TokenCounts) -> Self;
}

impl FeatureShape for Vec<i32> {
    const SHAPE: Shape = Shape::DenseInt;

    fn from_counts(dimension: usize, counts: TokenCounts) -> Self {
        let mut dense = vec![0; dimension];
        for (code, count) in counts {
            if let Some(slot) = dense.get_mut(code) {
                *slot = i32::try_from(count).unwrap_or(i32::MAX);
            }
        }
        dense
    }
}

impl FeatureShape for Vec<f64> {
    const SHAPE: Shape = Shape::DenseFloat;

    fn from_counts(dimension: usize, counts: TokenCounts) -> Self {
        let mut dense = vec![0.0; dimension];
        for (code, count) in counts {
            if let Some(slot) = dense.get_mut(code) {
                *slot = f64::from(count);
            }
        }
        dense
    }
}

impl FeatureShape for SparseVector {
    const SHAPE: Shape = Shape::Sparse;

    fn from_counts(dimension: usize, counts: TokenCounts) -> Self {
        // counts iterate in ascending code order with non-zero values,
        // which is already the sparse invariant
        let (positions, values) = counts
            .into_iter()
            .filter(|&(code, _)| code < dimension)
            .map(|(code, count)| (code, f64::from(count)))
            .unzip();

        Self {
            dimension,
            positions,
            values,
        }
    }
}

/// Output shape tag for runtime-selected transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Dense `i32` counts.
    DenseInt,
    /// Dense `f64` counts.
    DenseFloat,
    /// Sparse `f64` counts.
    Sparse,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DenseInt => "dense_int",
            Self::DenseFloat => "dense_float",
            Self::Sparse => "sparse",
        };
        f.write_str(name)
    }
}

impl FromStr for Shape {
    type Err = String;

    /// Parses "dense_int", "dense_float" or "sparse".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense_int" => Ok(Self::DenseInt),
            "dense_float" => Ok(Self::DenseFloat),
            "sparse" => Ok(Self::Sparse),
            _ => Err(format!(
                "invalid shape: {s:?} (expected \"dense_int\", \"dense_float\" or \"sparse\")"
            )),
        }
    }
}

/// A feature vector in any of the supported shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureVector {
    /// Dense `i32` counts.
    DenseInt(Vec<i32>),
    /// Dense `f64` counts.
    DenseFloat(Vec<f64>),
    /// Sparse `f64` counts.
    Sparse(SparseVector),
}

impl FeatureVector {
    /// Builds the requested shape from saturated counts.
    pub fn from_counts(shape: Shape, dimension: usize, counts: TokenCounts) -> Self {
        match shape {
            Shape::DenseInt => Self::DenseInt(FeatureShape::from_counts(dimension, counts)),
            Shape::DenseFloat => Self::DenseFloat(FeatureShape::from_counts(dimension, counts)),
            Shape::Sparse => Self::Sparse(FeatureShape::from_counts(dimension, counts)),
        }
    }

    /// Shape of this vector.
    pub fn shape(&self) -> Shape {
        match self {
            Self::DenseInt(_) => Shape::DenseInt,
            Self::DenseFloat(_) => Shape::DenseFloat,
            Self::Sparse(_) => Shape::Sparse,
        }
    }

    /// Logical length, equal to the codebook size at transform time.
    pub fn len(&self) -> usize {
        match self {
            Self::DenseInt(v) => v.len(),
            Self::DenseFloat(v) => v.len(),
            Self::Sparse(v) => v.dimension(),
        }
    }

    /// Returns `true` for a zero-length vector.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index` as `f64`, 0.0 when out of range.
    pub fn get(&self, index: usize) -> f64 {
        match self {
            Self::DenseInt(v) => v.get(index).map_or(0.0, |&c| f64::from(c)),
            Self::DenseFloat(v) => v.get(index).copied().unwrap_or(0.0),
            Self::Sparse(v) => v.get(index),
        }
    }

    /// Expands any shape to dense `f64` for comparison or downstream use.
    pub fn to_dense(&self) -> Vec<f64> {
        match self {
            Self::DenseInt(v) => v.iter().map(|&c| f64::from(c)).collect(),
            Self::DenseFloat(v) => v.clone(),
            Self::Sparse(v) => v.to_dense(),
        }
    }
}

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::Float;
use crate::error::{Error, Result};

/// Value-counted observation matrix
///
/// A matrix of nominal observations with dimensionality (nsamples, nfeatures). Every feature `j`
/// carries an arity `value_counts[j]` and all observed values of the feature lie in
/// `[0, value_counts[j])`. The arities are fixed at construction and validated against every
/// cell of the matrix, so downstream estimators can index their count tables without further
/// checks.
///
/// The per-feature offsets into a flattened value axis are precomputed, the value `v` of feature
/// `j` is stored at `offset(j) + v` in every table sized by [`nvalues`](Self::nvalues).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCountedMatrix {
    values: Array2<usize>,
    value_counts: Array1<usize>,
    offsets: Array1<usize>,
}

impl ValueCountedMatrix {
    /// Create a new matrix from observations and per-feature arities
    ///
    /// # Errors
    ///
    /// * `ValueCountMismatch` if the number of arities differs from the number of columns
    /// * `ZeroArity` if a feature declares no admissible value
    /// * `RecordOutOfRange` if a cell is not smaller than the arity of its column
    pub fn new(values: Array2<usize>, value_counts: Array1<usize>) -> Result<Self> {
        if value_counts.len() != values.ncols() {
            return Err(Error::ValueCountMismatch {
                expected: values.ncols(),
                found: value_counts.len(),
            });
        }

        if let Some(feature) = value_counts.iter().position(|&arity| arity == 0) {
            return Err(Error::ZeroArity { feature });
        }

        for (row, observation) in values.outer_iter().enumerate() {
            for (feature, (&value, &arity)) in observation.iter().zip(value_counts.iter()).enumerate() {
                if value >= arity {
                    return Err(Error::RecordOutOfRange {
                        row,
                        feature,
                        value,
                        arity,
                    });
                }
            }
        }

        Ok(Self::from_parts(values, value_counts))
    }

    /// Create a matrix of binary features, every column has an arity of two
    pub fn binary(values: Array2<usize>) -> Result<Self> {
        let value_counts = Array1::from_elem(values.ncols(), 2);

        Self::new(values, value_counts)
    }

    /// Create a matrix whose arities are inferred from the largest value of every column
    ///
    /// The arity of a column is its maximum plus one, but never less than two. Empty matrices get
    /// an arity of two for every column.
    pub fn with_inferred_arity(values: Array2<usize>) -> Self {
        let value_counts = values
            .axis_iter(Axis(1))
            .map(|column| column.iter().max().map(|max| max + 1).unwrap_or(0).max(2))
            .collect::<Array1<_>>();

        Self::from_parts(values, value_counts)
    }

    /// Binarize a continuous matrix
    ///
    /// Every value greater than or equal to `threshold` maps to `1`, everything else to `0`.
    pub fn binarize<F: Float, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>, threshold: F) -> Self {
        let values = x.mapv(|v| if v >= threshold { 1 } else { 0 });
        let value_counts = Array1::from_elem(values.ncols(), 2);

        Self::from_parts(values, value_counts)
    }

    fn from_parts(values: Array2<usize>, value_counts: Array1<usize>) -> Self {
        let mut offsets = Array1::zeros(value_counts.len());
        let mut acc = 0;
        for (offset, arity) in offsets.iter_mut().zip(value_counts.iter()) {
            *offset = acc;
            acc += arity;
        }

        ValueCountedMatrix {
            values,
            value_counts,
            offsets,
        }
    }

    /// Observations with dimensionality (nsamples, nfeatures)
    pub fn values(&self) -> ArrayView2<usize> {
        self.values.view()
    }

    /// A single observation
    pub fn row(&self, index: usize) -> ArrayView1<usize> {
        self.values.row(index)
    }

    /// Arity of every feature
    pub fn value_counts(&self) -> ArrayView1<usize> {
        self.value_counts.view()
    }

    /// Arity of a single feature
    pub fn arity(&self, feature: usize) -> Result<usize> {
        self.value_counts
            .get(feature)
            .copied()
            .ok_or(Error::FeatureOutOfRange {
                feature,
                nfeatures: self.value_counts.len(),
            })
    }

    /// Start of every feature in the flattened value axis
    pub fn offsets(&self) -> ArrayView1<usize> {
        self.offsets.view()
    }

    pub fn offset(&self, feature: usize) -> Result<usize> {
        self.offsets
            .get(feature)
            .copied()
            .ok_or(Error::FeatureOutOfRange {
                feature,
                nfeatures: self.offsets.len(),
            })
    }

    /// Length of the flattened value axis, the sum of all arities
    pub fn nvalues(&self) -> usize {
        self.value_counts.sum()
    }

    /// Whether every feature is binary
    pub fn is_binary(&self) -> bool {
        self.value_counts.iter().all(|&arity| arity == 2)
    }

    /// Validate a single observation against the arities of this matrix
    pub fn check_observation<D: Data<Elem = usize>>(&self, x: &ArrayBase<D, Ix1>) -> Result<()> {
        if x.len() != self.value_counts.len() {
            return Err(Error::FeatureMismatch {
                expected: self.value_counts.len(),
                found: x.len(),
            });
        }

        match x
            .iter()
            .zip(self.value_counts.iter())
            .position(|(value, arity)| value >= arity)
        {
            Some(feature) => Err(Error::ValueOutOfRange {
                feature,
                value: x[feature],
                arity: self.value_counts[feature],
            }),
            None => Ok(()),
        }
    }

    /// Select a subset of rows, keeping the arities
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        ValueCountedMatrix {
            values: self.values.select(Axis(0), indices),
            value_counts: self.value_counts.clone(),
            offsets: self.offsets.clone(),
        }
    }
}

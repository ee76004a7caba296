//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::error::{Error, Result};

mod impl_dataset;
mod impl_records;
mod impl_targets;

mod iter;
mod value_counted;

pub use iter::FoldRanges;
pub use value_counted::ValueCountedMatrix;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Probabilities and posterior scores of the
/// nominal classifiers are expressed in this type.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets as well as descriptive names. In order to keep the type complexity low
/// the dataset base is only generic over the records and targets and introduces a trait bound on
/// the records. Names are always assumed to be owned and are never used in computations.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a two-dimensional matrix with dimensionality (nsamples, ntargets), every column
/// is an independent label column
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
/// * `target_names`: optional descriptive names of the label columns with dimensionality (ntargets)
/// * `class_names`: optional class names for every label column
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
    target_names: Vec<String>,
    class_names: Vec<Vec<String>>,
}

/// Dataset
///
/// The dataset used by all nominal estimators. It contains a value-counted observation matrix and
/// one or more label columns stored as an `Array2`.
pub type Dataset = DatasetBase<ValueCountedMatrix, Array2<usize>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to single or multiple target variables
pub trait AsTargets {
    type Elem;

    /// Returns a view on targets as two-dimensional array
    fn as_multi_targets(&self) -> ArrayView2<Self::Elem>;

    /// Number of label columns
    fn ntargets(&self) -> usize {
        self.as_multi_targets().len_of(Axis(1))
    }

    /// Convert to single target, fails for more than one target
    ///
    /// # Returns
    ///
    /// May return a single target with the same label type, but returns an
    /// `Error::MultipleTargets` in case that there are more than a single target.
    fn try_single_target(&self) -> Result<ArrayView1<Self::Elem>> {
        let multi_targets = self.as_multi_targets();

        if multi_targets.len_of(Axis(1)) > 1 {
            return Err(Error::MultipleTargets);
        }

        Ok(multi_targets.index_axis_move(Axis(1), 0))
    }
}

/// Conversion of label vectors and matrices into the two-dimensional target layout of a
/// [`Dataset`]
pub trait IntoTargets {
    fn into_targets(self) -> Array2<usize>;
}

//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use std::error::Error;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. The
/// concept may keep borrowing the dataset for the lifetime `'a`, which allows it to be retrained
/// on a different selection of rows later on, for example during cross-validation.
pub trait Fit<'a, R: Records, T, E: Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &'a DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// This trait assumes the `Fit` trait was used to fit the model. The output type is generic, for
/// nominal models it is usually a `Result` because an observation may violate the arity of the
/// matrix the model was fitted on.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

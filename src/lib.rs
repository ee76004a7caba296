//! `tally` provides the building blocks for classifiers over nominal data.
//!
//! Nominal observations are small non-negative integers, one per feature, where every feature
//! `j` only takes values in `[0, arity_j)`. Such a matrix together with its per-feature arities
//! is a [`ValueCountedMatrix`](dataset::ValueCountedMatrix). Labelled matrices are wrapped in a
//! [`Dataset`], which may carry several label columns (targets) at once, plus optional feature,
//! target and class names for display.
//!
//! ## What lives where
//!
//! * [`dataset`]: records, targets and contiguous fold partitioning for cross-validation
//! * [`traits`]: the `Fit` and `Predict` traits implemented by the estimators
//! * [`ParamGuard`]: checked and unchecked hyper-parameter sets
//! * [`metrics`]: a confusion matrix to score classifiers
//!
//! The estimators themselves live in companion crates, `tally-bayes` implements categorical and
//! Bernoulli Naive Bayes as well as a multi-label ensemble on top of this crate.
//!
//! ```rust
//! use tally::prelude::*;
//! use ndarray::array;
//!
//! let records = ValueCountedMatrix::new(array![[0, 2], [1, 0], [1, 1]], array![2, 3])?;
//! let dataset = Dataset::new(records, array![[0usize], [1], [1]])?
//!     .with_feature_names(vec!["colour", "size"])
//!     .with_class_names(vec!["small", "large"]);
//!
//! assert_eq!(dataset.nsamples(), 3);
//! assert_eq!(dataset.nclasses(0)?, 2);
//! # Result::Ok(())
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, Float, ValueCountedMatrix};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};
}

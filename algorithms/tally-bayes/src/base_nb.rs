use ndarray::{Array1, ArrayView1};
use ndarray_stats::QuantileExt;
use std::ops::Range;

use crate::error::Result;
use tally::{Dataset, Float};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Outcome of classifying a single observation
///
/// `target` is the label column the answer refers to, `class` the index of the winning class
/// within that column and `score` its unnormalized posterior.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<F> {
    pub target: usize,
    pub class: usize,
    pub name: String,
    pub score: F,
}

/// Capabilities shared by every Naive Bayes model
///
/// A model borrows the dataset it was constructed on and can be retrained on any selection of
/// its rows, which is all the ensemble and cross-validation rely on.
pub trait NaiveBayes<'a, F: Float> {
    /// The dataset the model is estimated on
    fn dataset(&self) -> &'a Dataset;

    /// Estimate the model from every row for which `rows(i)` holds
    ///
    /// Training always starts from zeroed counts, previous estimates are replaced in full.
    fn train(&mut self, rows: &dyn Fn(usize) -> bool) -> Result<()>;

    /// Estimate the model from all rows
    fn train_all(&mut self) -> Result<()> {
        self.train(&|_| true)
    }

    /// Zero all counts and mark the model as untrained
    fn reset(&mut self);

    /// Classify a single observation
    fn classify(&self, observation: ArrayView1<usize>) -> Result<Classification<F>>;
}

/// Index of the largest score, the first maximum wins ties
pub(crate) fn argmax<F: Float>(scores: &Array1<F>) -> Result<usize> {
    Ok(scores.argmax()?)
}

/// Row selection excluding a contiguous range
pub fn excluding(range: Range<usize>) -> impl Fn(usize) -> bool {
    move |row| !range.contains(&row)
}

/// Normalize scores to sum to one, all-zero scores become uniform
pub(crate) fn normalize<F: Float>(scores: Array1<F>) -> Array1<F> {
    let sum = scores.sum();

    if sum > F::zero() {
        scores / sum
    } else {
        let n = scores.len();
        Array1::from_elem(n, F::one() / F::cast(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn ties_go_to_the_lowest_index() -> Result<()> {
        assert_eq!(argmax(&array![0.1, 0.4, 0.4, 0.2])?, 1);
        assert_eq!(argmax(&array![0.0f32, 0.0])?, 0);
        assert!(argmax::<f64>(&Array1::zeros(0)).is_err());

        Ok(())
    }

    #[test]
    fn excluding_a_fold() {
        let rows = excluding(2..4);
        let selected = (0..6).filter(|&row| rows(row)).collect::<Vec<_>>();

        assert_eq!(selected, vec![0, 1, 4, 5]);
    }

    #[test]
    fn normalized_scores() {
        assert_abs_diff_eq!(normalize(array![1.0, 3.0]), array![0.25, 0.75]);
        assert_abs_diff_eq!(normalize(array![0.0, 0.0, 0.0]), array![1. / 3., 1. / 3., 1. / 3.]);
    }
}

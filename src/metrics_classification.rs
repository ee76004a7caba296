//! Common metrics for performance evaluation of classifiers
//!
//! Scoring is essential for classification tasks. This module implements a confusion matrix over
//! class indices, from which accuracy, precision, recall, f1-score and the Matthews correlation
//! coefficient are derived.
use std::fmt;

use ndarray::prelude::*;
use ndarray::{Data, s};

use crate::error::{Error, Result};

/// Confusion matrix for multi-class evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to predicted classes
/// and columns to the ground truth. The diagonal entries are correct predictions.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

fn ratio(a: usize, b: usize) -> f32 {
    if b == 0 {
        0.0
    } else {
        a as f32 / b as f32
    }
}

impl ConfusionMatrix {
    /// Create an empty confusion matrix for `nclasses` classes
    pub fn with_classes(nclasses: usize) -> Self {
        ConfusionMatrix {
            matrix: Array2::zeros((nclasses, nclasses)),
        }
    }

    fn grow(&mut self, nclasses: usize) {
        if nclasses > self.nclasses() {
            let n = self.nclasses();
            let mut matrix = Array2::zeros((nclasses, nclasses));
            matrix.slice_mut(s![..n, ..n]).assign(&self.matrix);
            self.matrix = matrix;
        }
    }

    /// Record a single prediction, the matrix grows if a class was not seen before
    pub fn add(&mut self, predicted: usize, ground_truth: usize) {
        self.grow(predicted.max(ground_truth) + 1);
        self.matrix[(predicted, ground_truth)] += 1;
    }

    /// Combine the counts of two confusion matrices
    pub fn merge(mut self, other: &ConfusionMatrix) -> Self {
        self.grow(other.nclasses());
        let n = other.nclasses();
        let mut block = self.matrix.slice_mut(s![..n, ..n]);
        block += &other.matrix;

        self
    }

    /// Number of classes covered by the matrix
    pub fn nclasses(&self) -> usize {
        self.matrix.nrows()
    }

    /// Raw counts, rows are predicted classes and columns the ground truth
    pub fn counts(&self) -> ArrayView2<usize> {
        self.matrix.view()
    }

    /// Number of recorded predictions
    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    /// Number of correct predictions
    pub fn correct(&self) -> usize {
        self.matrix.diag().sum()
    }

    /// Calculate precision for every class
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| ratio(*a, *b))
            .collect()
    }

    /// Calculate recall for every class
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| ratio(*a, *b))
            .collect()
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f32 {
        ratio(self.correct(), self.total())
    }

    /// Return beta score for every class
    pub fn f_score(&self, beta: f32) -> Array1<f32> {
        let sb = beta * beta;
        let precision = self.precision();
        let recall = self.recall();

        precision
            .iter()
            .zip(recall.iter())
            .map(|(p, r)| {
                let denom = sb * p + r;
                if denom == 0.0 {
                    0.0
                } else {
                    (1.0 + sb) * (p * r) / denom
                }
            })
            .collect()
    }

    /// Return beta=1 score for every class
    pub fn f1_score(&self) -> Array1<f32> {
        self.f_score(1.0)
    }

    /// Return the Matthew Correlation Coefficients
    ///
    /// Estimates the normalized cross-correlation between target and predicted variable
    pub fn mcc(&self) -> f32 {
        let n = self.nclasses();

        let mut cov_xy = 0.0;
        for k in 0..n {
            for l in 0..n {
                for m in 0..n {
                    cov_xy += self.matrix[(k, k)] as f32 * self.matrix[(l, m)] as f32;
                    cov_xy -= self.matrix[(k, l)] as f32 * self.matrix[(m, k)] as f32;
                }
            }
        }

        let sum = self.matrix.sum();
        let sum_over_cols = self.matrix.sum_axis(Axis(0));
        let sum_over_rows = self.matrix.sum_axis(Axis(1));

        let mut cov_xx: f32 = 0.0;
        let mut cov_yy: f32 = 0.0;
        for k in 0..n {
            cov_xx += (sum_over_rows[k] * (sum - sum_over_rows[k])) as f32;
            cov_yy += (sum_over_cols[k] * (sum - sum_over_cols[k])) as f32;
        }

        if cov_xx == 0.0 || cov_yy == 0.0 {
            return 0.0;
        }

        cov_xy / cov_xx.sqrt() / cov_yy.sqrt()
    }
}

/// Print a confusion matrix
impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.nclasses();
        let width = self.matrix.iter().max().map(|x| x.to_string().len()).unwrap_or(1);

        let rule = "-".repeat(len * (width + 3) + 1);
        writeln!(f, "{}", rule)?;

        for i in 0..len {
            write!(f, "| ")?;

            for j in 0..len {
                write!(f, "{:>width$} | ", self.matrix[(i, j)], width = width)?;
            }
            writeln!(f)?;
        }

        write!(f, "{}", rule)
    }
}

/// Confusion matrix of predicted class indices against ground truth
pub trait ToConfusionMatrix<D: Data<Elem = usize>> {
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<ConfusionMatrix>;
}

impl<C: Data<Elem = usize>, D: Data<Elem = usize>> ToConfusionMatrix<D> for ArrayBase<C, Ix1> {
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<ConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(format!(
                "{} predictions against {} ground truth labels",
                self.len(),
                ground_truth.len()
            )));
        }

        let nclasses = self
            .iter()
            .chain(ground_truth.iter())
            .max()
            .map(|x| x + 1)
            .unwrap_or(0);

        let mut cm = ConfusionMatrix::with_classes(nclasses);
        for (predicted, truth) in self.iter().zip(ground_truth.iter()) {
            cm.add(*predicted, *truth);
        }

        Ok(cm)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfusionMatrix, ToConfusionMatrix};
    use crate::error::Result;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, ArrayView1};

    #[test]
    fn test_confusion_matrix() -> Result<()> {
        let predicted = ArrayView1::from(&[0usize, 1, 0, 1, 0, 1]);
        let ground_truth = ArrayView1::from(&[1usize, 1, 0, 1, 0, 1]);

        let cm = predicted.confusion_matrix(&ground_truth)?;

        assert_eq!(cm.counts(), array![[2, 1], [0, 3]]);
        assert_eq!(cm.correct(), 5);
        assert_eq!(cm.total(), 6);

        Ok(())
    }

    #[test]
    fn test_cm_metrices() -> Result<()> {
        let predicted = Array1::from(vec![0usize, 1, 0, 1, 0, 1]);
        let ground_truth = Array1::from(vec![1usize, 1, 0, 1, 0, 1]);

        let x = predicted.confusion_matrix(&ground_truth)?;

        assert_abs_diff_eq!(x.accuracy(), 5.0 / 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            x.mcc(),
            (2. * 3. - 1. * 0.) / (2.0f32 * 3. * 3. * 4.).sqrt(),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(x.precision(), array![2.0f32 / 3.0, 1.0], epsilon = 1e-6);
        assert_abs_diff_eq!(x.recall(), array![1.0f32, 3.0 / 4.0], epsilon = 1e-6);
        assert_abs_diff_eq!(x.f1_score(), array![4.0f32 / 5.0, 6.0 / 7.0], epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn mismatched_lengths_fail() {
        let predicted = array![0usize, 1];
        let ground_truth = array![0usize, 1, 1];

        assert!(predicted.confusion_matrix(&ground_truth).is_err());
    }

    #[test]
    fn grows_and_merges() {
        let mut a = ConfusionMatrix::with_classes(2);
        a.add(0, 0);
        a.add(2, 1);

        let mut b = ConfusionMatrix::with_classes(1);
        b.add(0, 0);
        b.add(0, 0);

        let merged = a.merge(&b);
        assert_eq!(merged.nclasses(), 3);
        assert_eq!(merged.counts()[(0, 0)], 3);
        assert_eq!(merged.counts()[(2, 1)], 1);
        assert_eq!(merged.total(), 4);
    }

    #[test]
    fn empty_matrix_scores_zero() {
        let cm = ConfusionMatrix::with_classes(2);

        assert_eq!(cm.accuracy(), 0.0);
        assert_eq!(cm.mcc(), 0.0);
        assert_eq!(cm.precision(), array![0.0f32, 0.0]);
        println!("{:?}", cm);
    }
}

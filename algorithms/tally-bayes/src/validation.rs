//! Contiguous k-fold cross-validation
//!
//! The rows of a dataset are split into `k` contiguous folds. Every fold is classified by a model
//! trained on the remaining rows. A prediction counts as correct when the predicted class matches
//! the label of the row in the label column the prediction refers to.
use log::trace;
use rayon::prelude::*;
use std::ops::Range;

use crate::base_nb::{excluding, NaiveBayes};
use crate::error::Result;
use tally::metrics::ConfusionMatrix;
use tally::{Dataset, Float};

/// Number of folds used when none is given
pub const DEFAULT_FOLDS: usize = 10;

/// Result of evaluating a single fold
#[derive(Debug, Clone, PartialEq)]
pub struct FoldScore {
    /// Rows held out for testing
    pub test: Range<usize>,
    pub correct: usize,
    pub total: usize,
}

impl FoldScore {
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

/// Outcome of a cross-validation run
#[derive(Debug, Clone)]
pub struct CrossValidation {
    pub folds: Vec<FoldScore>,
    /// One confusion matrix per label column, over all folds
    ///
    /// A prediction is recorded in the matrix of the label column it refers to, so class indices
    /// of different columns never share a matrix.
    pub confusion: Vec<ConfusionMatrix>,
}

impl CrossValidation {
    /// Fraction of correctly classified rows over all folds
    pub fn accuracy(&self) -> f32 {
        let correct = self.correct();
        let total = self.total();

        if total == 0 {
            0.0
        } else {
            correct as f32 / total as f32
        }
    }

    pub fn correct(&self) -> usize {
        self.folds.iter().map(|fold| fold.correct).sum()
    }

    pub fn total(&self) -> usize {
        self.folds.iter().map(|fold| fold.total).sum()
    }

    pub fn fold_accuracies(&self) -> Vec<f32> {
        self.folds.iter().map(FoldScore::accuracy).collect()
    }

    /// Confusion matrix of a single label column
    pub fn confusion(&self, target: usize) -> Option<&ConfusionMatrix> {
        self.confusion.get(target)
    }
}

/// Train on the complement of a fold and score its rows
fn evaluate_fold<'a, F: Float, C: NaiveBayes<'a, F>>(
    classifier: &mut C,
    test: Range<usize>,
) -> Result<(FoldScore, Vec<ConfusionMatrix>)> {
    let dataset = classifier.dataset();
    let records = dataset.records();
    let targets = dataset.targets();

    classifier.train(&excluding(test.clone()))?;

    let mut confusion = vec![ConfusionMatrix::with_classes(0); targets.ncols()];
    let mut correct = 0;
    for row in test.clone() {
        let predicted = classifier.classify(records.row(row))?;
        let truth = targets[(row, predicted.target)];

        confusion[predicted.target].add(predicted.class, truth);
        if predicted.class == truth {
            correct += 1;
        }
    }

    let score = FoldScore {
        total: test.len(),
        test,
        correct,
    };
    trace!(
        "fold {:?}: {} of {} correct",
        score.test,
        score.correct,
        score.total
    );

    Ok((score, confusion))
}

fn collect(results: Vec<(FoldScore, Vec<ConfusionMatrix>)>) -> CrossValidation {
    let mut folds = Vec::with_capacity(results.len());
    let mut confusion: Vec<ConfusionMatrix> = Vec::new();

    for (score, matrices) in results {
        folds.push(score);

        if confusion.is_empty() {
            confusion = matrices;
        } else {
            confusion = confusion
                .into_iter()
                .zip(matrices.iter())
                .map(|(acc, cm)| acc.merge(cm))
                .collect();
        }
    }

    CrossValidation { folds, confusion }
}

/// Cross-validate a classifier on its own dataset
///
/// The classifier is retrained for every fold and stays trained on the complement of the last
/// fold afterwards.
///
/// # Errors
///
/// Returns `InvalidFolds` unless `2 <= folds <= nsamples`, and forwards training and
/// classification errors.
///
/// ```rust
/// use tally_bayes::{cross_validate, CategoricalNb, Result};
/// use tally::prelude::*;
///
/// let dataset = tally_datasets::cars();
/// let mut model = CategoricalNb::<f64>::params().fit(&dataset)?;
///
/// let result = cross_validate(&mut model, 5)?;
/// assert_eq!(result.folds.len(), 5);
/// assert!(result.accuracy() <= 1.0);
/// # Result::Ok(())
/// ```
pub fn cross_validate<'a, F: Float, C: NaiveBayes<'a, F>>(
    classifier: &mut C,
    folds: usize,
) -> Result<CrossValidation> {
    let ranges = classifier.dataset().fold_ranges(folds)?;

    let results = ranges
        .map(|test| evaluate_fold(classifier, test))
        .collect::<Result<Vec<_>>>()?;

    Ok(collect(results))
}

/// Cross-validate with one freshly built classifier per fold, evaluated in parallel
///
/// `build` is called once per fold on a rayon worker. The result equals the one of
/// [`cross_validate`] for classifiers built with the same parameters.
pub fn par_cross_validate<'a, F, C, B>(
    dataset: &'a Dataset,
    folds: usize,
    build: B,
) -> Result<CrossValidation>
where
    F: Float,
    C: NaiveBayes<'a, F>,
    B: Fn(&'a Dataset) -> Result<C> + Sync,
{
    let ranges = dataset.fold_ranges(folds)?.collect::<Vec<_>>();

    let results = ranges
        .into_par_iter()
        .map(|test| {
            let mut classifier = build(dataset)?;
            evaluate_fold(&mut classifier, test)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(collect(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::{CategoricalNb, CategoricalNbParams, MultiLabelNb, MultiLabelNbParams};
    use ndarray::array;
    use rand::{rngs::SmallRng, SeedableRng};
    use tally::prelude::*;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<CrossValidation>();
        has_autotraits::<FoldScore>();
    }

    #[test]
    fn accuracy_is_correct_over_total() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = tally_datasets::generate::nominal(&mut rng, 103, &[3, 4, 2], 3)?;
        let mut model = CategoricalNb::<f64>::params().fit(&dataset)?;

        let result = cross_validate(&mut model, DEFAULT_FOLDS)?;
        assert_eq!(result.folds.len(), 10);
        assert_eq!(result.total(), 103);
        assert_eq!(result.confusion.len(), 1);
        assert_eq!(result.confusion[0].total(), 103);
        assert_eq!(result.confusion[0].correct(), result.correct());
        assert_eq!(result.folds[0].test, 0..11);
        assert_eq!(result.folds[9].test, 93..103);

        // recount every fold by hand
        let labels = dataset.labels(0)?;
        let mut correct = 0;
        for fold in &result.folds {
            let rows = excluding(fold.test.clone());
            model.train(&rows)?;
            for row in fold.test.clone() {
                if model.classify(dataset.records().row(row))?.class == labels[row] {
                    correct += 1;
                }
            }
        }

        assert_eq!(correct, result.correct());
        let accuracy = result.accuracy();
        assert!((0.0..=1.0).contains(&accuracy));
        assert_eq!(accuracy, correct as f32 / 103.0);

        Ok(())
    }

    #[test]
    fn parallel_matches_sequential() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);
        let dataset = tally_datasets::generate::nominal(&mut rng, 60, &[2, 3, 3, 5], 2)?;
        let params = CategoricalNbParams::<f64>::new().smoothing(1.0).check()?;

        let mut model = CategoricalNb::new(params.clone(), &dataset, 0)?;
        let sequential = cross_validate(&mut model, 6)?;
        let parallel = par_cross_validate(&dataset, 6, |ds| CategoricalNb::new(params.clone(), ds, 0))?;

        assert_eq!(sequential.folds, parallel.folds);
        assert_eq!(sequential.confusion, parallel.confusion);

        Ok(())
    }

    #[test]
    fn ensemble_is_judged_by_the_predicted_column() -> Result<()> {
        let records = ValueCountedMatrix::binary(array![
            [0, 0],
            [0, 1],
            [1, 0],
            [1, 1],
            [0, 0],
            [1, 1],
            [0, 1],
            [1, 0]
        ])?;
        let targets = array![[0usize, 0], [0, 1], [1, 0], [1, 1], [0, 0], [1, 1], [0, 1], [1, 0]];
        let dataset = Dataset::new(records, targets)?;
        let mut model = MultiLabelNb::new(MultiLabelNbParams::<f64>::new().check()?, &dataset)?;

        let result = cross_validate(&mut model, 4)?;
        assert_eq!(result.total(), 8);
        assert!(result.accuracy() >= 0.0 && result.accuracy() <= 1.0);

        // every label column keeps its own confusion matrix
        assert_eq!(result.confusion.len(), 2);
        let recorded = result.confusion.iter().map(|cm| cm.total()).sum::<usize>();
        let correct = result.confusion.iter().map(|cm| cm.correct()).sum::<usize>();
        assert_eq!(recorded, 8);
        assert_eq!(correct, result.correct());
        assert!(result.confusion(2).is_none());

        Ok(())
    }

    #[test]
    fn invalid_fold_counts() -> Result<()> {
        let dataset = tally_datasets::cars();
        let mut model = CategoricalNb::<f64>::params().fit(&dataset)?;

        assert!(cross_validate(&mut model, 1).is_err());
        assert!(cross_validate(&mut model, 11).is_err());
        assert!(cross_validate(&mut model, 10).is_ok());

        Ok(())
    }
}

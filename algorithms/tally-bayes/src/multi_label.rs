use log::debug;
use ndarray::{Array2, ArrayBase, ArrayView1, Data, Ix2};

use crate::base_nb::{Classification, NaiveBayes};
use crate::categorical_nb::CategoricalNb;
use crate::error::{NaiveBayesError, Result};
use crate::hyperparams::{MultiLabelNbParams, MultiLabelNbValidParams};
use tally::dataset::AsTargets;
use tally::traits::{Fit, Predict};
use tally::{Dataset, Float, ValueCountedMatrix};

impl<'a, F: Float> Fit<'a, ValueCountedMatrix, Array2<usize>, NaiveBayesError>
    for MultiLabelNbValidParams<F>
{
    type Object = MultiLabelNb<'a, F>;

    /// Fit one classifier per label column, using every row
    fn fit(&self, dataset: &'a Dataset) -> Result<Self::Object> {
        let mut model = MultiLabelNb::new(self.clone(), dataset)?;
        model.train_all()?;

        Ok(model)
    }
}

/// Ensemble of categorical Naive Bayes classifiers, one per label column
///
/// Every label column of the dataset is an independent classification problem over the same
/// records. The ensemble answers with the single most confident `(label column, class, score)`
/// triple, which makes it suitable for datasets where exactly one of several label sets carries
/// the interesting signal of a row.
///
/// ```rust
/// use tally_bayes::{MultiLabelNb, NaiveBayes, Result};
/// use tally::prelude::*;
/// use ndarray::array;
///
/// let records = ValueCountedMatrix::binary(array![[0, 0], [0, 1], [1, 0], [1, 1], [0, 0]])?;
/// let ds = Dataset::new(records, array![[0usize, 0], [0, 1], [1, 0], [1, 1], [0, 0]])?;
///
/// let model = MultiLabelNb::<f64>::params().fit(&ds)?;
/// let best = model.classify(array![1, 1].view())?;
///
/// assert_eq!(model.classify_each(array![1, 1].view())?.len(), 2);
/// assert!(best.target < 2);
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct MultiLabelNb<'a, F> {
    params: MultiLabelNbValidParams<F>,
    dataset: &'a Dataset,
    classifiers: Vec<CategoricalNb<'a, F>>,
}

impl<'a, F: Float> MultiLabelNb<'a, F> {
    /// Construct a new set of hyperparameters
    pub fn params() -> MultiLabelNbParams<F> {
        MultiLabelNbParams::new()
    }

    /// Create an untrained ensemble with one classifier per label column
    pub fn new(params: MultiLabelNbValidParams<F>, dataset: &'a Dataset) -> Result<Self> {
        let classifiers = Self::build(&params, dataset)?;

        Ok(MultiLabelNb {
            params,
            dataset,
            classifiers,
        })
    }

    fn build(
        params: &MultiLabelNbValidParams<F>,
        dataset: &'a Dataset,
    ) -> Result<Vec<CategoricalNb<'a, F>>> {
        (0..dataset.ntargets())
            .map(|target| CategoricalNb::new(params.base().clone(), dataset, target))
            .collect()
    }

    /// Per-label classifiers, in label column order
    pub fn classifiers(&self) -> &[CategoricalNb<'a, F>] {
        &self.classifiers
    }

    /// Classify an observation with every per-label classifier
    pub fn classify_each(&self, observation: ArrayView1<usize>) -> Result<Vec<Classification<F>>> {
        self.classifiers
            .iter()
            .map(|classifier| classifier.classify(observation))
            .collect()
    }

    fn predict_rows<D: Data<Elem = usize>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<usize>> {
        let mut pred = Array2::zeros((x.nrows(), 2));

        for (observation, mut row) in x.outer_iter().zip(pred.outer_iter_mut()) {
            let best = self.classify(observation)?;
            row[0] = best.target;
            row[1] = best.class;
        }

        Ok(pred)
    }
}

impl<'a, F: Float> NaiveBayes<'a, F> for MultiLabelNb<'a, F> {
    fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Rebuild every per-label classifier and train it on the selected rows
    fn train(&mut self, rows: &dyn Fn(usize) -> bool) -> Result<()> {
        let mut classifiers = Self::build(&self.params, self.dataset)?;

        for classifier in classifiers.iter_mut() {
            classifier.train(rows)?;
        }

        debug!("trained {} per-label classifiers", classifiers.len());
        self.classifiers = classifiers;

        Ok(())
    }

    fn reset(&mut self) {
        for classifier in self.classifiers.iter_mut() {
            classifier.reset();
        }
    }

    /// The most confident answer over all label columns, ties go to the lowest label column
    fn classify(&self, observation: ArrayView1<usize>) -> Result<Classification<F>> {
        let mut best: Option<Classification<F>> = None;

        for classifier in &self.classifiers {
            let result = classifier.classify(observation)?;

            best = match best {
                Some(current) if current.score >= result.score => Some(current),
                _ => Some(result),
            };
        }

        best.ok_or_else(|| {
            tally::Error::TargetOutOfRange {
                target: 0,
                ntargets: 0,
            }
            .into()
        })
    }
}

/// Predict the winning `(label column, class)` pair of every row
///
/// The result has dimensionality (nsamples, 2).
impl<'a, F: Float, D: Data<Elem = usize>> Predict<&ArrayBase<D, Ix2>, Result<Array2<usize>>>
    for MultiLabelNb<'a, F>
{
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<usize>> {
        self.predict_rows(x)
    }
}

impl<'a, 'b, F: Float> Predict<&'b ValueCountedMatrix, Result<Array2<usize>>>
    for MultiLabelNb<'a, F>
{
    fn predict(&self, x: &'b ValueCountedMatrix) -> Result<Array2<usize>> {
        self.predict_rows(&x.values())
    }
}

#[cfg(test)]
mod tests {
    use super::{MultiLabelNb, NaiveBayes, Result};
    use crate::{CategoricalNb, CategoricalNbParams, MultiLabelNbParams, MultiLabelNbValidParams};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, stack, Array1, Axis};
    use tally::prelude::*;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<MultiLabelNb<f64>>();
        has_autotraits::<MultiLabelNbValidParams<f64>>();
        has_autotraits::<MultiLabelNbParams<f64>>();
    }

    fn dataset() -> Dataset {
        // the first label follows feature 0, the second label feature 1
        let records = ValueCountedMatrix::new(
            array![[0, 0], [0, 1], [1, 2], [1, 0], [0, 2], [1, 1], [0, 0], [1, 2]],
            array![2, 3],
        )
        .unwrap();
        let targets = array![[0usize, 0], [0, 1], [1, 2], [1, 0], [0, 2], [1, 1], [0, 0], [1, 2]];

        Dataset::new(records, targets)
            .unwrap()
            .with_target_names(vec!["parity", "size"])
    }

    #[test]
    fn best_of_independent_classifiers() -> Result<()> {
        let dataset = dataset();
        let model = MultiLabelNb::<f64>::params().fit(&dataset)?;
        assert_eq!(model.classifiers().len(), 2);

        for observation in dataset.records().values().outer_iter() {
            let each = model.classify_each(observation)?;
            let best = model.classify(observation)?;

            // independently trained single-label classifiers agree with the ensemble members
            for (target, result) in each.iter().enumerate() {
                let single = CategoricalNb::new(CategoricalNbParams::<f64>::new().check()?, &dataset, target)
                    .and_then(|mut clf| clf.train_all().map(|_| clf))?;
                let expected = single.classify(observation)?;

                assert_eq!(result.class, expected.class);
                assert_abs_diff_eq!(result.score, expected.score, epsilon = 1e-12);
            }

            let max = each.iter().map(|r| r.score).fold(f64::MIN, f64::max);
            assert_abs_diff_eq!(best.score, max, epsilon = 1e-12);

            let first = each.iter().position(|r| r.score == max).unwrap();
            assert_eq!(best.target, first);
        }

        Ok(())
    }

    #[test]
    fn two_label_columns_over_the_cars_features() -> Result<()> {
        let cars = tally_datasets::cars();
        // the second label column repeats the car type
        let stolen = cars.labels(0)?;
        let kind = cars.records().values().column(1).to_owned();
        let targets = stack(Axis(1), &[stolen, kind.view()]).unwrap();

        let dataset = Dataset::new(cars.records().clone(), targets)?
            .with_target_names(vec!["Stolen", "Type"]);
        let mut model = MultiLabelNb::<f64>::params().fit(&dataset)?;
        assert_eq!(model.classifiers().len(), 2);
        assert_eq!(dataset.records().nfeatures(), 3);

        let params = CategoricalNbParams::<f64>::new().check()?;
        let stolen_nb = CategoricalNb::new(params.clone(), &dataset, 0)
            .and_then(|mut clf| clf.train_all().map(|_| clf))?;
        let kind_nb = CategoricalNb::new(params, &dataset, 1)
            .and_then(|mut clf| clf.train_all().map(|_| clf))?;

        for observation in dataset.records().values().outer_iter() {
            let a = stolen_nb.classify(observation)?;
            let b = kind_nb.classify(observation)?;
            let expected = if a.score >= b.score { a } else { b };

            assert_eq!(model.classify(observation)?, expected);
        }

        // a red domestic sports car is most confidently a sports car
        let best = model.classify(array![1, 0, 1].view())?;
        assert_eq!((best.target, best.class), (1, 0));
        // a red domestic SUV is most confidently not stolen
        let stolen = model.classify(array![1, 1, 1].view())?;
        assert_eq!((stolen.target, stolen.class, stolen.name.as_str()), (0, 0, "No"));

        // a failed retraining keeps the trained classifiers
        assert!(model.train(&|_| false).is_err());
        assert_eq!(model.classify(array![1, 0, 1].view())?, best);

        Ok(())
    }

    #[test]
    fn retrain_and_reset() -> Result<()> {
        let dataset = dataset();
        let mut model = MultiLabelNb::new(MultiLabelNbParams::<f64>::new().check()?, &dataset)?;

        assert!(model.classify(array![0, 0].view()).is_err());

        model.train(&|row| row < 6)?;
        let first = model.classify(array![1, 2].view())?;
        model.train(&|row| row < 6)?;
        assert_eq!(model.classify(array![1, 2].view())?, first);

        model.reset();
        assert!(model.classifiers().iter().all(|clf| !clf.is_trained()));

        Ok(())
    }

    #[test]
    fn predicts_label_and_class() -> Result<()> {
        let dataset = dataset();
        let model = MultiLabelNb::<f64>::params().smoothing(1.0).fit(&dataset)?;
        let pred = model.predict(dataset.records())?;

        assert_eq!(pred.dim(), (8, 2));
        for (row, p) in pred.outer_iter().enumerate() {
            let best = model.classify(dataset.records().row(row))?;
            assert_eq!(p, Array1::from(vec![best.target, best.class]));
        }

        Ok(())
    }
}

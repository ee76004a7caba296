use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};

use crate::base_nb::{argmax, normalize, Classification, NaiveBayes};
use crate::error::{NaiveBayesError, Result};
use crate::frequency::FrequencyTable;
use crate::hyperparams::{CategoricalNbParams, CategoricalNbValidParams};
use tally::dataset::{AsTargets, Records};
use tally::traits::{Fit, Predict};
use tally::{Dataset, Float, ValueCountedMatrix};

impl<'a, F: Float> Fit<'a, ValueCountedMatrix, Array2<usize>, NaiveBayesError>
    for CategoricalNbValidParams<F>
{
    type Object = CategoricalNb<'a, F>;

    /// Fit on the single label column of the dataset, using every row
    fn fit(&self, dataset: &'a Dataset) -> Result<Self::Object> {
        dataset.try_single_target()?;

        let mut model = CategoricalNb::new(self.clone(), dataset, 0)?;
        model.train_all()?;

        Ok(model)
    }
}

/// Categorical Naive Bayes classifier over a single label column
///
/// See [`CategoricalNbParams`] for more information on the hyper-parameters.
///
/// # Model assumptions
///
/// The family of Naive Bayes classifiers assume independence between variables. They do not model
/// moments between variables and lack therefore in modelling capability. The advantage is a linear
/// fitting time with maximum-likelihood training in a closed form.
///
/// Every feature `j` is nominal with `arity(j)` values. The conditional probability of a value is
/// the m-estimate
///
/// ```text
/// P(x_j = v | c) = (count(c, j, v) + s / arity(j)) / (population(c) + s)
/// ```
///
/// which spreads `s` virtual samples uniformly over the values of the feature.
///
/// # Model usage example
///
/// ```rust
/// use tally_bayes::{CategoricalNb, NaiveBayes, Result};
/// use tally::prelude::*;
/// use ndarray::array;
///
/// let records = ValueCountedMatrix::new(array![[0, 2], [0, 1], [1, 0], [1, 1], [0, 2]], array![2, 3])?;
/// let ds = Dataset::new(records, array![0usize, 0, 1, 1, 0])?.with_class_names(vec!["a", "b"]);
///
/// let model = CategoricalNb::<f64>::params().fit(&ds)?;
/// let result = model.classify(array![1, 0].view())?;
///
/// assert_eq!(result.class, 1);
/// assert_eq!(result.name, "b");
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct CategoricalNb<'a, F> {
    smoothing: F,
    dataset: &'a Dataset,
    target: usize,
    class_names: Vec<String>,
    table: FrequencyTable,
    prior: Array1<F>,
    likelihood: Array2<F>,
    trained: bool,
}

impl<'a, F: Float> CategoricalNb<'a, F> {
    /// Construct a new set of hyperparameters
    pub fn params() -> CategoricalNbParams<F> {
        CategoricalNbParams::new()
    }

    /// Create an untrained classifier for a label column of the dataset
    ///
    /// # Errors
    ///
    /// * `TooFewSamples` if the column has at least as many classes as the dataset has rows
    /// * `TargetOutOfRange` if the label column does not exist
    /// * `LabelOutOfRange` if a label is not a valid class of the column
    pub fn new(
        params: CategoricalNbValidParams<F>,
        dataset: &'a Dataset,
        target: usize,
    ) -> Result<Self> {
        let nclasses = dataset.nclasses(target)?;
        let nsamples = dataset.nsamples();

        if nclasses >= nsamples {
            return Err(NaiveBayesError::TooFewSamples { nclasses, nsamples });
        }

        let labels = dataset.labels(target)?;
        if let Some((row, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= nclasses) {
            return Err(tally::Error::LabelOutOfRange {
                row,
                label,
                nclasses,
            }
            .into());
        }

        let table = FrequencyTable::for_matrix(dataset.records(), nclasses);
        let nvalues = dataset.records().nvalues();

        Ok(CategoricalNb {
            smoothing: params.smoothing(),
            dataset,
            target,
            class_names: dataset.class_names(target)?,
            table,
            prior: Array1::zeros(nclasses),
            likelihood: Array2::zeros((nclasses, nvalues)),
            trained: false,
        })
    }

    /// The label column this classifier predicts
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn nclasses(&self) -> usize {
        self.table.nclasses()
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Class frequencies of the last training
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.table
    }

    /// Prior probability of every class
    pub fn priors(&self) -> ArrayView1<F> {
        self.prior.view()
    }

    pub fn prior(&self, class: usize) -> Result<F> {
        self.prior.get(class).copied().ok_or_else(|| {
            tally::Error::ClassOutOfRange {
                class,
                nclasses: self.nclasses(),
            }
            .into()
        })
    }

    /// Conditional probabilities of every value of a feature within a class
    pub fn conditionals(&self, class: usize, feature: usize) -> Result<ArrayView1<F>> {
        if class >= self.nclasses() {
            return Err(tally::Error::ClassOutOfRange {
                class,
                nclasses: self.nclasses(),
            }
            .into());
        }

        let records = self.dataset.records();
        let offset = records.offset(feature)?;
        let arity = records.arity(feature)?;

        Ok(self
            .likelihood
            .row(class)
            .slice_move(ndarray::s![offset..offset + arity]))
    }

    /// Conditional probability of a single value of a feature within a class
    pub fn conditional(&self, class: usize, feature: usize, value: usize) -> Result<F> {
        let conditionals = self.conditionals(class, feature)?;

        conditionals.get(value).copied().ok_or_else(|| {
            tally::Error::ValueOutOfRange {
                feature,
                value,
                arity: conditionals.len(),
            }
            .into()
        })
    }

    /// Unnormalized posterior score of every class
    pub fn scores(&self, observation: ArrayView1<usize>) -> Result<Array1<F>> {
        if !self.trained {
            return Err(NaiveBayesError::Untrained);
        }

        let records = self.dataset.records();
        records.check_observation(&observation)?;

        let offsets = records.offsets();
        let scores = self
            .likelihood
            .outer_iter()
            .zip(self.prior.iter())
            .map(|(likelihood, prior)| {
                observation
                    .iter()
                    .zip(offsets.iter())
                    .fold(*prior, |score, (value, offset)| {
                        score * likelihood[offset + value]
                    })
            })
            .collect();

        Ok(scores)
    }

    /// Posterior probability of every class
    ///
    /// The scores are normalized to sum to one, if every score vanishes the classes are
    /// considered equally likely.
    pub fn predict_proba(&self, observation: ArrayView1<usize>) -> Result<Array1<F>> {
        Ok(normalize(self.scores(observation)?))
    }

    fn predict_rows(&self, x: ArrayView2<usize>) -> Result<Array1<usize>> {
        x.outer_iter()
            .map(|observation| self.classify(observation).map(|result| result.class))
            .collect()
    }
}

impl<'a, F: Float> NaiveBayes<'a, F> for CategoricalNb<'a, F> {
    fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn train(&mut self, rows: &dyn Fn(usize) -> bool) -> Result<()> {
        let records = self.dataset.records();
        let labels = self.dataset.labels(self.target)?;

        // an empty selection leaves the current estimates untouched
        if !(0..records.nsamples()).any(rows) {
            return Err(NaiveBayesError::EmptyTrainingSet);
        }

        self.table.tally(records, labels, rows)?;

        let total = self.table.total();

        let smoothing = self.smoothing;
        let total_f = F::cast(total);

        for class in 0..self.nclasses() {
            let population = self.table.populations()[class];
            self.prior[class] = F::cast(population) / total_f;

            if population == 0 {
                warn!(
                    "class {} of target {} has no training rows",
                    self.class_names[class], self.target
                );
            }

            let denominator = F::cast(population) + smoothing;
            let counts = self.table.counts_of(class);
            let mut likelihood = self.likelihood.row_mut(class);

            for (&offset, &arity) in records.offsets().iter().zip(records.value_counts().iter()) {
                let arity_f = F::cast(arity);

                for value in offset..offset + arity {
                    likelihood[value] = if denominator > F::zero() {
                        (F::cast(counts[value]) + smoothing / arity_f) / denominator
                    } else {
                        F::one() / arity_f
                    };
                }
            }
        }

        self.trained = true;
        debug!(
            "trained categorical naive bayes on {} of {} rows, target {} with {} classes",
            total,
            records.nsamples(),
            self.target,
            self.nclasses()
        );

        Ok(())
    }

    fn reset(&mut self) {
        self.table.reset();
        self.prior.fill(F::zero());
        self.likelihood.fill(F::zero());
        self.trained = false;
    }

    fn classify(&self, observation: ArrayView1<usize>) -> Result<Classification<F>> {
        let scores = self.scores(observation)?;
        let class = argmax(&scores)?;

        Ok(Classification {
            target: self.target,
            class,
            name: self.class_names[class].clone(),
            score: scores[class],
        })
    }
}

/// Classify every row of a matrix of observations
impl<'a, F: Float, D: Data<Elem = usize>> Predict<&ArrayBase<D, Ix2>, Result<Array1<usize>>>
    for CategoricalNb<'a, F>
{
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<usize>> {
        self.predict_rows(x.view())
    }
}

impl<'a, 'b, F: Float> Predict<&'b ValueCountedMatrix, Result<Array1<usize>>>
    for CategoricalNb<'a, F>
{
    fn predict(&self, x: &'b ValueCountedMatrix) -> Result<Array1<usize>> {
        self.predict_rows(x.values())
    }
}

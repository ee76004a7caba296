use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix2, Zip};

use crate::base_nb::{argmax, Classification, NaiveBayes};
use crate::error::{NaiveBayesError, Result};
use crate::hyperparams::{BernoulliNbParams, BernoulliNbValidParams};
use tally::dataset::{AsTargets, Records};
use tally::traits::{Fit, Predict};
use tally::{Dataset, Float, ValueCountedMatrix};

impl<'a, F: Float> Fit<'a, ValueCountedMatrix, Array2<usize>, NaiveBayesError>
    for BernoulliNbValidParams<F>
{
    type Object = BernoulliNb<'a, F>;

    fn fit(&self, dataset: &'a Dataset) -> Result<Self::Object> {
        dataset.try_single_target()?;

        let mut model = BernoulliNb::new(self.clone(), dataset, 0)?;
        model.train_all()?;

        Ok(model)
    }
}

/// Fitted Bernoulli Naive Bayes classifier.
///
/// See [BernoulliNbParams] for more information on the hyper-parameters.
///
/// # Model assumptions
///
/// Every feature is binary and marks the presence of a property. Instead of a value-indexed table
/// the model counts, per class, how often a feature is present and how often it is absent:
///
/// ```text
/// P(x_j = 1 | c) = (present(c, j) + s / 2) / (population(c) + s)
/// P(x_j = 0 | c) = (absent(c, j) + s / 2) / (population(c) + s)
/// ```
///
/// On binary data this gives the same scores as [`CategoricalNb`](crate::CategoricalNb).
/// Continuous observations are binarized with the threshold of the parameter set, values greater
/// or equal than the threshold count as present.
///
/// # Model usage example
///
/// ```rust
/// use tally_bayes::{BernoulliNb, NaiveBayes, Result};
/// use tally::prelude::*;
/// use ndarray::array;
///
/// let x = array![
///     [0.9, 0.1],
///     [0.7, 0.2],
///     [0.8, 0.6],
///     [0.1, 0.9],
///     [0.3, 0.7],
///     [0.2, 0.8]
/// ];
/// let records = ValueCountedMatrix::binarize(&x, 0.5);
/// let ds = Dataset::new(records, array![0usize, 0, 0, 1, 1, 1])?;
///
/// let model = BernoulliNb::params().threshold(0.5).fit(&ds)?;
/// let result = model.classify_continuous(array![0.2, 0.95].view())?;
/// assert_eq!(result.class, 1);
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct BernoulliNb<'a, F> {
    smoothing: F,
    threshold: F,
    dataset: &'a Dataset,
    target: usize,
    class_names: Vec<String>,
    population: Array1<usize>,
    present: Array2<usize>,
    absent: Array2<usize>,
    prior: Array1<F>,
    p_present: Array2<F>,
    p_absent: Array2<F>,
    trained: bool,
}

impl<'a, F: Float> BernoulliNb<'a, F> {
    /// Construct a new set of hyperparameters
    pub fn params() -> BernoulliNbParams<F> {
        BernoulliNbParams::new()
    }

    /// Create an untrained classifier for a label column of the dataset
    ///
    /// Besides the checks of [`CategoricalNb::new`](crate::CategoricalNb::new) every feature has to
    /// be binary, otherwise `NonBinaryFeature` is returned.
    pub fn new(
        params: BernoulliNbValidParams<F>,
        dataset: &'a Dataset,
        target: usize,
    ) -> Result<Self> {
        let records = dataset.records();
        if let Some((feature, &arity)) = records
            .value_counts()
            .iter()
            .enumerate()
            .find(|&(_, &arity)| arity != 2)
        {
            return Err(NaiveBayesError::NonBinaryFeature { feature, arity });
        }

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

        let shape = (nclasses, records.nfeatures());

        Ok(BernoulliNb {
            smoothing: params.smoothing(),
            threshold: params.threshold(),
            dataset,
            target,
            class_names: dataset.class_names(target)?,
            population: Array1::zeros(nclasses),
            present: Array2::zeros(shape),
            absent: Array2::zeros(shape),
            prior: Array1::zeros(nclasses),
            p_present: Array2::zeros(shape),
            p_absent: Array2::zeros(shape),
            trained: false,
        })
    }

    pub fn nclasses(&self) -> usize {
        self.population.len()
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// Prior probability of every class
    pub fn priors(&self) -> ArrayView1<F> {
        self.prior.view()
    }

    /// Probability that a feature is present, with dimensionality (nclasses, nfeatures)
    pub fn present_probabilities(&self) -> ArrayView2<F> {
        self.p_present.view()
    }

    /// Probability that a feature is absent, with dimensionality (nclasses, nfeatures)
    pub fn absent_probabilities(&self) -> ArrayView2<F> {
        self.p_absent.view()
    }

    /// Number of training rows per class where a feature is present
    pub fn present_counts(&self) -> ArrayView2<usize> {
        self.present.view()
    }

    /// Number of training rows per class where a feature is absent
    pub fn absent_counts(&self) -> ArrayView2<usize> {
        self.absent.view()
    }

    /// Unnormalized posterior score of every class
    pub fn scores(&self, observation: ArrayView1<usize>) -> Result<Array1<F>> {
        if !self.trained {
            return Err(NaiveBayesError::Untrained);
        }

        self.dataset.records().check_observation(&observation)?;

        let scores = Zip::from(self.p_present.rows())
            .and(self.p_absent.rows())
            .and(&self.prior)
            .map_collect(|present, absent, &prior| {
                Zip::from(&observation)
                    .and(&present)
                    .and(&absent)
                    .fold(prior, |score, &value, &p1, &p0| {
                        score * if value == 1 { p1 } else { p0 }
                    })
            });

        Ok(scores)
    }

    /// Classify a continuous observation
    ///
    /// Every value greater or equal than the threshold counts as present.
    pub fn classify_continuous(&self, observation: ArrayView1<F>) -> Result<Classification<F>> {
        let threshold = self.threshold;
        let binary = observation.mapv(|v| if v >= threshold { 1 } else { 0 });

        self.classify(binary.view())
    }

    fn predict_rows(&self, x: ArrayView2<usize>) -> Result<Array1<usize>> {
        x.outer_iter()
            .map(|observation| self.classify(observation).map(|result| result.class))
            .collect()
    }
}

impl<'a, F: Float> NaiveBayes<'a, F> for BernoulliNb<'a, F> {
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

        self.reset();

        for (row, observation) in records.values().outer_iter().enumerate() {
            if !rows(row) {
                continue;
            }

            let label = labels[row];
            self.population[label] += 1;

            Zip::from(&observation)
                .and(self.present.row_mut(label))
                .and(self.absent.row_mut(label))
                .for_each(|&value, present, absent| {
                    if value == 1 {
                        *present += 1;
                    } else {
                        *absent += 1;
                    }
                });
        }

        let total = self.population.sum();

        let smoothing = self.smoothing;
        let half = smoothing / F::cast(2);

        for class in 0..self.nclasses() {
            let population = self.population[class];
            self.prior[class] = F::cast(population) / F::cast(total);

            if population == 0 {
                warn!(
                    "class {} of target {} has no training rows",
                    self.class_names[class], self.target
                );
            }

            let denominator = F::cast(population) + smoothing;
            let estimate = |count: usize| {
                if denominator > F::zero() {
                    (F::cast(count) + half) / denominator
                } else {
                    F::cast(0.5)
                }
            };

            Zip::from(self.p_present.row_mut(class))
                .and(self.present.row(class))
                .for_each(|p, &count| *p = estimate(count));
            Zip::from(self.p_absent.row_mut(class))
                .and(self.absent.row(class))
                .for_each(|p, &count| *p = estimate(count));
        }

        self.trained = true;
        debug!(
            "trained bernoulli naive bayes on {} of {} rows, target {} with {} classes",
            total,
            records.nsamples(),
            self.target,
            self.nclasses()
        );

        Ok(())
    }

    fn reset(&mut self) {
        self.population.fill(0);
        self.present.fill(0);
        self.absent.fill(0);
        self.prior.fill(F::zero());
        self.p_present.fill(F::zero());
        self.p_absent.fill(F::zero());
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

impl<'a, F: Float, D: Data<Elem = usize>> Predict<&ArrayBase<D, Ix2>, Result<Array1<usize>>>
    for BernoulliNb<'a, F>
{
    fn predict(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<usize>> {
        self.predict_rows(x.view())
    }
}

impl<'a, 'b, F: Float> Predict<&'b ValueCountedMatrix, Result<Array1<usize>>>
    for BernoulliNb<'a, F>
{
    fn predict(&self, x: &'b ValueCountedMatrix) -> Result<Array1<usize>> {
        self.predict_rows(x.values())
    }
}

//! Utility functions for randomly generating datasets

use ndarray::{Array1, Array2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Bernoulli, Uniform},
    RandomExt,
};
use tally::error::{Error, Result};
use tally::{Dataset, ValueCountedMatrix};

/// Probability that a generated feature follows the label of its row
pub const SIGNAL: f64 = 0.8;

/// Generate a random nominal dataset with a single label column
///
/// Labels are drawn uniformly from `[0, nclasses)`. Every feature `j` takes the value
/// `label % value_counts[j]` with probability [`SIGNAL`] and a uniformly drawn value otherwise, so
/// the features are informative but noisy. All `nclasses` classes are declared, even those which
/// were never drawn.
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use tally::prelude::*;
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let dataset = tally_datasets::generate::nominal(&mut rng, 50, &[3, 2, 4], 3)?;
///
/// assert_eq!(dataset.nsamples(), 50);
/// assert_eq!(dataset.nclasses(0)?, 3);
/// # Result::Ok(())
/// ```
pub fn nominal(
    rng: &mut impl Rng,
    nsamples: usize,
    value_counts: &[usize],
    nclasses: usize,
) -> Result<Dataset> {
    if nclasses == 0 {
        return Err(Error::Parameters("at least one class is required".into()));
    }
    if let Some(feature) = value_counts.iter().position(|&arity| arity == 0) {
        return Err(Error::ZeroArity { feature });
    }

    let labels = Array1::random_using(nsamples, Uniform::new(0, nclasses), rng);
    let signal = Array2::random_using(
        (nsamples, value_counts.len()),
        Bernoulli::new(SIGNAL).map_err(|e| Error::Parameters(e.to_string()))?,
        rng,
    );

    let mut values = Array2::zeros((nsamples, value_counts.len()));
    for ((row, feature), value) in values.indexed_iter_mut() {
        let arity = value_counts[feature];

        *value = if signal[(row, feature)] {
            labels[row] % arity
        } else {
            rng.gen_range(0..arity)
        };
    }

    let records = ValueCountedMatrix::new(values, Array1::from(value_counts.to_vec()))?;
    let class_names = (0..nclasses).map(|c| c.to_string()).collect::<Vec<_>>();

    Ok(Dataset::new(records, labels)?.with_class_names(class_names))
}

use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Simplified `Result` using [`NaiveBayesError`](crate::NaiveBayesError) as error type
pub type Result<T> = std::result::Result<T, NaiveBayesError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug, Clone)]
pub enum NaiveBayesError {
    /// Error when performing Max operation on scores
    #[error("invalid statistical operation {0}")]
    Stats(#[from] MinMaxError),
    /// Invalid smoothing parameter
    #[error("invalid smoothing parameter {0}")]
    InvalidSmoothing(f64),
    /// Invalid binarization threshold
    #[error("invalid binarization threshold {0}")]
    InvalidThreshold(f64),
    /// A label column needs more rows than classes
    #[error("{nclasses} classes need more than {nsamples} samples")]
    TooFewSamples { nclasses: usize, nsamples: usize },
    #[error("feature {feature} has arity {arity}, but a Bernoulli model requires binary features")]
    NonBinaryFeature { feature: usize, arity: usize },
    /// The selection of training rows was empty
    #[error("no rows selected for training")]
    EmptyTrainingSet,
    #[error("the classifier has not been trained")]
    Untrained,
    #[error(transparent)]
    BaseCrate(#[from] tally::Error),
}

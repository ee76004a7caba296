//! Error types in tally
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("expected {expected} value counts, one per feature, but got {found}")]
    ValueCountMismatch { expected: usize, found: usize },
    #[error("feature {feature} has a value count of zero")]
    ZeroArity { feature: usize },
    #[error("value {value} of feature {feature} in row {row} is outside of [0, {arity})")]
    RecordOutOfRange {
        row: usize,
        feature: usize,
        value: usize,
        arity: usize,
    },
    #[error("value {value} of feature {feature} is outside of [0, {arity})")]
    ValueOutOfRange {
        feature: usize,
        value: usize,
        arity: usize,
    },
    #[error("expected {expected} features but got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("feature {feature} does not exist, there are {nfeatures} features")]
    FeatureOutOfRange { feature: usize, nfeatures: usize },
    #[error("class {class} does not exist, there are {nclasses} classes")]
    ClassOutOfRange { class: usize, nclasses: usize },
    #[error("label {label} in row {row} is outside of [0, {nclasses})")]
    LabelOutOfRange {
        row: usize,
        label: usize,
        nclasses: usize,
    },
    #[error("target {target} does not exist, there are {ntargets} targets")]
    TargetOutOfRange { target: usize, ntargets: usize },
    #[error("expected {expected} rows of targets but got {found}")]
    TargetLength { expected: usize, found: usize },
    #[error("multiple targets not supported")]
    MultipleTargets,
    #[error("cannot split {nsamples} samples into {folds} folds")]
    InvalidFolds { folds: usize, nsamples: usize },
    #[error("mismatched shapes {0}")]
    MismatchedShapes(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}

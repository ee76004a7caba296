#![doc = include_str!("../README.md")]

mod base_nb;
mod bernoulli_nb;
mod categorical_nb;
mod error;
mod frequency;
mod hyperparams;
mod multi_label;
mod validation;

pub use base_nb::{excluding, Classification, NaiveBayes};
pub use bernoulli_nb::BernoulliNb;
pub use categorical_nb::CategoricalNb;
pub use error::{NaiveBayesError, Result};
pub use frequency::FrequencyTable;
pub use hyperparams::{
    BernoulliNbParams, BernoulliNbValidParams, CategoricalNbParams, CategoricalNbValidParams,
    MultiLabelNbParams, MultiLabelNbValidParams, DEFAULT_SMOOTHING, DEFAULT_THRESHOLD,
};
pub use multi_label::MultiLabelNb;
pub use validation::{cross_validate, par_cross_validate, CrossValidation, FoldScore, DEFAULT_FOLDS};

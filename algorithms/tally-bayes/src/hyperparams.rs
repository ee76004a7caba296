use crate::NaiveBayesError;
use tally::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Default m-estimate smoothing of all Naive Bayes models
pub const DEFAULT_SMOOTHING: f64 = 3.0;
/// Default binarization threshold of the Bernoulli model
pub const DEFAULT_THRESHOLD: f64 = 0.5;

fn check_smoothing<F: Float>(smoothing: F) -> Result<(), NaiveBayesError> {
    if smoothing.is_sign_negative() || !smoothing.is_finite() {
        Err(NaiveBayesError::InvalidSmoothing(
            smoothing.to_f64().unwrap_or(f64::NAN),
        ))
    } else {
        Ok(())
    }
}

/// A verified hyper-parameter set ready for the estimation of a categorical Naive Bayes model
///
/// See [`CategoricalNbParams`](crate::CategoricalNbParams) for more informations.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNbValidParams<F> {
    smoothing: F,
}

impl<F: Float> CategoricalNbValidParams<F> {
    /// Get the m-estimate smoothing
    pub fn smoothing(&self) -> F {
        self.smoothing
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`CategoricalNbValidParams`](crate::CategoricalNbValidParams) by calling
/// [ParamGuard::check](Self::check). It is also possible to directly fit a model with
/// [Fit::fit](tally::traits::Fit::fit) which implicitely verifies the parameter set prior to the
/// model estimation and forwards any error.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [smoothing](Self::smoothing) | `3` | m-estimate of the conditional probabilities, spreads `smoothing` virtual samples uniformly over the values of a feature | `[0, inf)` |
///
/// # Errors
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative or not finite.
///
/// # Example
///
/// ```rust
/// use tally_bayes::{CategoricalNbParams, Result};
/// use tally::prelude::*;
/// use ndarray::array;
///
/// let records = ValueCountedMatrix::binary(array![[0, 1], [0, 0], [1, 1], [1, 0]])?;
/// let ds = Dataset::new(records, array![0usize, 0, 1, 1])?;
///
/// // create a new parameter set with smoothing equal `1`
/// let unchecked_params = CategoricalNbParams::new().smoothing(1.0);
///
/// // fit model with unchecked parameter set
/// let model = unchecked_params.fit(&ds)?;
///
/// // transform into a verified parameter set
/// let checked_params = unchecked_params.check()?;
/// assert_eq!(checked_params.smoothing(), 1.0);
/// assert_eq!(model.predict(ds.records())?, array![0, 0, 1, 1]);
/// # Result::Ok(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNbParams<F>(CategoricalNbValidParams<F>);

impl<F: Float> Default for CategoricalNbParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> CategoricalNbParams<F> {
    /// Create new [CategoricalNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(CategoricalNbValidParams {
            smoothing: F::cast(DEFAULT_SMOOTHING),
        })
    }

    /// Specifies the m-estimate smoothing
    pub fn smoothing(mut self, smoothing: F) -> Self {
        self.0.smoothing = smoothing;
        self
    }
}

impl<F: Float> ParamGuard for CategoricalNbParams<F> {
    type Checked = CategoricalNbValidParams<F>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        check_smoothing(self.0.smoothing)?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set ready for the estimation of a Bernoulli Naive Bayes model
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct BernoulliNbValidParams<F> {
    smoothing: F,
    threshold: F,
}

impl<F: Float> BernoulliNbValidParams<F> {
    /// Get the m-estimate smoothing
    pub fn smoothing(&self) -> F {
        self.smoothing
    }

    /// Get the binarization threshold
    pub fn threshold(&self) -> F {
        self.threshold
    }
}

/// A hyper-parameter set during construction
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [smoothing](Self::smoothing) | `3` | m-estimate of the conditional probabilities | `[0, inf)` |
/// | [threshold](Self::threshold) | `0.5` | Continuous values greater or equal than the threshold are treated as present | `(-inf, inf)` |
///
/// # Errors
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative or not finite and [`InvalidThreshold`](NaiveBayesError::InvalidThreshold)
/// if the threshold is not finite.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct BernoulliNbParams<F>(BernoulliNbValidParams<F>);

impl<F: Float> Default for BernoulliNbParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> BernoulliNbParams<F> {
    /// Create new [BernoulliNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(BernoulliNbValidParams {
            smoothing: F::cast(DEFAULT_SMOOTHING),
            threshold: F::cast(DEFAULT_THRESHOLD),
        })
    }

    /// Specifies the m-estimate smoothing
    pub fn smoothing(mut self, smoothing: F) -> Self {
        self.0.smoothing = smoothing;
        self
    }

    /// Specifies the binarization threshold of continuous observations
    pub fn threshold(mut self, threshold: F) -> Self {
        self.0.threshold = threshold;
        self
    }
}

impl<F: Float> ParamGuard for BernoulliNbParams<F> {
    type Checked = BernoulliNbValidParams<F>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        check_smoothing(self.0.smoothing)?;

        if !self.0.threshold.is_finite() {
            return Err(NaiveBayesError::InvalidThreshold(
                self.0.threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set of the multi-label ensemble
///
/// Every label column is estimated with the same categorical parameters.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelNbValidParams<F> {
    base: CategoricalNbValidParams<F>,
}

impl<F: Float> MultiLabelNbValidParams<F> {
    /// Parameters shared by the classifiers of every label column
    pub fn base(&self) -> &CategoricalNbValidParams<F> {
        &self.base
    }

    pub fn smoothing(&self) -> F {
        self.base.smoothing
    }
}

/// A hyper-parameter set of the multi-label ensemble during construction
///
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [smoothing](Self::smoothing) | `3` | m-estimate of every per-label classifier | `[0, inf)` |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLabelNbParams<F>(MultiLabelNbValidParams<F>);

impl<F: Float> Default for MultiLabelNbParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> MultiLabelNbParams<F> {
    pub fn new() -> Self {
        Self(MultiLabelNbValidParams {
            base: CategoricalNbValidParams {
                smoothing: F::cast(DEFAULT_SMOOTHING),
            },
        })
    }

    /// Specifies the m-estimate smoothing of every per-label classifier
    pub fn smoothing(mut self, smoothing: F) -> Self {
        self.0.base.smoothing = smoothing;
        self
    }
}

impl<F: Float> ParamGuard for MultiLabelNbParams<F> {
    type Checked = MultiLabelNbValidParams<F>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        check_smoothing(self.0.base.smoothing)?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<CategoricalNbParams<f64>>();
        has_autotraits::<CategoricalNbValidParams<f64>>();
        has_autotraits::<BernoulliNbParams<f32>>();
        has_autotraits::<BernoulliNbValidParams<f32>>();
        has_autotraits::<MultiLabelNbParams<f64>>();
        has_autotraits::<MultiLabelNbValidParams<f64>>();
    }

    #[test]
    fn defaults() -> Result<(), NaiveBayesError> {
        let params = CategoricalNbParams::<f64>::new().check()?;
        assert_eq!(params.smoothing(), 3.0);

        let params = BernoulliNbParams::<f64>::default().check()?;
        assert_eq!(params.smoothing(), 3.0);
        assert_eq!(params.threshold(), 0.5);

        let params = MultiLabelNbParams::<f64>::new().smoothing(0.0).check()?;
        assert_eq!(params.base().smoothing(), 0.0);

        Ok(())
    }

    #[test]
    fn invalid_smoothing() {
        let res = CategoricalNbParams::new().smoothing(-1.0f64).check();
        assert!(matches!(res, Err(NaiveBayesError::InvalidSmoothing(s)) if s == -1.0));

        let res = MultiLabelNbParams::new().smoothing(f64::INFINITY).check();
        assert!(matches!(res, Err(NaiveBayesError::InvalidSmoothing(_))));

        let res = BernoulliNbParams::new().smoothing(f32::NAN).check();
        assert!(matches!(res, Err(NaiveBayesError::InvalidSmoothing(_))));
    }

    #[test]
    fn invalid_threshold() {
        let res = BernoulliNbParams::new().threshold(f64::NEG_INFINITY).check();
        assert!(matches!(res, Err(NaiveBayesError::InvalidThreshold(_))));
    }
}

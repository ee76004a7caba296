use ndarray::{Array1, Array2, ArrayView1};
use tally::dataset::{Records, ValueCountedMatrix};
use tally::error::{Error, Result};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Class populations and per-class value frequencies of a value-counted matrix
///
/// The counts of all features share a flat value axis of length `Σ arity`, the value `v` of
/// feature `j` lives in column `offset(j) + v`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    population: Array1<usize>,
    counts: Array2<usize>,
    value_counts: Array1<usize>,
    offsets: Array1<usize>,
}

impl FrequencyTable {
    /// Create an empty table for `nclasses` classes and the given feature arities
    pub fn new(nclasses: usize, nfeatures: usize, value_counts: Array1<usize>) -> Result<Self> {
        if value_counts.len() != nfeatures {
            return Err(Error::ValueCountMismatch {
                expected: nfeatures,
                found: value_counts.len(),
            });
        }

        let mut offsets = Array1::zeros(nfeatures);
        let mut acc = 0;
        for (offset, arity) in offsets.iter_mut().zip(value_counts.iter()) {
            *offset = acc;
            acc += arity;
        }

        Ok(FrequencyTable {
            population: Array1::zeros(nclasses),
            counts: Array2::zeros((nclasses, acc)),
            value_counts,
            offsets,
        })
    }

    /// Create an empty table matching the shape of a matrix
    pub fn for_matrix(records: &ValueCountedMatrix, nclasses: usize) -> Self {
        FrequencyTable {
            population: Array1::zeros(nclasses),
            counts: Array2::zeros((nclasses, records.nvalues())),
            value_counts: records.value_counts().to_owned(),
            offsets: records.offsets().to_owned(),
        }
    }

    /// Count the selected rows of a labelled matrix
    ///
    /// The table is zeroed first, so repeated calls never accumulate. Only rows for which
    /// `rows(i)` holds are counted.
    pub fn tally(
        &mut self,
        records: &ValueCountedMatrix,
        labels: ArrayView1<usize>,
        rows: &dyn Fn(usize) -> bool,
    ) -> Result<()> {
        if records.value_counts() != self.value_counts {
            return Err(Error::MismatchedShapes(format!(
                "table expects arities {}, matrix has {}",
                self.value_counts,
                records.value_counts()
            )));
        }

        if labels.len() != records.nsamples() {
            return Err(Error::TargetLength {
                expected: records.nsamples(),
                found: labels.len(),
            });
        }

        let nclasses = self.nclasses();
        if let Some((row, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= nclasses) {
            return Err(Error::LabelOutOfRange {
                row,
                label,
                nclasses,
            });
        }

        self.reset();

        for (row, observation) in records.values().outer_iter().enumerate() {
            if !rows(row) {
                continue;
            }

            let label = labels[row];
            self.population[label] += 1;

            let mut counts = self.counts.row_mut(label);
            for (value, offset) in observation.iter().zip(self.offsets.iter()) {
                counts[offset + value] += 1;
            }
        }

        Ok(())
    }

    /// Zero every count, the shape stays the same
    pub fn reset(&mut self) {
        self.population.fill(0);
        self.counts.fill(0);
    }

    pub fn nclasses(&self) -> usize {
        self.population.len()
    }

    pub fn nfeatures(&self) -> usize {
        self.value_counts.len()
    }

    /// Number of counted rows per class
    pub fn populations(&self) -> ArrayView1<usize> {
        self.population.view()
    }

    pub fn population(&self, class: usize) -> Result<usize> {
        self.population
            .get(class)
            .copied()
            .ok_or(Error::ClassOutOfRange {
                class,
                nclasses: self.nclasses(),
            })
    }

    /// Total number of counted rows
    pub fn total(&self) -> usize {
        self.population.sum()
    }

    /// Number of counted rows of `class` where `feature` takes `value`
    pub fn count(&self, class: usize, feature: usize, value: usize) -> Result<usize> {
        let counts = self.class_feature_counts(class, feature)?;

        counts.get(value).copied().ok_or(Error::ValueOutOfRange {
            feature,
            value,
            arity: counts.len(),
        })
    }

    /// Value frequencies of every feature within a class, laid out along the flat value axis
    ///
    /// Panics if the class does not exist.
    pub fn counts_of(&self, class: usize) -> ArrayView1<usize> {
        self.counts.row(class)
    }

    /// Value frequencies of a single feature within a class
    pub fn class_feature_counts(&self, class: usize, feature: usize) -> Result<ArrayView1<usize>> {
        if class >= self.nclasses() {
            return Err(Error::ClassOutOfRange {
                class,
                nclasses: self.nclasses(),
            });
        }

        let (offset, arity) = match (self.offsets.get(feature), self.value_counts.get(feature)) {
            (Some(offset), Some(arity)) => (*offset, *arity),
            _ => {
                return Err(Error::FeatureOutOfRange {
                    feature,
                    nfeatures: self.nfeatures(),
                })
            }
        };

        Ok(self
            .counts
            .row(class)
            .slice_move(ndarray::s![offset..offset + arity]))
    }
}

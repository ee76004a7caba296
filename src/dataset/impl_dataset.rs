use super::{
    AsTargets, Dataset, DatasetBase, FoldRanges, IntoTargets, Records, ValueCountedMatrix,
};
use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2, Axis};
use rand::{seq::SliceRandom, Rng};

/// Implementation without constraints on records and targets
impl<R: Records, T> DatasetBase<R, T> {
    /// Return references to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Sets the feature names
    pub fn with_feature_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.feature_names = names.into_iter().map(Into::into).collect();

        self
    }

    /// Sets the names of the label columns
    pub fn with_target_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.target_names = names.into_iter().map(Into::into).collect();

        self
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// Names are generated as `feature-{index}` if none were provided.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }
}

impl Dataset {
    /// Create a new dataset from records and targets
    ///
    /// Targets may be a single label column (`Array1<usize>` or `Vec<usize>`) or a matrix with
    /// one column per label set.
    ///
    /// # Errors
    ///
    /// Returns `TargetLength` if the number of label rows differs from the number of records.
    pub fn new<T: IntoTargets>(records: ValueCountedMatrix, targets: T) -> Result<Self> {
        let targets = targets.into_targets();

        if targets.nrows() != records.nsamples() {
            return Err(Error::TargetLength {
                expected: records.nsamples(),
                found: targets.nrows(),
            });
        }

        Ok(DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
            target_names: Vec::new(),
            class_names: Vec::new(),
        })
    }

    /// Return all label columns
    pub fn targets(&self) -> ArrayView2<usize> {
        self.targets.view()
    }

    /// Sets the class names of every label column
    pub fn with_class_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        self.class_names = vec![names; self.ntargets()];

        self
    }

    /// Sets the class names of a single label column
    pub fn with_target_class_names<S: Into<String>>(
        mut self,
        target: usize,
        names: Vec<S>,
    ) -> Result<Self> {
        self.check_target(target)?;

        if self.class_names.len() != self.ntargets() {
            self.class_names = vec![Vec::new(); self.ntargets()];
        }
        self.class_names[target] = names.into_iter().map(Into::into).collect();

        Ok(self)
    }

    /// Returns the names of the label columns, generated as `target-{index}` if none were
    /// provided
    pub fn target_names(&self) -> Vec<String> {
        if !self.target_names.is_empty() {
            self.target_names.clone()
        } else {
            (0..self.ntargets())
                .map(|idx| format!("target-{}", idx))
                .collect()
        }
    }

    /// Returns the class names of a label column
    ///
    /// Without declared names the class indices are used.
    pub fn class_names(&self, target: usize) -> Result<Vec<String>> {
        if let Some(names) = self.declared_class_names(target)? {
            return Ok(names.to_vec());
        }

        Ok((0..self.nclasses(target)?).map(|c| c.to_string()).collect())
    }

    /// Number of classes of a label column
    ///
    /// This is the number of declared class names, or the largest observed label plus one.
    pub fn nclasses(&self, target: usize) -> Result<usize> {
        if let Some(names) = self.declared_class_names(target)? {
            return Ok(names.len());
        }

        Ok(self
            .targets
            .column(target)
            .iter()
            .max()
            .map(|max| max + 1)
            .unwrap_or(0))
    }

    /// Return a single label column
    pub fn labels(&self, target: usize) -> Result<ArrayView1<usize>> {
        self.check_target(target)?;

        Ok(self.targets.column(target))
    }

    /// Contiguous partition of the rows into `folds` test ranges
    pub fn fold_ranges(&self, folds: usize) -> Result<FoldRanges> {
        FoldRanges::new(self.nsamples(), folds)
    }

    /// Apply a permutation to the rows, records and labels stay paired
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// Split dataset into two disjoint chunks
    ///
    /// The first chunk holds `ceil(nsamples * ratio)` rows, the second chunk the remaining ones.
    pub fn split_with_ratio(&self, ratio: f32) -> (Self, Self) {
        let nsamples = self.nsamples();
        let n = ((nsamples as f32 * ratio).ceil() as usize).min(nsamples);

        let first = (0..n).collect::<Vec<_>>();
        let second = (n..nsamples).collect::<Vec<_>>();

        (self.select(&first), self.select(&second))
    }

    /// Select a subset of rows, names are carried over
    pub fn select(&self, indices: &[usize]) -> Self {
        DatasetBase {
            records: self.records.select_rows(indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
            target_names: self.target_names.clone(),
            class_names: self.class_names.clone(),
        }
    }

    fn check_target(&self, target: usize) -> Result<()> {
        if target >= self.ntargets() {
            return Err(Error::TargetOutOfRange {
                target,
                ntargets: self.ntargets(),
            });
        }

        Ok(())
    }

    fn declared_class_names(&self, target: usize) -> Result<Option<&[String]>> {
        self.check_target(target)?;

        Ok(self
            .class_names
            .get(target)
            .filter(|names| !names.is_empty())
            .map(|names| names.as_slice()))
    }
}

use std::ops::Range;

use crate::error::{Error, Result};

/// Contiguous partition of `nsamples` rows into `folds` test ranges
///
/// The ranges cover every row exactly once. With `base = nsamples / folds` and
/// `extra = nsamples % folds` the first `extra` folds hold `base + 1` rows, the remaining ones
/// `base` rows.
#[derive(Debug, Clone)]
pub struct FoldRanges {
    nsamples: usize,
    folds: usize,
    index: usize,
}

impl FoldRanges {
    /// Create a partition, the number of folds has to lie in `[2, nsamples]`
    pub fn new(nsamples: usize, folds: usize) -> Result<Self> {
        if folds < 2 || folds > nsamples {
            return Err(Error::InvalidFolds { folds, nsamples });
        }

        Ok(FoldRanges {
            nsamples,
            folds,
            index: 0,
        })
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    fn range(&self, index: usize) -> Range<usize> {
        let base = self.nsamples / self.folds;
        let extra = self.nsamples % self.folds;

        let start = index * base + index.min(extra);
        let len = base + usize::from(index < extra);

        start..start + len
    }
}

impl Iterator for FoldRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.folds {
            return None;
        }

        let range = self.range(self.index);
        self.index += 1;

        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.folds - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FoldRanges {}

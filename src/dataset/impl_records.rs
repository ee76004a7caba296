use super::{DatasetBase, Records, ValueCountedMatrix};

/// Implement records for value-counted matrices
impl Records for ValueCountedMatrix {
    type Elem = usize;

    fn nsamples(&self) -> usize {
        self.values().nrows()
    }

    fn nfeatures(&self) -> usize {
        self.value_counts().len()
    }
}

/// Implement records for a DatasetBase
impl<R: Records, T> Records for DatasetBase<R, T> {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

/// Implement records for references
impl<R: Records> Records for &R {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        (*self).nsamples()
    }

    fn nfeatures(&self) -> usize {
        (*self).nfeatures()
    }
}

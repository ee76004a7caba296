use super::{AsTargets, DatasetBase, IntoTargets, Records};
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Ix2};

/// A two-dimensional label matrix can act as targets
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix2> {
    type Elem = L;

    fn as_multi_targets(&self) -> ArrayView2<L> {
        self.view()
    }
}

/// A dataset exposes the targets it holds
impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_multi_targets(&self) -> ArrayView2<Self::Elem> {
        self.targets.as_multi_targets()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_multi_targets(&self) -> ArrayView2<Self::Elem> {
        (*self).as_multi_targets()
    }
}

/// A single label column becomes a target matrix with one column
impl IntoTargets for Array1<usize> {
    fn into_targets(self) -> Array2<usize> {
        self.insert_axis(Axis(1))
    }
}

impl IntoTargets for Vec<usize> {
    fn into_targets(self) -> Array2<usize> {
        Array1::from(self).insert_axis(Axis(1))
    }
}

impl IntoTargets for Array2<usize> {
    fn into_targets(self) -> Array2<usize> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn label_vectors_become_single_columns() {
        let targets = array![0usize, 2, 1].into_targets();
        assert_eq!(targets.dim(), (3, 1));
        assert_eq!(targets.ntargets(), 1);

        let targets = vec![1usize, 1].into_targets();
        assert_eq!(targets, array![[1usize], [1]]);
    }

    #[test]
    fn multi_targets_keep_their_columns() {
        let targets = array![[0usize, 1], [1, 0]].into_targets();
        assert_eq!(targets.ntargets(), 2);
        assert!(targets.try_single_target().is_err());
        assert_eq!(targets.as_multi_targets().column(1), array![1usize, 0]);
    }
}

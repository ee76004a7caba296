//! `tally-datasets` provides nominal datasets ready to be used in tests and examples.
//!
//! ## The Big Picture
//!
//! `tally-datasets` is a crate in the `tally` workspace. Loaded datasets are returned as a
//! [`tally::Dataset`] with named features, named label columns and named classes.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * [`cars`]: the stolen cars dataset, three binary features and a binary label
//!
//! along with a [`NominalCsv`] loader for arbitrary nominal CSV files and the
//! [`generate`] module for seeded random datasets.
//!
//! ## Using a dataset
//!
//! ```
//! use tally::prelude::*;
//!
//! let (train, valid) = tally_datasets::cars().split_with_ratio(0.8);
//! assert_eq!(train.nsamples(), 8);
//! assert_eq!(valid.nsamples(), 2);
//! ```

pub mod generate;
mod nominal;

pub use nominal::{DatasetError, NominalCsv};

use tally::Dataset;

/// Read in the stolen cars dataset
///
/// Ten cars described by `Color {Yellow, Red}`, `Type {Sports, SUV}` and
/// `Origin {Imported, Domestic}`, labelled with `Stolen {No, Yes}`.
pub fn cars() -> Dataset {
    let data = include_bytes!("../data/cars.csv");

    NominalCsv::new()
        .feature("Color", &["Yellow", "Red"])
        .feature("Type", &["Sports", "SUV"])
        .feature("Origin", &["Imported", "Domestic"])
        .target("Stolen", &["No", "Yes"])
        .read(&data[..])
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tally::prelude::*;

    #[test]
    fn test_cars() -> Result<()> {
        let ds = cars();

        assert_eq!(ds.records().values().dim(), (10, 3));
        assert_eq!(ds.records().value_counts(), array![2, 2, 2]);
        assert_eq!(ds.feature_names(), vec!["Color", "Type", "Origin"]);
        assert_eq!(ds.target_names(), vec!["Stolen"]);
        assert_eq!(ds.class_names(0)?, vec!["No", "Yes"]);

        assert_eq!(ds.records().row(0), array![1, 0, 1]);
        assert_eq!(ds.records().row(4), array![0, 0, 0]);
        assert_eq!(ds.labels(0)?, array![1usize, 0, 1, 0, 1, 0, 1, 0, 0, 1]);

        Ok(())
    }
}

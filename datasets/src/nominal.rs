use std::io::Read;

use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use tally::{Dataset, ValueCountedMatrix};
use thiserror::Error;

/// Errors of the nominal CSV loader
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("csv error {0}")]
    Csv(#[from] csv::Error),
    #[error("column {0} not found in header")]
    MissingColumn(String),
    #[error("value {value:?} is not part of the vocabulary of column {column}")]
    UnknownValue { column: String, value: String },
    #[error("column {0} has no values to infer a vocabulary from")]
    EmptyColumn(String),
    #[error(transparent)]
    BaseCrate(#[from] tally::Error),
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    vocabulary: Vec<String>,
    inferred: bool,
}

impl Column {
    fn new<S: Into<String>>(name: S, vocabulary: &[&str]) -> Self {
        Column {
            name: name.into(),
            vocabulary: vocabulary.iter().map(|v| v.to_string()).collect(),
            inferred: vocabulary.is_empty(),
        }
    }

    fn encode(&mut self, value: &str) -> Result<usize, DatasetError> {
        if let Some(idx) = self.vocabulary.iter().position(|v| v == value) {
            return Ok(idx);
        }

        if self.inferred {
            self.vocabulary.push(value.to_string());
            Ok(self.vocabulary.len() - 1)
        } else {
            Err(DatasetError::UnknownValue {
                column: self.name.clone(),
                value: value.to_string(),
            })
        }
    }
}

/// Loader of nominal CSV files
///
/// Every selected column is encoded into value indices. A column with a declared vocabulary maps
/// its values in declaration order and rejects anything else, a column declared with an empty
/// vocabulary infers one in order of first appearance. Without any declared feature column all
/// non-target columns become inferred features.
///
/// ```rust
/// use tally_datasets::NominalCsv;
///
/// let csv = "size,colour,edible\nsmall,red,no\nlarge,green,yes\nsmall,green,yes\n";
/// let dataset = NominalCsv::new()
///     .feature("size", &["small", "large"])
///     .feature("colour", &[])
///     .target("edible", &["no", "yes"])
///     .read(csv.as_bytes())?;
///
/// assert_eq!(dataset.records().value_counts().to_vec(), vec![2, 2]);
/// assert_eq!(dataset.class_names(0)?, vec!["no", "yes"]);
/// # Ok::<(), tally_datasets::DatasetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NominalCsv {
    delimiter: u8,
    features: Vec<Column>,
    targets: Vec<Column>,
}

impl Default for NominalCsv {
    fn default() -> Self {
        Self::new()
    }
}

impl NominalCsv {
    pub fn new() -> Self {
        NominalCsv {
            delimiter: b',',
            features: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Field delimiter, defaults to `,`
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Select a feature column, an empty vocabulary is inferred from the data
    pub fn feature<S: Into<String>>(mut self, name: S, vocabulary: &[&str]) -> Self {
        self.features.push(Column::new(name, vocabulary));
        self
    }

    /// Select a label column, an empty vocabulary is inferred from the data
    pub fn target<S: Into<String>>(mut self, name: S, vocabulary: &[&str]) -> Self {
        self.targets.push(Column::new(name, vocabulary));
        self
    }

    /// Read a CSV file with header into a dataset
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset, DatasetError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let position = |column: &Column| {
            headers
                .iter()
                .position(|h| h == column.name)
                .ok_or_else(|| DatasetError::MissingColumn(column.name.clone()))
        };

        let mut targets = self.targets.clone();
        let target_idx = targets.iter().map(position).collect::<Result<Vec<_>, _>>()?;

        let mut features = if self.features.is_empty() {
            headers
                .iter()
                .enumerate()
                .filter(|(idx, _)| !target_idx.contains(idx))
                .map(|(_, name)| Column::new(name, &[]))
                .collect()
        } else {
            self.features.clone()
        };
        let feature_idx = features.iter().map(position).collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::new();
        let mut labels = Vec::new();
        let mut nrows = 0;

        for record in reader.records() {
            let record = record?;

            for (column, &idx) in features.iter_mut().zip(feature_idx.iter()) {
                values.push(column.encode(record.get(idx).unwrap_or_default())?);
            }
            for (column, &idx) in targets.iter_mut().zip(target_idx.iter()) {
                labels.push(column.encode(record.get(idx).unwrap_or_default())?);
            }

            nrows += 1;
        }

        if let Some(column) = features
            .iter()
            .chain(targets.iter())
            .find(|column| column.vocabulary.is_empty())
        {
            return Err(DatasetError::EmptyColumn(column.name.clone()));
        }

        let value_counts = features.iter().map(|c| c.vocabulary.len()).collect();
        let values = Array2::from_shape_vec((nrows, features.len()), values)
            .map_err(tally::Error::from)?;
        let labels = Array2::from_shape_vec((nrows, targets.len()), labels)
            .map_err(tally::Error::from)?;

        let records = ValueCountedMatrix::new(values, value_counts)?;
        let mut dataset = Dataset::new(records, labels)?
            .with_feature_names(features.iter().map(|c| c.name.clone()).collect())
            .with_target_names(targets.iter().map(|c| c.name.clone()).collect());

        for (target, column) in targets.into_iter().enumerate() {
            dataset = dataset.with_target_class_names(target, column.vocabulary)?;
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::{DatasetError, NominalCsv};
    use ndarray::array;
    use tally::prelude::*;

    const CSV: &str = "a;b;label\nx;1;no\ny;2;yes\nx;3;yes\n";

    #[test]
    fn infers_vocabularies_in_order_of_appearance() -> std::result::Result<(), DatasetError> {
        let dataset = NominalCsv::new()
            .delimiter(b';')
            .target("label", &[])
            .read(CSV.as_bytes())?;

        assert_eq!(dataset.feature_names(), vec!["a", "b"]);
        assert_eq!(dataset.records().values(), array![[0, 0], [1, 1], [0, 2]]);
        assert_eq!(dataset.records().value_counts(), array![2, 3]);
        assert_eq!(dataset.labels(0)?, array![0usize, 1, 1]);
        assert_eq!(dataset.class_names(0)?, vec!["no", "yes"]);
        assert_eq!(dataset.target_names(), vec!["label"]);

        Ok(())
    }

    #[test]
    fn declared_vocabularies_fix_the_order() -> std::result::Result<(), DatasetError> {
        let dataset = NominalCsv::new()
            .delimiter(b';')
            .feature("a", &["y", "x", "z"])
            .target("label", &["yes", "no"])
            .read(CSV.as_bytes())?;

        assert_eq!(dataset.nfeatures(), 1);
        assert_eq!(dataset.records().values(), array![[1], [0], [1]]);
        assert_eq!(dataset.records().value_counts(), array![3]);
        assert_eq!(dataset.labels(0)?, array![1usize, 0, 0]);

        Ok(())
    }

    #[test]
    fn loader_errors() {
        let res = NominalCsv::new()
            .delimiter(b';')
            .feature("a", &["x"])
            .target("label", &[])
            .read(CSV.as_bytes());
        assert!(matches!(
            res,
            Err(DatasetError::UnknownValue { ref column, ref value }) if column == "a" && value == "y"
        ));

        let res = NominalCsv::new()
            .delimiter(b';')
            .target("missing", &[])
            .read(CSV.as_bytes());
        assert!(matches!(res, Err(DatasetError::MissingColumn(ref c)) if c == "missing"));

        let res = NominalCsv::new()
            .target("label", &[])
            .read("a,label\n".as_bytes());
        assert!(matches!(res, Err(DatasetError::EmptyColumn(_))));
    }
}

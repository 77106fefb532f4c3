//! Dataset port: Trait for loading the labelled training data.

use std::path::PathBuf;

use crate::domain::HeartDataset;

/// Errors raised while reading the training dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: label {value} must be 0 or 1")]
    InvalidLabel { row: usize, value: u8 },

    #[error("Row {row}: column {column} is not a finite number")]
    NonFinite { row: usize, column: &'static str },

    #[error("Dataset contains no rows")]
    Empty,
}

/// Source of the labelled heart-disease dataset.
pub trait DatasetSource {
    /// Load every record.
    ///
    /// # Errors
    /// Returns `DatasetError` if the data cannot be read or fails schema checks.
    fn load(&self) -> Result<HeartDataset, DatasetError>;
}

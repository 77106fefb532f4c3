//! CSV adapter: Implementation of DatasetSource using the `csv` crate.
//!
//! Expects a header row naming the thirteen feature columns plus `target`.
//! Columns are matched by name, so their order in the file is irrelevant.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::{HeartDataset, HeartRecord, FEATURE_NAMES};
use crate::ports::{DatasetError, DatasetSource};

/// Reads the heart-disease dataset from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse records from any reader.
    ///
    /// # Errors
    /// Returns `DatasetError` on malformed rows, bad labels or an empty file.
    pub fn read_from<R: std::io::Read>(reader: R) -> Result<HeartDataset, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<HeartRecord>().enumerate() {
            // 1-based data row number, header excluded
            let row_number = idx + 1;
            let record = row?;

            if record.target > 1 {
                return Err(DatasetError::InvalidLabel {
                    row: row_number,
                    value: record.target,
                });
            }

            if let Some(column) = first_non_finite(&record) {
                return Err(DatasetError::NonFinite {
                    row: row_number,
                    column,
                });
            }

            records.push(record);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(HeartDataset::new(records))
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<HeartDataset, DatasetError> {
        tracing::info!("Loading dataset from {:?}", self.path);

        let file = File::open(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        })?;
        let dataset = Self::read_from(file)?;

        tracing::info!(
            "Loaded {} rows ({} positive)",
            dataset.len(),
            dataset.positive_count()
        );
        Ok(dataset)
    }
}

fn first_non_finite(record: &HeartRecord) -> Option<&'static str> {
    record
        .features()
        .to_vec()
        .into_iter()
        .zip(FEATURE_NAMES)
        .find(|(value, _)| !value.is_finite())
        .map(|(_, name)| name)
}

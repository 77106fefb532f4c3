//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `csv_dataset`: `csv` + serde for the training file
//! - `logistic`: ndarray-backed logistic regression
//! - `sanitize`: clinical-value redaction for logs

pub mod csv_dataset;
pub mod logistic;
pub mod sanitize;

pub use csv_dataset::CsvDatasetSource;
pub use logistic::{LogisticModel, LogisticRegression};

//! # heartscope
//!
//! Heart-disease risk prediction from thirteen clinical measurements.
//!
//! This crate provides:
//! - CSV loading of the UCI heart-disease dataset
//! - A logistic-regression classifier fit once at startup with a seeded holdout split
//! - Terminal UI with a predictor form and an about page
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientFeatures, Prediction, HoldoutReport, HeartDataset)
//! - `ports`: Trait definitions for the dataset source and the classifier
//! - `adapters`: Concrete implementations (csv reader, logistic regression, log redaction)
//! - `application`: Use cases orchestrating domain and ports (training, prediction)
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{HoldoutReport, PatientFeatures, Prediction, Verdict};

/// Result type for heartscope operations
pub type Result<T> = std::result::Result<T, HeartscopeError>;

/// Main error type for heartscope
#[derive(Debug, thiserror::Error)]
pub enum HeartscopeError {
    #[error("Dataset could not be loaded: {0}")]
    Dataset(#[from] ports::DatasetError),

    #[error("Model operation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Invalid patient data: {0}")]
    Validation(String),
}

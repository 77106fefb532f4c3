//! Domain layer: Core types and logic.
//!
//! Plain Rust types describing patients, the training dataset, predictions
//! and holdout evaluation. No I/O happens here.

mod dataset;
mod evaluation;
mod patient;
mod prediction;

pub use dataset::{HeartDataset, HeartRecord};
pub use evaluation::{ClassMetrics, HoldoutReport};
pub use patient::{
    round_to, FeatureKind, FeatureSpec, PatientFeatures, FEATURE_COUNT, FEATURE_NAMES,
    FEATURE_SPECS,
};
pub use prediction::{Prediction, Verdict};

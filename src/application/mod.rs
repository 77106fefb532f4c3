//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the two use cases of the application: train once, then predict.

mod prediction;
mod training;

pub use prediction::PredictionService;
pub use training::{
    holdout_split, HoldoutSplit, ModelTrainer, TrainedModel, TrainingOptions,
    DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION,
};

//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (dataset files, the ML model).

mod classifier;
mod dataset;

pub use classifier::{Classifier, ModelError};
pub use dataset::{DatasetError, DatasetSource};

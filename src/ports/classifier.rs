//! Classifier port: Trait for scoring a feature vector.
//!
//! This trait abstracts the fitted model from the application logic.

use crate::domain::Prediction;

/// Errors raised while fitting or scoring a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCount { expected: usize, got: usize },

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Training labels must contain both classes")]
    SingleClass,

    #[error("Training inputs and labels have different lengths ({rows} rows, {labels} labels)")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("Solver failed: {0}")]
    Solver(String),
}

/// Trait for binary classifiers.
///
/// Implementations are immutable once built and safe to share across threads.
pub trait Classifier: Send + Sync {
    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    /// Signed score for one feature vector; positive means the positive class.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `features` has the wrong width.
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Map a decision score to the positive-class probability.
    fn link(&self, score: f64) -> f64;

    /// Score one feature vector into a label and probability.
    ///
    /// The label follows the sign of the decision score, so a score that
    /// rounds to probability 0.5 still keeps its class.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `features` has the wrong width.
    fn predict(&self, features: &[f64]) -> Result<Prediction, ModelError> {
        let score = self.decision_function(features)?;
        Ok(Prediction::new(score > 0.0, self.link(score)))
    }
}

//! Prediction service: Scores form input against the trained model.

use std::sync::Arc;

use crate::adapters::LogisticModel;
use crate::application::TrainedModel;
use crate::domain::{HoldoutReport, PatientFeatures, Prediction};
use crate::ports::Classifier;
use crate::HeartscopeError;

/// Service for scoring patients with a model trained at startup.
///
/// The classifier is shared read-only; the holdout report is fixed for the
/// lifetime of the service, so the accuracy caption never changes between
/// predictions.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    report: HoldoutReport,
    train_rows: usize,
    test_rows: usize,
}

impl<C> Clone for PredictionService<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            report: self.report,
            train_rows: self.train_rows,
            test_rows: self.test_rows,
        }
    }
}

impl PredictionService<LogisticModel> {
    /// Wrap the output of `ModelTrainer::train`.
    #[must_use]
    pub fn from_trained(trained: TrainedModel) -> Self {
        Self {
            classifier: Arc::new(trained.model),
            report: trained.report,
            train_rows: trained.train_rows,
            test_rows: trained.test_rows,
        }
    }
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>, report: HoldoutReport) -> Self {
        let test_rows = report.support();
        Self {
            classifier,
            report,
            train_rows: 0,
            test_rows,
        }
    }

    /// Score one patient.
    ///
    /// # Errors
    /// Returns error if the features fall outside their declared domains or
    /// the classifier rejects the vector.
    pub fn predict(&self, features: &PatientFeatures) -> Result<Prediction, HeartscopeError> {
        if let Err(errors) = features.validate() {
            return Err(HeartscopeError::Validation(errors.join(", ")));
        }

        let prediction = self.classifier.predict(&features.to_vec())?;

        tracing::info!(
            "Prediction complete: label={}, probability={:.4}",
            prediction.label,
            prediction.probability
        );

        Ok(prediction)
    }

    #[must_use]
    pub fn report(&self) -> &HoldoutReport {
        &self.report
    }

    /// Holdout accuracy computed at startup.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.report.accuracy
    }

    #[must_use]
    pub fn accuracy_caption(&self) -> String {
        self.report.accuracy_caption()
    }

    /// Rows used for fitting (0 when built from a bare classifier).
    #[must_use]
    pub fn train_rows(&self) -> usize {
        self.train_rows
    }

    #[must_use]
    pub fn test_rows(&self) -> usize {
        self.test_rows
    }
}

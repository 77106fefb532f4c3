//! Training service: Fits the classifier once at startup.
//!
//! This service coordinates:
//! - Dataset loading through a `DatasetSource`
//! - A seeded, reproducible holdout split
//! - Logistic regression fitting on the training partition
//! - Holdout evaluation

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::adapters::{LogisticModel, LogisticRegression};
use crate::domain::{HeartDataset, HoldoutReport};
use crate::ports::{Classifier, DatasetSource};
use crate::HeartscopeError;

/// Default share of rows withheld for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.4;

/// Default shuffle seed for the holdout split.
pub const DEFAULT_SPLIT_SEED: u64 = 101;

/// Settings for a training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingOptions {
    pub test_fraction: f64,
    pub seed: u64,
    pub solver: LogisticRegression,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
            solver: LogisticRegression::default(),
        }
    }
}

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded RNG and withhold `ceil(n_rows * test_fraction)` rows.
///
/// When `n_rows >= 2` both partitions keep at least one row.
#[must_use]
pub fn holdout_split(n_rows: usize, test_fraction: f64, seed: u64) -> HoldoutSplit {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_test = (n_rows as f64 * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    if n_rows >= 2 {
        n_test = n_test.clamp(1, n_rows - 1);
    }

    let train = indices.split_off(n_test.min(n_rows));
    HoldoutSplit {
        train,
        test: indices,
    }
}

/// The fitted model together with its holdout evaluation.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub model: LogisticModel,
    pub report: HoldoutReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Service that turns a dataset into a `TrainedModel`.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    options: TrainingOptions,
}

impl ModelTrainer {
    /// Create a trainer with the given options.
    #[must_use]
    pub fn new(options: TrainingOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    /// Load from `source`, then train.
    ///
    /// # Errors
    /// Returns error if loading, fitting or evaluation fails.
    pub fn train_from<S: DatasetSource>(&self, source: &S) -> Result<TrainedModel, HeartscopeError> {
        let dataset = source.load()?;
        self.train(&dataset)
    }

    /// Split, fit on the training partition and evaluate on the holdout.
    ///
    /// # Errors
    /// Returns error if the dataset is too small or fitting fails.
    pub fn train(&self, dataset: &HeartDataset) -> Result<TrainedModel, HeartscopeError> {
        if dataset.len() < 2 {
            return Err(HeartscopeError::Validation(format!(
                "Need at least 2 rows to split, got {}",
                dataset.len()
            )));
        }

        let split = holdout_split(dataset.len(), self.options.test_fraction, self.options.seed);
        tracing::info!(
            "Holdout split: {} training rows, {} test rows (seed {})",
            split.train.len(),
            split.test.len(),
            self.options.seed
        );

        let x_train = dataset.features_matrix(&split.train);
        let y_train = dataset.labels(&split.train);
        let model = self.options.solver.fit(&x_train, &y_train)?;
        tracing::info!(
            "Model fit in {} iterations (converged: {})",
            model.iterations(),
            model.converged()
        );

        let report = evaluate(&model, dataset, &split.test)?;
        tracing::info!("Holdout accuracy: {:.4}", report.accuracy);

        Ok(TrainedModel {
            model,
            report,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
        })
    }
}

fn evaluate<C: Classifier>(
    model: &C,
    dataset: &HeartDataset,
    rows: &[usize],
) -> Result<HoldoutReport, HeartscopeError> {
    let records = dataset.records();
    let mut truth = Vec::with_capacity(rows.len());
    let mut predicted = Vec::with_capacity(rows.len());

    for &idx in rows {
        let record = &records[idx];
        let prediction = model.predict(&record.features().to_vec())?;
        truth.push(record.target);
        predicted.push(prediction.label);
    }

    Ok(HoldoutReport::from_labels(&truth, &predicted))
}

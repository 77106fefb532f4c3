//! Training dataset types.

use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::patient::{PatientFeatures, FEATURE_COUNT};

/// One labelled row of the heart-disease CSV.
///
/// Columns are matched by header name; extra columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeartRecord {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,

    /// 1 = disease present, 0 = absent
    pub target: u8,
}

impl HeartRecord {
    /// Build a labelled record from patient features.
    #[must_use]
    pub fn new(features: PatientFeatures, target: u8) -> Self {
        Self {
            age: features.age,
            sex: features.sex,
            cp: features.cp,
            trestbps: features.trestbps,
            chol: features.chol,
            fbs: features.fbs,
            restecg: features.restecg,
            thalach: features.thalach,
            exang: features.exang,
            oldpeak: features.oldpeak,
            slope: features.slope,
            ca: features.ca,
            thal: features.thal,
            target,
        }
    }

    #[must_use]
    pub fn features(&self) -> PatientFeatures {
        PatientFeatures {
            age: self.age,
            sex: self.sex,
            cp: self.cp,
            trestbps: self.trestbps,
            chol: self.chol,
            fbs: self.fbs,
            restecg: self.restecg,
            thalach: self.thalach,
            exang: self.exang,
            oldpeak: self.oldpeak,
            slope: self.slope,
            ca: self.ca,
            thal: self.thal,
        }
    }
}

/// The full labelled dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct HeartDataset {
    records: Vec<HeartRecord>,
}

impl HeartDataset {
    #[must_use]
    pub fn new(records: Vec<HeartRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[HeartRecord] {
        &self.records
    }

    /// Number of rows labelled disease-present.
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.records.iter().filter(|r| r.target == 1).count()
    }

    /// Design matrix for the selected rows (one row per index, model column order).
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn features_matrix(&self, rows: &[usize]) -> Array2<f64> {
        let mut x = Array2::zeros((rows.len(), FEATURE_COUNT));
        for (out_row, &idx) in rows.iter().enumerate() {
            for (col, value) in self.records[idx].features().to_vec().into_iter().enumerate() {
                x[[out_row, col]] = value;
            }
        }
        x
    }

    /// Labels (0.0 / 1.0) for the selected rows.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn labels(&self, rows: &[usize]) -> Array1<f64> {
        rows.iter()
            .map(|&idx| f64::from(self.records[idx].target))
            .collect()
    }
}

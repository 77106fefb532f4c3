//! Patient feature types for heart-disease risk prediction.
//!
//! Based on the UCI Heart Disease dataset (Cleveland subset, 13 attributes).

use serde::{Deserialize, Serialize};

/// Number of clinical features the classifier consumes.
pub const FEATURE_COUNT: usize = 13;

/// Column names, in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Clinical features for one patient.
///
/// Field order matches [`FEATURE_NAMES`] and the training CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientFeatures {
    /// Age in years
    pub age: f64,

    /// 1 = male, 0 = female
    pub sex: f64,

    /// Chest pain type (0-3)
    pub cp: f64,

    /// Resting blood pressure in mm Hg
    pub trestbps: f64,

    /// Serum cholesterol in mg/dl
    pub chol: f64,

    /// Fasting blood sugar > 120 mg/dl (1 = true, 0 = false)
    pub fbs: f64,

    /// Resting ECG result (0-2)
    pub restecg: f64,

    /// Maximum heart rate achieved
    pub thalach: f64,

    /// Exercise-induced angina (1 = yes, 0 = no)
    pub exang: f64,

    /// ST depression induced by exercise relative to rest
    pub oldpeak: f64,

    /// Slope of the peak exercise ST segment (0-2)
    pub slope: f64,

    /// Number of major vessels colored by fluoroscopy (0-3)
    pub ca: f64,

    /// Thalium stress test result (0-3)
    pub thal: f64,
}

impl PatientFeatures {
    /// Convert features to a vector for inference, in model order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
        ]
    }

    /// Create features from a fixed-width array in model order.
    #[must_use]
    pub fn from_array(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            age: v[0],
            sex: v[1],
            cp: v[2],
            trestbps: v[3],
            chol: v[4],
            fbs: v[5],
            restecg: v[6],
            thalach: v[7],
            exang: v[8],
            oldpeak: v[9],
            slope: v[10],
            ca: v[11],
            thal: v[12],
        }
    }

    /// Every field at its form default.
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_array(std::array::from_fn(|i| FEATURE_SPECS[i].default))
    }

    /// Every field at the lowest value its control allows.
    #[must_use]
    pub fn minimums() -> Self {
        Self::from_array(std::array::from_fn(|i| FEATURE_SPECS[i].kind.min()))
    }

    /// Every field at the highest value its control allows.
    #[must_use]
    pub fn maximums() -> Self {
        Self::from_array(std::array::from_fn(|i| FEATURE_SPECS[i].kind.max()))
    }

    /// Check every feature against its declared domain.
    ///
    /// The form cannot produce out-of-domain values; this guards programmatic callers.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = FEATURE_SPECS
            .iter()
            .zip(self.to_vec())
            .filter(|(spec, value)| !spec.kind.admits(*value))
            .map(|(spec, value)| format!("{} {} {}", spec.label, value, spec.kind.describe()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for PatientFeatures {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Domain of a single input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    /// Bounded numeric entry with a step size.
    Numeric {
        min: f64,
        max: f64,
        step: f64,
        decimals: usize,
    },
    /// One of a fixed set of integer codes, each with a display label.
    Categorical(&'static [(i64, &'static str)]),
}

impl FeatureKind {
    #[must_use]
    pub fn min(&self) -> f64 {
        match self {
            Self::Numeric { min, .. } => *min,
            Self::Categorical(options) => options.first().map_or(0.0, |(code, _)| *code as f64),
        }
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        match self {
            Self::Numeric { max, .. } => *max,
            Self::Categorical(options) => options.last().map_or(0.0, |(code, _)| *code as f64),
        }
    }

    /// Whether `value` lies inside this domain.
    #[must_use]
    pub fn admits(&self, value: f64) -> bool {
        match self {
            Self::Numeric { min, max, .. } => (*min..=*max).contains(&value),
            Self::Categorical(options) => options.iter().any(|(code, _)| *code as f64 == value),
        }
    }

    /// Clamp into range and round to the control's precision.
    ///
    /// Categorical values snap to the nearest code.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            Self::Numeric {
                min, max, decimals, ..
            } => round_to(value.clamp(*min, *max), *decimals),
            Self::Categorical(options) => options
                .iter()
                .map(|(code, _)| *code as f64)
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
                .unwrap_or(value),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Numeric { min, max, .. } => format!("out of range [{min}, {max}]"),
            Self::Categorical(options) => {
                let codes: Vec<String> = options.iter().map(|(c, _)| c.to_string()).collect();
                format!("must be one of {}", codes.join(", "))
            }
        }
    }
}

/// Round to a fixed number of decimals.
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// CSV column name
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Longer description (about page)
    pub description: &'static str,
    pub kind: FeatureKind,
    pub default: f64,
}

const BINARY_SEX: &[(i64, &str)] = &[(0, "Female"), (1, "Male")];
const BINARY_YES_NO: &[(i64, &str)] = &[(0, "No"), (1, "Yes")];
const CODES_0_TO_2: &[(i64, &str)] = &[(0, "0"), (1, "1"), (2, "2")];
const CODES_0_TO_3: &[(i64, &str)] = &[(0, "0"), (1, "1"), (2, "2"), (3, "3")];

/// Form controls, in model order.
pub const FEATURE_SPECS: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        name: "age",
        label: "Age",
        description: "Age in years",
        kind: FeatureKind::Numeric { min: 1.0, max: 120.0, step: 1.0, decimals: 0 },
        default: 40.0,
    },
    FeatureSpec {
        name: "sex",
        label: "Sex",
        description: "1 = Male, 0 = Female",
        kind: FeatureKind::Categorical(BINARY_SEX),
        default: 0.0,
    },
    FeatureSpec {
        name: "cp",
        label: "Chest Pain Type",
        description: "Chest pain type (0-3)",
        kind: FeatureKind::Categorical(CODES_0_TO_3),
        default: 0.0,
    },
    FeatureSpec {
        name: "trestbps",
        label: "Resting BP (mm Hg)",
        description: "Resting blood pressure (mm Hg)",
        kind: FeatureKind::Numeric { min: 80.0, max: 200.0, step: 1.0, decimals: 0 },
        default: 120.0,
    },
    FeatureSpec {
        name: "chol",
        label: "Cholesterol (mg/dl)",
        description: "Serum cholesterol (mg/dl)",
        kind: FeatureKind::Numeric { min: 100.0, max: 600.0, step: 1.0, decimals: 0 },
        default: 200.0,
    },
    FeatureSpec {
        name: "fbs",
        label: "Fasting Blood Sugar > 120 mg/dl?",
        description: "Fasting blood sugar > 120 mg/dl (1 = true; 0 = false)",
        kind: FeatureKind::Categorical(BINARY_YES_NO),
        default: 0.0,
    },
    FeatureSpec {
        name: "restecg",
        label: "Resting ECG Results",
        description: "Resting ECG results (0-2)",
        kind: FeatureKind::Categorical(CODES_0_TO_2),
        default: 0.0,
    },
    FeatureSpec {
        name: "thalach",
        label: "Max Heart Rate",
        description: "Maximum heart rate achieved",
        kind: FeatureKind::Numeric { min: 60.0, max: 250.0, step: 1.0, decimals: 0 },
        default: 150.0,
    },
    FeatureSpec {
        name: "exang",
        label: "Exercise Induced Angina",
        description: "Exercise-induced angina (1 = yes; 0 = no)",
        kind: FeatureKind::Categorical(BINARY_YES_NO),
        default: 0.0,
    },
    FeatureSpec {
        name: "oldpeak",
        label: "ST Depression (oldpeak)",
        description: "ST depression induced by exercise relative to rest",
        kind: FeatureKind::Numeric { min: 0.0, max: 10.0, step: 0.1, decimals: 1 },
        default: 1.0,
    },
    FeatureSpec {
        name: "slope",
        label: "Slope of Peak Exercise ST Segment",
        description: "Slope of peak exercise ST segment (0-2)",
        kind: FeatureKind::Categorical(CODES_0_TO_2),
        default: 0.0,
    },
    FeatureSpec {
        name: "ca",
        label: "No. of Major Vessels (0-3)",
        description: "Number of major vessels (0-3) colored by fluoroscopy",
        kind: FeatureKind::Categorical(CODES_0_TO_3),
        default: 0.0,
    },
    FeatureSpec {
        name: "thal",
        label: "Thalium Stress Test Result",
        description: "Thalium stress test result (0-3)",
        kind: FeatureKind::Categorical(CODES_0_TO_3),
        default: 0.0,
    },
];

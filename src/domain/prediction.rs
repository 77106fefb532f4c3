//! Prediction result types.
//!
//! Represents the output of scoring one patient with the trained classifier.

use serde::{Deserialize, Serialize};

/// Binary outcome shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Model predicts presence of heart disease (label 1)
    Disease,
    /// Model predicts absence of heart disease (label 0)
    NoDisease,
}

impl Verdict {
    /// Get a short human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Disease => "presence of heart disease",
            Self::NoDisease => "no heart disease",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Disease => (244, 63, 94),    // Rose (#F43F5E)
            Self::NoDisease => (16, 185, 129), // Emerald (#10B981)
        }
    }
}

/// Result of scoring one query record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class (0 = no disease, 1 = disease present)
    pub label: u8,

    /// Probability of the positive class (0.0 to 1.0)
    pub probability: f64,
}

impl Prediction {
    /// Build a prediction from the classifier's decision and probability.
    ///
    /// The probability is clamped into [0, 1].
    #[must_use]
    pub fn new(positive: bool, probability: f64) -> Self {
        Self {
            label: u8::from(positive),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.label == 1 {
            Verdict::Disease
        } else {
            Verdict::NoDisease
        }
    }

    /// Probability of the predicted class.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        match self.verdict() {
            Verdict::Disease => self.probability,
            Verdict::NoDisease => 1.0 - self.probability,
        }
    }

    /// Progress-gauge fill, 0-100, truncating toward zero.
    #[must_use]
    pub fn gauge_percent(&self) -> u16 {
        (self.probability * 100.0).clamp(0.0, 100.0) as u16
    }

    /// Verdict sentence annotated with the confidence percentage.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "The model predicts {} ({:.2}% confidence).",
            self.verdict().description(),
            self.confidence() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_comes_from_decision() {
        assert_eq!(Prediction::new(true, 0.5).label, 1);
        assert_eq!(Prediction::new(false, 0.5).label, 0);
        assert!((Prediction::new(true, 1.5).probability - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_positive_message_uses_probability() {
        let p = Prediction::new(true, 0.8312);
        assert_eq!(p.verdict(), Verdict::Disease);
        assert_eq!(
            p.message(),
            "The model predicts presence of heart disease (83.12% confidence)."
        );
        assert_eq!(p.gauge_percent(), 83);
    }

    #[test]
    fn test_negative_message_uses_complement() {
        let p = Prediction::new(false, 0.25);
        assert_eq!(p.verdict(), Verdict::NoDisease);
        assert!((p.confidence() - 0.75).abs() < 1e-12);
        assert_eq!(p.message(), "The model predicts no heart disease (75.00% confidence).");
        assert_eq!(p.gauge_percent(), 25);
    }

    #[test]
    fn test_gauge_bounds() {
        assert_eq!(Prediction::new(true, 1.0).gauge_percent(), 100);
        assert_eq!(Prediction::new(false, 0.0).gauge_percent(), 0);
        assert_eq!(Prediction::new(true, 0.999).gauge_percent(), 99);
    }
}

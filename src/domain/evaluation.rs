//! Holdout evaluation metrics.
//!
//! Mirrors a binary classification report: accuracy plus precision, recall,
//! F1 and support for each class.

use serde::{Deserialize, Serialize};

/// Per-class metrics over the holdout partition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of holdout rows whose true label is this class
    pub support: usize,
}

/// Evaluation of the trained model on the rows withheld from training.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoldoutReport {
    /// Fraction of holdout rows predicted correctly (0.0 to 1.0)
    pub accuracy: f64,
    /// Metrics for label 0 (no disease)
    pub negative: ClassMetrics,
    /// Metrics for label 1 (disease present)
    pub positive: ClassMetrics,
}

impl HoldoutReport {
    /// Build the report from true and predicted labels.
    ///
    /// Undefined ratios (zero denominators) are reported as 0.0.
    #[must_use]
    pub fn from_labels(truth: &[u8], predicted: &[u8]) -> Self {
        let total = truth.len().min(predicted.len());
        if total == 0 {
            return Self::default();
        }

        let mut confusion = [[0usize; 2]; 2];
        for (&t, &p) in truth.iter().zip(predicted) {
            confusion[usize::from(t.min(1))][usize::from(p.min(1))] += 1;
        }

        let correct = confusion[0][0] + confusion[1][1];

        Self {
            accuracy: correct as f64 / total as f64,
            negative: class_metrics(&confusion, 0),
            positive: class_metrics(&confusion, 1),
        }
    }

    /// Holdout row count.
    #[must_use]
    pub fn support(&self) -> usize {
        self.negative.support + self.positive.support
    }

    /// Caption shown under every prediction.
    #[must_use]
    pub fn accuracy_caption(&self) -> String {
        format!("Model tested accuracy: {:.2}%", self.accuracy * 100.0)
    }
}

fn class_metrics(confusion: &[[usize; 2]; 2], class: usize) -> ClassMetrics {
    let other = 1 - class;
    let tp = confusion[class][class];
    let false_neg = confusion[class][other];
    let false_pos = confusion[other][class];

    let precision = ratio(tp, tp + false_pos);
    let recall = ratio(tp, tp + false_neg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support: tp + false_neg,
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_labels() {
        // tn=2, fp=1, fn=1, tp=4
        let truth = [0, 0, 0, 1, 1, 1, 1, 1];
        let predicted = [0, 0, 1, 0, 1, 1, 1, 1];

        let report = HoldoutReport::from_labels(&truth, &predicted);
        assert!((report.accuracy - 0.75).abs() < 1e-12);
        assert_eq!(report.negative.support, 3);
        assert_eq!(report.positive.support, 5);
        assert_eq!(report.support(), 8);
        assert!((report.positive.precision - 0.8).abs() < 1e-12);
        assert!((report.positive.recall - 0.8).abs() < 1e-12);
        assert!((report.negative.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.negative.recall - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_predictions_do_not_divide_by_zero() {
        let report = HoldoutReport::from_labels(&[1, 1, 0], &[0, 0, 0]);
        assert!((report.positive.precision - 0.0).abs() < f64::EPSILON);
        assert!((report.positive.f1 - 0.0).abs() < f64::EPSILON);
        assert!((report.accuracy - 1.0 / 3.0).abs() < 1e-12);

        assert_eq!(HoldoutReport::from_labels(&[], &[]), HoldoutReport::default());
    }

    #[test]
    fn test_accuracy_caption() {
        let report = HoldoutReport {
            accuracy: 0.852459,
            ..Default::default()
        };
        assert_eq!(report.accuracy_caption(), "Model tested accuracy: 85.25%");
    }
}

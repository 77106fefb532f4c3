//! Logistic regression adapter: Implementation of Classifier.
//!
//! Fits an L2-regularised binary logistic regression on raw (unscaled)
//! features. The objective is
//!
//! `sum_i logloss(y_i, sigmoid(w·x_i + b)) + ||w||² / (2C)`
//!
//! with the intercept `b` left unpenalised. It is minimised with a damped
//! Newton method: the Hessian is small (features + 1 square), so each step is
//! an exact Cholesky solve followed by a backtracking line search on the
//! objective. Training is fully deterministic.

mod solver;

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::ports::{Classifier, ModelError};

/// Armijo sufficient-decrease constant for the line search.
const ARMIJO_C: f64 = 1e-4;

/// Maximum number of step halvings per Newton iteration.
const MAX_HALVINGS: usize = 60;

/// Solver settings.
#[derive(Debug, Clone, Copy)]
pub struct LogisticRegression {
    /// Inverse regularisation strength (larger = weaker penalty)
    pub c: f64,
    /// Newton iteration cap
    pub max_iter: usize,
    /// Stop once the largest absolute mean-gradient component falls below this
    pub tol: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Fitted coefficients. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: Array1<f64>,
    intercept: f64,
    iterations: usize,
    converged: bool,
}

impl LogisticModel {
    /// Build a model from known coefficients.
    #[must_use]
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients: Array1::from(coefficients),
            intercept,
            iterations: 0,
            converged: true,
        }
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        self.coefficients
            .as_slice()
            .unwrap_or_default()
    }

    /// Newton iterations used during fitting.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

}

impl Classifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Raw linear score `w·x + b`.
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.n_features() {
            return Err(ModelError::FeatureCount {
                expected: self.n_features(),
                got: features.len(),
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("query features"));
        }

        Ok(self.coefficients.dot(&ArrayView1::from(features)) + self.intercept)
    }

    fn link(&self, score: f64) -> f64 {
        sigmoid(score)
    }
}

impl LogisticRegression {
    /// Fit on a design matrix `x` (rows = samples) and 0/1 labels `y`.
    ///
    /// # Errors
    /// Returns `ModelError` if inputs are empty, mismatched, non-finite, single-class,
    /// or the Newton system cannot be solved.
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LogisticModel, ModelError> {
        let (n, d) = x.dim();
        if n == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(ModelError::LabelMismatch {
                rows: n,
                labels: y.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("training features"));
        }
        let positives = y.iter().filter(|&&v| v > 0.5).count();
        if positives == 0 || positives == n {
            return Err(ModelError::SingleClass);
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ModelError::Solver(format!("C must be positive, got {}", self.c)));
        }

        // Augment with a trailing column of ones for the intercept.
        let xa = ndarray::concatenate(Axis(1), &[x.view(), Array2::ones((n, 1)).view()])
            .map_err(|e| ModelError::Solver(e.to_string()))?;

        // Penalty applies to coefficients only, never the intercept.
        let mut penalty = Array1::from_elem(d + 1, 1.0 / self.c);
        penalty[d] = 0.0;

        let mut theta = Array1::<f64>::zeros(d + 1);
        let mut loss = objective(&xa, y, &theta, &penalty);
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            iterations = iter + 1;

            let z = xa.dot(&theta);
            let p = z.mapv(sigmoid);
            let grad = xa.t().dot(&(&p - y)) + &penalty * &theta;

            let max_grad = grad.iter().fold(0.0_f64, |m, g| m.max(g.abs())) / n as f64;
            if max_grad <= self.tol {
                converged = true;
                iterations = iter;
                break;
            }

            let w = p.mapv(|pi| pi * (1.0 - pi));
            let weighted = &xa * &w.view().insert_axis(Axis(1));
            let mut hessian = xa.t().dot(&weighted);
            for j in 0..=d {
                hessian[[j, j]] += penalty[j];
            }

            let direction = solver::solve_spd(&hessian, &grad)
                .ok_or_else(|| ModelError::Solver("Hessian is not positive definite".into()))?;
            let slope = grad.dot(&direction);

            // Backtracking line search along -direction.
            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                let candidate = &theta - &(&direction * step);
                let candidate_loss = objective(&xa, y, &candidate, &penalty);
                if candidate_loss.is_finite() && candidate_loss <= loss - ARMIJO_C * step * slope {
                    accepted = Some((candidate, candidate_loss));
                    break;
                }
                step *= 0.5;
            }

            match accepted {
                Some((candidate, candidate_loss)) => {
                    theta = candidate;
                    loss = candidate_loss;
                }
                None => {
                    // No further decrease is representable; treat as converged.
                    tracing::debug!("Line search stalled at iteration {}", iterations);
                    converged = true;
                    break;
                }
            }
        }

        if !converged {
            tracing::warn!(
                "Logistic regression did not converge in {} iterations",
                self.max_iter
            );
        }

        tracing::debug!(
            "Fit finished: iterations={}, objective={:.6}",
            iterations,
            loss
        );

        let intercept = theta[d];
        let coefficients = theta.slice(ndarray::s![..d]).to_owned();

        Ok(LogisticModel {
            coefficients,
            intercept,
            iterations,
            converged,
        })
    }
}

/// Numerically stable logistic function.
#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Penalised negative log-likelihood.
fn objective(xa: &Array2<f64>, y: &Array1<f64>, theta: &Array1<f64>, penalty: &Array1<f64>) -> f64 {
    let z = xa.dot(theta);
    let data: f64 = z
        .iter()
        .zip(y.iter())
        .map(|(&zi, &yi)| softplus(zi) - yi * zi)
        .sum();
    let reg: f64 = 0.5 * (penalty * &theta.mapv(|t| t * t)).sum();
    data + reg
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy_data() -> (Array2<f64>, Array1<f64>) {
        // One informative feature, overlapping classes so the optimum is finite.
        let x = array![
            [1.0, 0.0],
            [2.0, 1.0],
            [3.0, 0.0],
            [4.0, 1.0],
            [5.0, 0.0],
            [6.0, 1.0],
            [7.0, 0.0],
            [8.0, 1.0],
        ];
        let y = array![0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < f64::EPSILON);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(-1000.0).is_finite());
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softplus_matches_naive_form() {
        for z in [-5.0, -0.5, 0.0, 0.5, 5.0] {
            let naive = (1.0 + f64::exp(z)).ln();
            assert!((softplus(z) - naive).abs() < 1e-12);
        }
        assert!(softplus(1000.0).is_finite());
    }

    #[test]
    fn test_fit_learns_increasing_trend() {
        let (x, y) = toy_data();
        let model = LogisticRegression::default().fit(&x, &y).expect("Should fit");

        assert!(model.converged());
        assert!(model.coefficients()[0] > 0.0);

        let low = model.predict(&[1.0, 0.0]).expect("score").probability;
        let high = model.predict(&[8.0, 0.0]).expect("score").probability;
        assert!(low < 0.5);
        assert!(high > 0.5);
    }

    #[test]
    fn test_gradient_vanishes_at_solution() {
        let (x, y) = toy_data();
        let fitter = LogisticRegression {
            tol: 1e-10,
            ..Default::default()
        };
        let model = fitter.fit(&x, &y).expect("Should fit");

        // Stationarity: X^T (p - y) + w / C = 0 and sum(p - y) = 0 for the intercept.
        let residuals: Vec<f64> = x
            .outer_iter()
            .zip(y.iter())
            .map(|(row, &yi)| model.predict(row.as_slice().expect("contiguous")).expect("score").probability - yi)
            .collect();
        let intercept_grad: f64 = residuals.iter().sum();
        assert!(intercept_grad.abs() < 1e-6);

        for j in 0..2 {
            let g: f64 = x
                .column(j)
                .iter()
                .zip(&residuals)
                .map(|(xi, r)| xi * r)
                .sum::<f64>()
                + model.coefficients()[j] / fitter.c;
            assert!(g.abs() < 1e-6, "feature {j} gradient {g}");
        }
    }

    #[test]
    fn test_separable_data_stays_finite() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];
        let model = LogisticRegression::default().fit(&x, &y).expect("Should fit");
        assert!(model.coefficients()[0].is_finite());
        assert_eq!(model.predict(&[3.0]).expect("score").label, 1);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = toy_data();
        let a = LogisticRegression::default().fit(&x, &y).expect("fit");
        let b = LogisticRegression::default().fit(&x, &y).expect("fit");
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let x = array![[1.0], [2.0]];
        assert!(matches!(
            LogisticRegression::default().fit(&x, &array![1.0, 1.0]),
            Err(ModelError::SingleClass)
        ));
        assert!(matches!(
            LogisticRegression::default().fit(&x, &array![1.0]),
            Err(ModelError::LabelMismatch { .. })
        ));
        assert!(matches!(
            LogisticRegression::default().fit(&Array2::zeros((0, 1)), &Array1::zeros(0)),
            Err(ModelError::EmptyTrainingSet)
        ));
        assert!(matches!(
            LogisticRegression::default().fit(&array![[f64::NAN], [1.0]], &array![0.0, 1.0]),
            Err(ModelError::NonFinite(_))
        ));
    }

    #[test]
    fn test_predict_checks_width() {
        let model = LogisticModel::new(vec![0.5, -0.25], 0.1);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(ModelError::FeatureCount { expected: 2, got: 1 })
        ));

        let p = model.predict(&[2.0, 0.0]).expect("score");
        assert!((p.probability - sigmoid(1.1)).abs() < 1e-12);
        assert_eq!(p.label, 1);
    }

    #[test]
    fn test_label_follows_sign_of_tiny_scores() {
        // A score this small rounds to probability 0.5 but is still positive.
        let model = LogisticModel::new(vec![0.0; 13], 1e-17);
        let p = model.predict(&[0.0; 13]).expect("score");
        assert!((p.probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(p.label, 1);

        let model = LogisticModel::new(vec![0.0; 13], -1e-17);
        assert_eq!(model.predict(&[0.0; 13]).expect("score").label, 0);

        let model = LogisticModel::new(vec![0.0; 13], 0.0);
        assert_eq!(model.predict(&[0.0; 13]).expect("score").label, 0);
    }
}

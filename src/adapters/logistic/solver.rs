//! Dense symmetric positive-definite solve for the Newton step.

use ndarray::{Array1, Array2};

/// Jitter retries before giving up on a near-singular Hessian.
const MAX_JITTER_ATTEMPTS: usize = 8;

/// Solve `a · x = b` for symmetric positive-definite `a` via Cholesky.
///
/// If the factorisation fails, a growing multiple of the mean diagonal is
/// added to `a` and the factorisation retried. The shift never exceeds
/// 1e-3 of the mean diagonal, so genuinely indefinite matrices still fail.
pub(super) fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.dim() != (n, n) {
        return None;
    }

    let mean_diag = (0..n).map(|i| a[[i, i]].abs()).sum::<f64>() / n.max(1) as f64;
    let mut jitter = 0.0;

    for attempt in 0..=MAX_JITTER_ATTEMPTS {
        let mut shifted = a.clone();
        for i in 0..n {
            shifted[[i, i]] += jitter;
        }
        if let Some(l) = cholesky(&shifted) {
            if attempt > 0 {
                tracing::debug!("Cholesky succeeded with jitter {:e}", jitter);
            }
            return Some(substitute(&l, b));
        }
        jitter = if jitter == 0.0 {
            mean_diag.max(f64::MIN_POSITIVE) * 1e-10
        } else {
            jitter * 10.0
        };
    }

    None
}

/// Lower-triangular `l` with `l · lᵀ = a`, or `None` if `a` is not positive definite.
fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for j in 0..n {
        let mut diag = a[[j, j]];
        for k in 0..j {
            diag -= l[[j, k]] * l[[j, k]];
        }
        if !(diag.is_finite() && diag > 0.0) {
            return None;
        }
        let ljj = diag.sqrt();
        l[[j, j]] = ljj;

        for i in (j + 1)..n {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = sum / ljj;
        }
    }

    Some(l)
}

/// Forward then backward substitution through `l` and `lᵀ`.
fn substitute(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = b.len();

    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[[i, k]] * y[k];
        }
        y[i] = sum / l[[i, i]];
    }

    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for k in (i + 1)..n {
            sum -= l[[k, i]] * x[k];
        }
        x[i] = sum / l[[i, i]];
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_solves_spd_system() {
        let a = array![[4.0, 12.0, -16.0], [12.0, 37.0, -43.0], [-16.0, -43.0, 98.0]];
        let b = array![1.0, 2.0, 3.0];

        let x = solve_spd(&a, &b).expect("Should solve");
        let residual = a.dot(&x) - &b;
        assert!(residual.iter().all(|r| r.abs() < 1e-9));
    }

    #[test]
    fn test_jitter_rescues_singular_matrix() {
        let a = array![[1.0, 1.0], [1.0, 1.0]];
        let b = array![2.0, 2.0];
        let x = solve_spd(&a, &b).expect("Should solve with jitter");
        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let a = Array2::<f64>::eye(2);
        assert!(solve_spd(&a, &array![1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_rejects_negative_definite() {
        let a = array![[-1.0, 0.0], [0.0, -1.0]];
        assert!(solve_spd(&a, &array![1.0, 1.0]).is_none());
    }
}

//! Small numerical helpers shared by the optimizer and inference layers.
use ndarray::{Array1, Array2};

/// Eigenvalues at or below this threshold are dropped when forming a
/// pseudoinverse.
pub const EIGEN_EPS: f64 = 1e-10;

/// Delta-method covariance of `exp(x)` given the covariance of `x`.
///
/// With `J = diag(exp(x))`, returns `J Σ Jᵀ`, i.e.
/// `Cov(exp x_i, exp x_j) ≈ exp(x_i) exp(x_j) Σ_ij`. For a log standard
/// deviation this gives `se(σ) = σ · se(log σ)`.
///
/// `cov` must be `n × n` with `n = x.len()`.
pub fn delta_method_exp(x: &Array1<f64>, cov: &Array2<f64>) -> Array2<f64> {
    let scale = x.mapv(f64::exp);
    let mut out = cov.clone();
    for ((i, j), v) in out.indexed_iter_mut() {
        *v *= scale[i] * scale[j];
    }
    out
}

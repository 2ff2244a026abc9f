//! inference::hessian — covariance and standard errors from observed
//! information.
//!
//! Purpose
//! -------
//! Turn a gradient map of the negative log-likelihood into the
//! observed-information covariance `J(θ̂)⁺` and its standard errors.
//!
//! Key behaviors
//! -------------
//! - `J(θ̂)` is the finite-difference Jacobian of the gradient map, computed
//!   by [`compute_hessian`] (validated and symmetrized).
//! - The inverse is a Moore–Penrose pseudoinverse from a symmetric
//!   eigendecomposition; eigenvalues `≤ EIGEN_EPS` are dropped, so weakly
//!   identified directions contribute no variance instead of producing
//!   infinities.
//!
//! Conventions
//! -----------
//! - The gradient map may be of `−ℓ` (observed information directly) or of
//!   `ℓ`; for the latter, negate it first. The scoreline model passes the
//!   gradient of the Laplace negative log-likelihood on the sum scale, so
//!   the covariance needs no further scaling by the number of games.
//! - Errors are [`OptResult`]; only [`compute_hessian`] can fail.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Pseudoinverse of the observed information at `theta_hat`.
///
/// # Errors
/// Propagates [`compute_hessian`] validation failures.
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array2<f64>> {
    let obs_info = compute_hessian(f, theta_hat)?;
    Ok(pseudo_inverse(fill_dmatrix(&obs_info)))
}

/// `sqrt(diag(J(θ̂)⁺))`.
///
/// # Errors
/// Propagates [`compute_hessian`] validation failures.
///
/// # Example
/// ```rust
/// # use ndarray::array;
/// # use rust_scoreline::inference::hessian::calc_standard_errors;
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let grad = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let se = calc_standard_errors(&grad, &array![1.0, -1.0]).expect("finite Hessian");
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    Ok(standard_errors_from_covariance(&calc_covariance(f, theta_hat)?))
}

/// `sqrt` of the diagonal; tiny negative round-off is clamped to zero.
pub fn standard_errors_from_covariance(cov: &Array2<f64>) -> Array1<f64> {
    cov.diag().mapv(|v| v.max(0.0).sqrt())
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = obs_info.dim();
    DMatrix::from_fn(rows, cols, |i, j| obs_info[[i, j]])
}

/// `Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k` for `J = Q Λ Qᵀ`.
fn pseudo_inverse(obs_info: DMatrix<f64>) -> Array2<f64> {
    let n = obs_info.nrows();
    let eigen = obs_info.symmetric_eigen();
    let q = eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}

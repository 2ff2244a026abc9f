//! Finite-difference derivatives with validation.
//!
//! - [`run_fd_diff`]: forward-difference gradient of a scalar closure that
//!   reports failures through a shared error slot.
//! - [`compute_hessian`]: Jacobian of a gradient map, central first and
//!   forward if the central result fails validation, then symmetrized.
//!
//! Closures handed to `finitediff` must return plain numbers, so evaluation
//! errors are parked in a `RefCell<Option<Error>>` and the closure returns
//! `NaN`; the caller checks the slot afterwards.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// Clears `closure_err` first; if `func` stored an error while being
/// differenced, that error is returned.
///
/// # Errors
/// - The captured closure error, converted to `OptError`.
/// - [`validate_grad`] failures for a wrong length or non-finite entries.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Jacobian of the gradient map `f` at `theta`, i.e. the
/// Hessian of the underlying scalar function.
///
/// The central scheme is tried first. If its result fails
/// [`validate_hessian`], the forward scheme is used and only its validation
/// error is reported.
///
/// # Errors
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` from the
///   forward-difference attempt.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients on a smooth function and error capture.
    // - Hessians of analytic gradient maps, including the symmetry pass and
    //   the failure path for non-finite maps.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `run_fd_diff` recovers the gradient of a Poisson-style term.
    //
    // Given
    // -----
    // - f(θ) = exp(θ₀) − 3 θ₀ + θ₁² at θ = (0.2, −1).
    //
    // Expect
    // ------
    // - ∇f ≈ (e^0.2 − 3, −2) to 1e-6.
    fn run_fd_diff_matches_analytic_gradient() {
        // Arrange
        let theta = array![0.2, -1.0];
        let slot: RefCell<Option<Error>> = RefCell::new(None);
        let f = |t: &Theta| t[0].exp() - 3.0 * t[0] + t[1] * t[1];

        // Act
        let grad = run_fd_diff(&theta, &f, &slot).expect("finite gradient");

        // Assert
        assert!((grad[0] - (0.2_f64.exp() - 3.0)).abs() < 1e-6);
        assert!((grad[1] + 2.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // An error stored by the closure is returned instead of a gradient.
    fn run_fd_diff_returns_captured_closure_error() {
        let theta = array![1.0];
        let slot: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            slot.borrow_mut()
                .get_or_insert_with(|| ArgminError::NotImplemented { text: "cost".into() }.into());
            f64::NAN
        };
        assert_eq!(
            run_fd_diff(&theta, &f, &slot),
            Err(OptError::NotImplemented { text: "cost".into() })
        );
    }

    #[test]
    // Purpose
    // -------
    // `compute_hessian` differentiates an analytic gradient and returns an
    // exactly symmetric matrix.
    //
    // Given
    // -----
    // - g(θ) = (exp(θ₀ + θ₁), exp(θ₀ + θ₁) + 2θ₁), the gradient of
    //   exp(θ₀ + θ₁) + θ₁².
    //
    // Expect
    // ------
    // - H ≈ [[e, e], [e, e + 2]] at θ = (0.4, 0.6) and H == Hᵀ.
    fn compute_hessian_recovers_curvature() {
        let grad_fn = |t: &Theta| {
            let e = (t[0] + t[1]).exp();
            array![e, e + 2.0 * t[1]]
        };
        let hess = compute_hessian(&grad_fn, &array![0.4, 0.6]).expect("finite Hessian");
        let e = 1.0_f64.exp();
        let expected = array![[e, e], [e, e + 2.0]];
        assert!((&hess - &expected).iter().all(|d| d.abs() < 1e-5));
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    fn compute_hessian_rejects_non_finite_maps() {
        let grad_fn = |_: &Theta| Array1::from(vec![f64::NAN]);
        assert!(matches!(
            compute_hessian(&grad_fn, &array![0.0]),
            Err(OptError::InvalidHessian { .. })
        ));
    }

    #[test]
    fn symmetrize_hess_averages_off_diagonal_pairs() {
        let mut h = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 0.0, 3.0]).expect("2x2");
        symmetrize_hess(&mut h);
        assert_eq!(h, array![[1.0, 1.0], [1.0, 3.0]]);
    }
}

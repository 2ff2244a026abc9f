//! Bridge from a [`LogLikelihood`] to argmin's `CostFunction` + `Gradient`.
//!
//! The cost is `c(θ) = −ℓ(θ)`. An analytic `∇ℓ` is negated; without one,
//! the cost itself is finite-differenced, so no sign flip is needed on that
//! path.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// `−ℓ(θ)`; a non-finite `ℓ` is an [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value }.into());
        }
        Ok(-value)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `−∇ℓ(θ)` when the model provides it. Otherwise a central difference
    /// of the cost, retried with a forward difference if a cost evaluation
    /// failed or the central result is not finite.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    self.cost(theta).unwrap_or_else(|e| {
                        closure_err.borrow_mut().get_or_insert(e);
                        f64::NAN
                    })
                };
                let central = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
                    return Ok(central);
                }
                Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    /// ℓ(θ) = −Σ (θ_i − i)², optionally with its analytic gradient.
    struct Bowl {
        analytic: bool,
    }

    impl LogLikelihood for Bowl {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(-theta.iter().enumerate().map(|(i, t)| (t - i as f64).powi(2)).sum::<f64>())
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            Ok(theta.iter().enumerate().map(|(i, t)| -2.0 * (t - i as f64)).collect())
        }
    }

    #[test]
    // Purpose
    // -------
    // The cost and both gradient paths use the `c = −ℓ` sign convention.
    //
    // Given
    // -----
    // - θ = (1, 3) for ℓ(θ) = −(θ₀² + (θ₁ − 1)²).
    //
    // Expect
    // ------
    // - c(θ) = 5 and ∇c(θ) = (2, 4) from the analytic and the
    //   finite-difference paths alike.
    fn cost_and_gradients_follow_sign_convention() {
        let theta = array![1.0, 3.0];
        for analytic in [true, false] {
            let model = Bowl { analytic };
            let adapter = ArgMinAdapter::new(&model, &());
            assert_eq!(adapter.cost(&theta).expect("finite cost"), 5.0);
            let grad = adapter.gradient(&theta).expect("finite gradient");
            assert!((grad[0] - 2.0).abs() < 1e-6 && (grad[1] - 4.0).abs() < 1e-6);
        }
    }
}

//! Estimation options for the scoreline model.
//!
//! Purpose
//! -------
//! Bundle every knob the fitting layer reads into one [`ModelOptions`] value:
//! the initialization policy for the fixed effects, the outer L-BFGS
//! configuration ([`MLEOptions`]) and the inner Newton solve for the
//! conditional mode of the random effects ([`InnerOptions`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Each component is validated by its own constructor; `ModelOptions`
//!   adds no cross-field checks.
//! - Defaults are tuned for leagues of tens of teams and a few hundred
//!   games per season.
use crate::{
    optimization::loglik_optimizer::{MLEOptions, Tolerances, traits::LineSearcher},
    scoreline::{
        core::init::Init,
        errors::{ScorelineError, ScorelineResult},
    },
};

/// Default gradient tolerance (max-abs norm) for the conditional mode solve.
pub const DEFAULT_INNER_TOL_GRAD: f64 = 1e-9;

/// Default Newton iteration cap for the conditional mode solve.
pub const DEFAULT_INNER_MAX_ITER: usize = 100;

/// Newton settings for the conditional mode `û(φ)`.
///
/// - `tol_grad`: stop once `max_i |∂NLL/∂u_i| < tol_grad`.
/// - `max_iter`: Newton iterations before giving up with
///   [`ScorelineError::ModeNotConverged`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerOptions {
    pub tol_grad: f64,
    pub max_iter: usize,
}

impl InnerOptions {
    /// Construct validated inner options.
    ///
    /// # Errors
    /// - [`ScorelineError::InvalidInnerOptions`] if `tol_grad` is not finite
    ///   and positive or `max_iter == 0`.
    pub fn new(tol_grad: f64, max_iter: usize) -> ScorelineResult<Self> {
        if !tol_grad.is_finite() || tol_grad <= 0.0 {
            return Err(ScorelineError::InvalidInnerOptions {
                reason: "Gradient tolerance must be finite and positive.",
            });
        }
        if max_iter == 0 {
            return Err(ScorelineError::InvalidInnerOptions {
                reason: "Maximum Newton iterations must be greater than zero.",
            });
        }
        Ok(InnerOptions { tol_grad, max_iter })
    }
}

impl Default for InnerOptions {
    fn default() -> Self {
        InnerOptions { tol_grad: DEFAULT_INNER_TOL_GRAD, max_iter: DEFAULT_INNER_MAX_ITER }
    }
}

/// ModelOptions — estimation configuration for [`PoissonGoalsModel`](crate::scoreline::models::poisson_goals::PoissonGoalsModel).
///
/// Fields
/// ------
/// - `init`: [`Init`]
///   Starting values for the fixed effects.
/// - `mle_opts`: [`MLEOptions`]
///   Outer optimizer configuration (tolerances, line search, L-BFGS memory).
/// - `inner`: [`InnerOptions`]
///   Conditional mode solve used at every outer evaluation.
///
/// Default
/// -------
/// - `init = Init::GoalMean`
/// - `mle_opts`: `tol_grad = 1e-6`, `tol_cost = 1e-12`, `max_iter = 500`,
///   More–Thuente line search, default L-BFGS memory.
/// - `inner = InnerOptions::default()`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    pub init: Init,
    pub mle_opts: MLEOptions,
    pub inner: InnerOptions,
}

impl ModelOptions {
    pub fn new(init: Init, mle_opts: MLEOptions, inner: InnerOptions) -> ModelOptions {
        ModelOptions { init, mle_opts, inner }
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        let tols = Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-12), max_iter: Some(500) };
        ModelOptions {
            init: Init::GoalMean,
            mle_opts: MLEOptions {
                tols,
                line_searcher: LineSearcher::MoreThuente,
                verbose: false,
                lbfgs_mem: None,
            },
            inner: InnerOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Inner options reject non-positive tolerances and zero iteration caps.
    fn inner_options_validate_inputs() {
        assert!(InnerOptions::new(1e-8, 20).is_ok());
        assert!(matches!(
            InnerOptions::new(0.0, 20),
            Err(ScorelineError::InvalidInnerOptions { .. })
        ));
        assert!(matches!(
            InnerOptions::new(f64::NAN, 20),
            Err(ScorelineError::InvalidInnerOptions { .. })
        ));
        assert!(matches!(
            InnerOptions::new(1e-8, 0),
            Err(ScorelineError::InvalidInnerOptions { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The default configuration is consistent with the validated
    // constructors.
    //
    // Expect
    // ------
    // - Rebuilding the default tolerances and options through `new`
    //   succeeds and compares equal.
    fn default_options_pass_validation() {
        // Arrange
        let defaults = ModelOptions::default();

        // Act
        let tols = Tolerances::new(
            defaults.mle_opts.tols.tol_grad,
            defaults.mle_opts.tols.tol_cost,
            defaults.mle_opts.tols.max_iter,
        )
        .expect("default tolerances are valid");
        let mle = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("default MLE options are valid");
        let inner = InnerOptions::new(DEFAULT_INNER_TOL_GRAD, DEFAULT_INNER_MAX_ITER)
            .expect("default inner options are valid");

        // Assert
        assert_eq!(ModelOptions::new(Init::GoalMean, mle, inner), defaults);
    }
}

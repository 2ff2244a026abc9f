//! models — user-facing scoreline models built on `scoreline::core`.
//!
//! Purpose
//! -------
//! Wire the likelihood kernels to the generic L-BFGS optimizer and expose
//! fitting, uncertainty and prediction APIs.
//!
//! Key behaviors
//! -------------
//! - [`PoissonGoalsModel`] estimates the fixed effects by maximizing the
//!   Laplace marginal likelihood, caches the fitted team effects, reports
//!   standard errors (including the delta-method [`DerivedReport`]) and
//!   predicts expected goals and [`OutcomeProbs`].
//! - [`JointDensity`] exposes the joint log density over the full θ for
//!   external drivers.
//!
//! Conventions
//! -----------
//! - Both types implement
//!   [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   and report errors as [`OptResult`](crate::optimization::errors::OptResult)
//!   at the optimizer boundary and as
//!   [`ScorelineResult`](crate::scoreline::errors::ScorelineResult) elsewhere.
//! - The only logging in the crate happens in `PoissonGoalsModel::fit`
//!   through the `log` facade.

pub mod joint;
pub mod poisson_goals;

pub use self::joint::JointDensity;
pub use self::poisson_goals::{DerivedReport, OutcomeProbs, PoissonGoalsModel};

pub mod prelude {
    pub use super::joint::JointDensity;
    pub use super::poisson_goals::{DerivedReport, OutcomeProbs, PoissonGoalsModel};
}

//! optimization — L-BFGS maximum likelihood, derivative helpers and the
//! optimizer error surface.
//!
//! Purpose
//! -------
//! Give model code a single way to fit parameters: implement
//! [`loglik_optimizer::LogLikelihood`], call [`loglik_optimizer::maximize`]
//! and read an [`loglik_optimizer::OptimOutcome`]. The scoreline model uses
//! it for the fixed effects of the Laplace-approximated likelihood.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: argmin L-BFGS with More–Thuente or Hager–Zhang
//!   line search, finite-difference fallbacks and Hessians.
//! - `numerical_stability`: eigenvalue cutoff and the delta method for
//!   `exp`-transformed parameters.
//! - `errors`: [`errors::OptError`], which absorbs argmin and model errors.
//!
//! Conventions
//! -----------
//! - The optimizer maximizes `ℓ(θ)` by minimizing `−ℓ(θ)`.
//! - Logging happens only with the `obs_slog` feature and
//!   `MLEOptions::verbose`: the starting log-likelihood goes to `log` and
//!   argmin's slog observer reports each iteration.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}

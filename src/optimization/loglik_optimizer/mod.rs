//! loglik_optimizer — argmin-backed maximization of log-likelihoods.
//!
//! Purpose
//! -------
//! Let model code maximize `ℓ(θ)` by implementing one trait,
//! [`LogLikelihood`], and calling [`maximize`]. L-BFGS runs with a
//! More–Thuente or Hager–Zhang line search; gradients come from the model
//! or from finite differences.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ` into the argmin cost `−ℓ`.
//! - [`builders`] construct the solver, [`run::run_lbfgs`] drives the
//!   executor and [`OptimOutcome`] normalizes the result.
//! - [`finite_diff`] provides validated finite-difference gradients and
//!   Hessians; [`finite_diff::compute_hessian`] is also used for observed
//!   information in [`inference`](crate::inference).
//!
//! Conventions
//! -----------
//! - All user-facing values are log-likelihoods; only the adapter sees
//!   costs.
//! - Errors are [`OptError`](crate::optimization::errors::OptError); raw
//!   argmin errors never escape this module.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::finite_diff::compute_hessian;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}

//! core — match data, team effects and the hierarchical Poisson likelihood.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks of the scoreline model: validated
//! match data, the parameter layout, the joint negative log-likelihood with
//! its analytic derivatives, and the Laplace approximation that integrates
//! the team effects out. The fitting layer in
//! [`models`](crate::scoreline::models) builds on these primitives.
//!
//! Key behaviors
//! -------------
//! - [`MatchDataset`] / [`Game`] hold validated results; [`EffectShape`]
//!   fixes the θ layout for a league of `T` teams.
//! - [`EffectParameters`] carries the intercept, per-team attack / defense /
//!   home effects and the three log standard deviations, with mappings to
//!   and from flat vectors.
//! - [`neg_log_likelihood`], [`nll_gradient`] and [`random_effects_hessian`]
//!   are the pure likelihood kernels.
//! - [`conditional_mode`] and [`laplace_nll`] / [`laplace_gradient`]
//!   marginalize the random effects.
//! - [`compute_derived`] reports the group standard deviations on the
//!   natural scale.
//!
//! Invariants & assumptions
//! ------------------------
//! - Datasets are validated once at construction; the likelihood kernels
//!   assume well-formed inputs and never fail, letting `NaN`/`inf`
//!   propagate for non-finite parameters.
//! - Group standard deviations are always `exp(log σ)` and hence positive.
//!
//! Conventions
//! -----------
//! - Teams are 0-based indices in `[0, T)`.
//! - θ = `[intercept, attack, defense, home, log σ_att, log σ_def,
//!   log σ_home]` (length `3T + 4`); `u` = `[attack, defense, home]`;
//!   `φ` = `[intercept, log σ_att, log σ_def, log σ_home]`.
//! - All objectives are *negative* log-likelihoods.
//! - No I/O and no logging happen in this module.

pub mod data;
pub mod density;
pub mod derived;
pub mod init;
pub mod laplace;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod shape;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{Game, MatchDataset};
pub use self::density::{HALF_LN_2PI, ln_normal_pdf, ln_poisson_pmf};
pub use self::derived::{DerivedQuantities, compute_derived};
pub use self::init::Init;
pub use self::laplace::{
    ConditionalMode, conditional_mode, laplace_gradient, laplace_mode, laplace_nll,
};
pub use self::likelihood::{
    NllBreakdown, neg_log_likelihood, nll_breakdown, nll_gradient, random_effects_gradient,
    random_effects_hessian, scoring_rates,
};
pub use self::options::{InnerOptions, ModelOptions};
pub use self::params::EffectParameters;
pub use self::shape::{EffectGroup, EffectShape, N_FIXED, N_GROUPS};

pub mod prelude {
    pub use super::data::{Game, MatchDataset};
    pub use super::derived::{DerivedQuantities, compute_derived};
    pub use super::init::Init;
    pub use super::laplace::{ConditionalMode, laplace_nll};
    pub use super::likelihood::{neg_log_likelihood, nll_gradient};
    pub use super::options::{InnerOptions, ModelOptions};
    pub use super::params::EffectParameters;
    pub use super::shape::{EffectGroup, EffectShape};
}

//! scoreline — hierarchical Poisson model of football scorelines.
//!
//! Purpose
//! -------
//! Model the goals of each side of a match as independent Poisson counts
//! whose log rates combine a global intercept with per-team attack, defense
//! and home-advantage effects. The team effects share Gaussian priors with
//! estimated standard deviations and are integrated out by the Laplace
//! approximation when the fixed effects are estimated.
//!
//! Key behaviors
//! -------------
//! - [`core`]: data ingestion, parameter layout, the joint negative
//!   log-likelihood with analytic derivatives, the conditional-mode solve
//!   and the Laplace objective.
//! - [`models`]: [`PoissonGoalsModel`] (fit, standard errors, derived
//!   report, predictions) and [`JointDensity`].
//! - [`errors`]: [`ScorelineError`] and [`ParamError`].
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`MatchDataset`] from games or parallel columns.
//! 2. Create a [`PoissonGoalsModel`] from `data.shape()` and
//!    [`ModelOptions`].
//! 3. `fit(model.initial_theta(&data), &data)`, then read `fitted_params`,
//!    `derived_report(&data)` or `outcome_probabilities(..)`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each kernel; `tests/` runs the full pipeline
//!   on a simulated league.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    DerivedQuantities, EffectGroup, EffectParameters, EffectShape, Game, Init, InnerOptions,
    MatchDataset, ModelOptions, compute_derived, neg_log_likelihood,
};
pub use self::errors::{ParamError, ParamResult, ScorelineError, ScorelineResult};
pub use self::models::{DerivedReport, JointDensity, OutcomeProbs, PoissonGoalsModel};

pub mod prelude {
    pub use super::{
        DerivedQuantities, DerivedReport, EffectGroup, EffectParameters, EffectShape, Game, Init,
        InnerOptions, JointDensity, MatchDataset, ModelOptions, OutcomeProbs, ParamError,
        ParamResult, PoissonGoalsModel, ScorelineError, ScorelineResult, compute_derived,
        neg_log_likelihood,
    };
}

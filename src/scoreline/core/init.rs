//! Initialization policies for the fixed effects.
//!
//! The outer optimizer works on `φ = [intercept, log σ_att, log σ_def,
//! log σ_home]`; random effects always start at zero inside the conditional
//! mode solve, so only `φ` needs a starting point.
use crate::scoreline::{
    core::{data::MatchDataset, shape::N_FIXED, validation::validate_theta},
    errors::ParamResult,
};
use ndarray::Array1;

/// Floor on the mean goal rate before taking its log, so a dataset of
/// goalless draws still yields a finite intercept.
pub const GOAL_MEAN_FLOOR: f64 = 1e-2;

/// Starting-value policy for `φ`.
///
/// Variants
/// --------
/// - `Zeros`
///   `φ = 0`: unit rate and unit group standard deviations.
/// - `GoalMean`
///   `intercept = ln(mean goals per side)`, `log σ = 0`. Starts the outer
///   optimizer at the pooled Poisson estimate.
/// - `Fixed(φ)`
///   Explicit starting vector of length 4, validated by [`Init::fixed`].
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    Zeros,
    GoalMean,
    Fixed(Array1<f64>),
}

impl Init {
    /// Explicit starting values for `φ`.
    ///
    /// # Errors
    /// - `ParamError::ThetaLengthMismatch` if `phi.len() != 4`.
    /// - `ParamError::NonFiniteParameter` for the first non-finite entry.
    pub fn fixed(phi: Array1<f64>) -> ParamResult<Self> {
        validate_theta(phi.view(), N_FIXED)?;
        Ok(Init::Fixed(phi))
    }

    /// Resolve the policy into a starting vector for `data`.
    pub fn initial_fixed_effects(&self, data: &MatchDataset) -> Array1<f64> {
        match self {
            Init::Zeros => Array1::zeros(N_FIXED),
            Init::GoalMean => {
                let mut phi = Array1::zeros(N_FIXED);
                phi[0] = data.mean_goals_per_side().max(GOAL_MEAN_FLOOR).ln();
                phi
            }
            Init::Fixed(phi) => phi.clone(),
        }
    }
}

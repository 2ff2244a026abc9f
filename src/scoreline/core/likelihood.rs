//! likelihood — negative log-likelihood of the hierarchical Poisson model.
//!
//! Purpose
//! -------
//! Evaluate the joint negative log-likelihood of team effects and match
//! results, together with its analytic gradient and the analytic Hessian
//! with respect to the random effects. These are the only numerical kernels
//! the rest of the crate needs: the Laplace approximation, the fitting layer
//! and external optimizers all build on them.
//!
//! Key behaviors
//! -------------
//! - Prior block: each of `attack`, `defense`, `home` contributes
//!   `−Σ_t ln N(x_t; 0, σ_group)` with `σ_group = exp(log_sigma_group)`.
//! - Observation block: each game contributes
//!   `−ln Pois(home_goals; λ_home) − ln Pois(away_goals; λ_away)` with
//!   - `λ_home = exp(intercept + attack[h] − defense[a] + home[h])`,
//!   - `λ_away = exp(intercept + attack[a] − defense[h] − home[h])`.
//! - [`neg_log_likelihood`] returns the sum of both blocks;
//!   [`nll_breakdown`] returns the four parts separately.
//! - [`nll_gradient`] returns `∂NLL/∂θ` in the full θ layout and
//!   [`random_effects_hessian`] returns `∂²NLL/∂u²` for `u = [attack,
//!   defense, home]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Functions here are pure: they read the dataset and parameters and
//!   allocate only their return values. They are safe to call concurrently
//!   on shared inputs.
//! - No validation is performed. Non-finite parameters or overflowing rates
//!   propagate as `NaN`/`±inf` into the result.
//! - The dataset's team indices must be valid for `params` (guaranteed when
//!   both were built for the same league); otherwise indexing panics.
//!
//! Conventions
//! -----------
//! - Gradients are of the *negative* log-likelihood. Adapters that maximize
//!   `ℓ = −NLL` flip the sign.
//! - The home-advantage effect of the home team enters the home rate with
//!   `+` and the away rate with `−`; the away team's home effect never
//!   enters a game it plays away.
//!
//! Testing notes
//! -------------
//! - Unit tests pin hand-computed values on one-game datasets, check game
//!   order invariance, compare the analytic gradient and Hessian with
//!   `finitediff`, and confirm that invalid parameters propagate as
//!   non-finite values.
use crate::scoreline::core::{
    data::{Game, MatchDataset},
    density::{ln_normal_pdf, ln_poisson_pmf},
    params::EffectParameters,
    shape::{EffectGroup, EffectShape},
};
use ndarray::{Array1, Array2, ArrayView1, s};

pub(crate) const GROUPS: [EffectGroup; 3] =
    [EffectGroup::Attack, EffectGroup::Defense, EffectGroup::Home];

/// Negative log-likelihood split into its additive parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NllBreakdown {
    pub prior_attack: f64,
    pub prior_defense: f64,
    pub prior_home: f64,
    pub observations: f64,
}

impl NllBreakdown {
    pub fn total(&self) -> f64 {
        self.prior_attack + self.prior_defense + self.prior_home + self.observations
    }

    /// Sum of the three Gaussian prior parts.
    pub fn prior(&self) -> f64 {
        self.prior_attack + self.prior_defense + self.prior_home
    }
}

/// Expected goals `(λ_home, λ_away)` for one game under `params`.
pub fn scoring_rates(params: &EffectParameters, game: &Game) -> (f64, f64) {
    let (h, a) = (game.home_team, game.away_team);
    let eta_home = params.intercept + params.attack[h] - params.defense[a] + params.home[h];
    let eta_away = params.intercept + params.attack[a] - params.defense[h] - params.home[h];
    (eta_home.exp(), eta_away.exp())
}

/// Negative log-likelihood of `params` given `dataset`.
///
/// Pure and deterministic; see the module docs for the model. Returns
/// `NaN`/`±inf` rather than an error when parameters are out of domain.
pub fn neg_log_likelihood(dataset: &MatchDataset, params: &EffectParameters) -> f64 {
    nll_breakdown(dataset, params).total()
}

/// Negative log-likelihood split into prior and observation parts.
pub fn nll_breakdown(dataset: &MatchDataset, params: &EffectParameters) -> NllBreakdown {
    let observations = dataset
        .games()
        .iter()
        .map(|game| {
            let (lambda_home, lambda_away) = scoring_rates(params, game);
            -ln_poisson_pmf(game.home_goals, lambda_home)
                - ln_poisson_pmf(game.away_goals, lambda_away)
        })
        .sum();
    NllBreakdown {
        prior_attack: prior_nll(params.attack.view(), params.log_sigma_attack),
        prior_defense: prior_nll(params.defense.view(), params.log_sigma_defense),
        prior_home: prior_nll(params.home.view(), params.log_sigma_home),
        observations,
    }
}

/// Analytic gradient `∂NLL/∂θ` in the full θ layout (length `3T + 4`).
///
/// For one game with residuals `r_h = λ_home − home_goals` and
/// `r_a = λ_away − away_goals`:
/// - `intercept += r_h + r_a`
/// - `attack[h] += r_h`, `defense[a] −= r_h`, `home[h] += r_h`
/// - `attack[a] += r_a`, `defense[h] −= r_a`, `home[h] −= r_a`
///
/// Each prior group adds `x_t / σ²` to its effects and
/// `T − Σ_t x_t² / σ²` to its `log σ`.
pub fn nll_gradient(dataset: &MatchDataset, params: &EffectParameters) -> Array1<f64> {
    let shape = EffectShape { n_teams: params.n_teams() };
    let mut grad = Array1::zeros(shape.theta_len());
    let mut intercept_grad = 0.0;
    {
        let mut u_grad = grad.slice_mut(s![1..1 + shape.n_random()]);
        for game in dataset.games() {
            let (h, a) = (game.home_team, game.away_team);
            let (lambda_home, lambda_away) = scoring_rates(params, game);
            let r_home = lambda_home - f64::from(game.home_goals);
            let r_away = lambda_away - f64::from(game.away_goals);
            intercept_grad += r_home + r_away;
            for (idx, coef) in home_design(&shape, h, a) {
                u_grad[idx] += coef * r_home;
            }
            for (idx, coef) in away_design(&shape, h, a) {
                u_grad[idx] += coef * r_away;
            }
        }
        for group in GROUPS {
            let inv_var = (-2.0 * params.log_sigma(group)).exp();
            for (t, &x) in params.effects(group).iter().enumerate() {
                u_grad[shape.random_index(group, t)] += x * inv_var;
            }
        }
    }
    grad[0] = intercept_grad;
    for group in GROUPS {
        let inv_var = (-2.0 * params.log_sigma(group)).exp();
        let sum_sq: f64 = params.effects(group).iter().map(|x| x * x).sum();
        grad[shape.log_sigma_index(group)] = shape.n_teams as f64 - sum_sq * inv_var;
    }
    grad
}

/// Gradient of the NLL with respect to the random effects only (length `3T`).
pub fn random_effects_gradient(dataset: &MatchDataset, params: &EffectParameters) -> Array1<f64> {
    let n_random = 3 * params.n_teams();
    nll_gradient(dataset, params).slice(s![1..1 + n_random]).to_owned()
}

/// Analytic Hessian `∂²NLL/∂u²` for `u = [attack, defense, home]` (`3T × 3T`).
///
/// Each game adds `λ · c cᵀ` for the design vector `c` of each side, and the
/// priors add `1/σ²_group` on the diagonal. The result is symmetric and,
/// for finite parameters, positive definite.
pub fn random_effects_hessian(dataset: &MatchDataset, params: &EffectParameters) -> Array2<f64> {
    let shape = EffectShape { n_teams: params.n_teams() };
    let n = shape.n_random();
    let mut hess = Array2::zeros((n, n));
    for game in dataset.games() {
        let (h, a) = (game.home_team, game.away_team);
        let (lambda_home, lambda_away) = scoring_rates(params, game);
        add_outer(&mut hess, &home_design(&shape, h, a), lambda_home);
        add_outer(&mut hess, &away_design(&shape, h, a), lambda_away);
    }
    for group in GROUPS {
        let inv_var = (-2.0 * params.log_sigma(group)).exp();
        for t in 0..shape.n_teams {
            let i = shape.random_index(group, t);
            hess[[i, i]] += inv_var;
        }
    }
    hess
}

// ---- Helper methods ----

fn prior_nll(effects: ArrayView1<f64>, log_sigma: f64) -> f64 {
    let sigma = log_sigma.exp();
    -effects.iter().map(|&x| ln_normal_pdf(x, 0.0, sigma)).sum::<f64>()
}

/// Coefficients of the home log rate in `u`: `+attack[h] − defense[a] + home[h]`.
pub(crate) fn home_design(shape: &EffectShape, h: usize, a: usize) -> [(usize, f64); 3] {
    [
        (shape.random_index(EffectGroup::Attack, h), 1.0),
        (shape.random_index(EffectGroup::Defense, a), -1.0),
        (shape.random_index(EffectGroup::Home, h), 1.0),
    ]
}

/// Coefficients of the away log rate in `u`: `+attack[a] − defense[h] − home[h]`.
pub(crate) fn away_design(shape: &EffectShape, h: usize, a: usize) -> [(usize, f64); 3] {
    [
        (shape.random_index(EffectGroup::Attack, a), 1.0),
        (shape.random_index(EffectGroup::Defense, h), -1.0),
        (shape.random_index(EffectGroup::Home, h), -1.0),
    ]
}

fn add_outer(hess: &mut Array2<f64>, design: &[(usize, f64); 3], weight: f64) {
    for &(i, ci) in design {
        for &(j, cj) in design {
            hess[[i, j]] += weight * ci * cj;
        }
    }
}

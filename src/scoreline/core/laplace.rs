//! laplace — marginal likelihood of the fixed effects via the Laplace
//! approximation.
//!
//! Purpose
//! -------
//! Integrate the random effects `u = [attack, defense, home]` out of the
//! joint negative log-likelihood for fixed `φ = [intercept, log σ_att,
//! log σ_def, log σ_home]`:
//!
//! `L(φ) = NLL(φ, û) + ½ ln det H(û) − (3T/2) ln 2π`,
//!
//! where `û(φ)` minimizes `NLL(φ, ·)` and `H = ∂²NLL/∂u²` at `û`.
//!
//! Key behaviors
//! -------------
//! - [`conditional_mode`] runs damped Newton on `u`: solve `H d = g` through
//!   a Cholesky factorization, halve the step until the objective does not
//!   increase, stop once `max |g| < tol_grad`.
//! - [`ConditionalMode`] keeps the factor of `H(û)`; `ln det H` and the
//!   conditional variances `diag H⁻¹` are read from it.
//! - [`ConditionalMode::laplace_gradient`] differentiates `L(φ)` exactly,
//!   accounting for the dependence of `û` on `φ` through the implicit
//!   function theorem.
//!
//! Invariants & assumptions
//! ------------------------
//! - `NLL(φ, ·)` is strictly convex in `u` for finite `φ` (Poisson terms are
//!   convex in the linear predictor and every group has a Gaussian prior),
//!   so the mode is unique and `H` is positive definite there.
//! - The Newton solve always starts from the random effects of the supplied
//!   parameters; [`laplace_mode`] starts from zero, which keeps `L(φ)` a
//!   pure function of `φ`.
//!
//! Conventions
//! -----------
//! - Values are *negative* log marginal likelihoods.
//! - `ln det H = 2 Σ_i ln L_ii` for the Cholesky factor `L`.
use crate::scoreline::{
    core::{
        data::MatchDataset,
        density::HALF_LN_2PI,
        likelihood::{
            GROUPS, away_design, home_design, neg_log_likelihood, nll_gradient,
            random_effects_gradient, random_effects_hessian, scoring_rates,
        },
        options::InnerOptions,
        params::EffectParameters,
        shape::{EffectShape, N_FIXED},
    },
    errors::{ScorelineError, ScorelineResult},
};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{Array1, Array2, ArrayView1};

/// Step halvings allowed per Newton iteration.
const MAX_HALVINGS: usize = 60;

/// Relative slack when comparing objective values during step halving.
const DESCENT_SLACK: f64 = 1e-12;

/// Result of the inner Newton solve.
#[derive(Debug, Clone)]
pub struct ConditionalMode {
    /// Fixed effects as supplied, random effects at `û`.
    pub params: EffectParameters,
    /// `NLL(φ, û)`.
    pub nll: f64,
    /// Newton iterations taken.
    pub iterations: usize,
    cholesky: Cholesky<f64, Dyn>,
}

impl ConditionalMode {
    /// `ln det H(û)`.
    pub fn ln_det_hessian(&self) -> f64 {
        2.0 * self.cholesky.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
    }

    /// Laplace approximation of the negative log marginal likelihood.
    pub fn laplace_nll(&self) -> f64 {
        let n_random = self.cholesky.l_dirty().nrows() as f64;
        self.nll + 0.5 * self.ln_det_hessian() - n_random * HALF_LN_2PI
    }

    /// `H(û)⁻¹`, the conditional covariance of the random effects.
    pub fn inverse_hessian(&self) -> DMatrix<f64> {
        self.cholesky.inverse()
    }

    /// `diag H(û)⁻¹` in `u` layout.
    pub fn conditional_variances(&self) -> Array1<f64> {
        self.inverse_hessian().diagonal().iter().copied().collect()
    }

    /// Analytic gradient of [`ConditionalMode::laplace_nll`] with respect to
    /// `φ` (length 4).
    ///
    /// With `P = H⁻¹`, design vector `c` and rate `λ` for each side of each
    /// game:
    /// - `½ ∂ ln det H / ∂u_k = ½ Σ λ (cᵀ P c) c_k =: w_k`, and `z = P w`.
    /// - `∂L/∂intercept = ∂NLL/∂intercept + ½ Σ λ cᵀ P c − zᵀ Σ λ c`.
    /// - `∂L/∂log σ_g = ∂NLL/∂log σ_g − σ_g⁻² Σ_{i∈g} P_ii + 2 σ_g⁻² Σ_{i∈g} z_i û_i`.
    ///
    /// The `∂NLL` terms are the fixed-effect entries of [`nll_gradient`] at
    /// `û`, where the random-effect gradient vanishes.
    pub fn laplace_gradient(&self, dataset: &MatchDataset) -> Array1<f64> {
        let params = &self.params;
        let shape = EffectShape { n_teams: params.n_teams() };
        let inv = self.inverse_hessian();
        let n_random = shape.n_random();

        let mut logdet_sens = DVector::<f64>::zeros(n_random);
        let mut rate_design = DVector::<f64>::zeros(n_random);
        let mut half_trace_intercept = 0.0;
        for game in dataset.games() {
            let (h, a) = (game.home_team, game.away_team);
            let (lambda_home, lambda_away) = scoring_rates(params, game);
            for (design, lambda) in
                [(home_design(&shape, h, a), lambda_home), (away_design(&shape, h, a), lambda_away)]
            {
                let mut quad = 0.0;
                for &(i, ci) in &design {
                    for &(j, cj) in &design {
                        quad += ci * cj * inv[(i, j)];
                    }
                }
                half_trace_intercept += 0.5 * lambda * quad;
                for &(i, ci) in &design {
                    logdet_sens[i] += 0.5 * lambda * quad * ci;
                    rate_design[i] += lambda * ci;
                }
            }
        }
        let z = &inv * &logdet_sens;

        let envelope = nll_gradient(dataset, params);
        let mut grad = Array1::zeros(N_FIXED);
        grad[0] = envelope[0] + half_trace_intercept - z.dot(&rate_design);
        for group in GROUPS {
            let inv_var = (-2.0 * params.log_sigma(group)).exp();
            let mut trace = 0.0;
            let mut coupling = 0.0;
            for (t, &x) in params.effects(group).iter().enumerate() {
                let i = shape.random_index(group, t);
                trace += inv[(i, i)];
                coupling += z[i] * x;
            }
            grad[1 + group.offset()] = envelope[shape.log_sigma_index(group)] - inv_var * trace
                + 2.0 * inv_var * coupling;
        }
        grad
    }
}

/// Minimize `NLL` over the random effects of `params`, holding its fixed
/// effects constant.
///
/// # Errors
/// - [`ScorelineError::NonFiniteObjective`] if the objective or its gradient
///   is NaN/±inf at the starting point.
/// - [`ScorelineError::HessianNotPositiveDefinite`] if the Cholesky
///   factorization fails.
/// - [`ScorelineError::ModeNotConverged`] if `inner.max_iter` iterations pass
///   or step halving cannot find a non-increasing step.
pub fn conditional_mode(
    dataset: &MatchDataset, params: &EffectParameters, inner: &InnerOptions,
) -> ScorelineResult<ConditionalMode> {
    let mut current = params.clone();
    let mut nll = neg_log_likelihood(dataset, &current);
    if !nll.is_finite() {
        return Err(ScorelineError::NonFiniteObjective { value: nll });
    }

    let mut iteration = 0;
    loop {
        let grad = random_effects_gradient(dataset, &current);
        if let Some(&bad) = grad.iter().find(|g| !g.is_finite()) {
            return Err(ScorelineError::NonFiniteObjective { value: bad });
        }
        let grad_norm = grad.iter().fold(0.0_f64, |acc, g| acc.max(g.abs()));
        let cholesky = factorize(&random_effects_hessian(dataset, &current), iteration)?;
        if grad_norm < inner.tol_grad {
            return Ok(ConditionalMode { params: current, nll, iterations: iteration, cholesky });
        }
        if iteration == inner.max_iter {
            return Err(ScorelineError::ModeNotConverged { iterations: iteration, grad_norm });
        }

        let step = cholesky.solve(&DVector::from_iterator(grad.len(), grad.iter().copied()));
        let step: Array1<f64> = step.iter().copied().collect();
        (current, nll) = damped_step(dataset, &current, nll, &step)?.ok_or(
            ScorelineError::ModeNotConverged { iterations: iteration, grad_norm },
        )?;
        iteration += 1;
    }
}

/// Conditional mode for fixed effects `phi`, starting from `u = 0`.
///
/// # Errors
/// - [`ScorelineError::InvalidParameters`] if `phi` has the wrong length or
///   a non-finite entry.
/// - Any error of [`conditional_mode`].
pub fn laplace_mode(
    dataset: &MatchDataset, phi: ArrayView1<f64>, inner: &InnerOptions,
) -> ScorelineResult<ConditionalMode> {
    let start = EffectParameters::from_fixed_effects(phi, &dataset.shape())?;
    conditional_mode(dataset, &start, inner)
}

/// Laplace negative log marginal likelihood `L(φ)`.
pub fn laplace_nll(
    dataset: &MatchDataset, phi: ArrayView1<f64>, inner: &InnerOptions,
) -> ScorelineResult<f64> {
    Ok(laplace_mode(dataset, phi, inner)?.laplace_nll())
}

/// Analytic gradient `∂L/∂φ`; see [`ConditionalMode::laplace_gradient`].
pub fn laplace_gradient(
    dataset: &MatchDataset, phi: ArrayView1<f64>, inner: &InnerOptions,
) -> ScorelineResult<Array1<f64>> {
    Ok(laplace_mode(dataset, phi, inner)?.laplace_gradient(dataset))
}

// ---- Helper methods ----

fn factorize(hess: &Array2<f64>, iteration: usize) -> ScorelineResult<Cholesky<f64, Dyn>> {
    let (rows, cols) = hess.dim();
    DMatrix::from_fn(rows, cols, |i, j| hess[[i, j]])
        .cholesky()
        .ok_or(ScorelineError::HessianNotPositiveDefinite { iteration })
}

/// Apply `u ← u − s·step`, halving `s` from 1 until the objective does not
/// increase. `Ok(None)` when no acceptable step is found.
fn damped_step(
    dataset: &MatchDataset, current: &EffectParameters, nll: f64, step: &Array1<f64>,
) -> ScorelineResult<Option<(EffectParameters, f64)>> {
    let u = current.random_effects();
    let threshold = nll + DESCENT_SLACK * nll.abs().max(1.0);
    let mut scale = 1.0;
    for _ in 0..MAX_HALVINGS {
        let candidate = current.with_random_effects((&u - &(step * scale)).view())?;
        let candidate_nll = neg_log_likelihood(dataset, &candidate);
        if candidate_nll.is_finite() && candidate_nll <= threshold {
            return Ok(Some((candidate, candidate_nll)));
        }
        scale *= 0.5;
    }
    Ok(None)
}

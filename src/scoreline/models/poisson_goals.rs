//! Hierarchical Poisson goals model: Laplace marginal likelihood, fitting
//! and predictions.
//!
//! This module wires the Laplace-approximated marginal likelihood of the
//! fixed effects `φ = [intercept, log σ_att, log σ_def, log σ_home]` to the
//! `LogLikelihood` trait, so the generic L-BFGS driver estimates `φ` while
//! every evaluation re-solves for the conditional mode of the team effects.
//!
//! Key ideas:
//! - `value(φ) = −L(φ)` and `grad(φ) = −∂L/∂φ`, both from a fresh
//!   conditional-mode solve starting at `u = 0`.
//! - After fitting, the full parameter set (fixed effects plus team effects
//!   at their conditional mode) is cached in `fitted_params`.
//! - Standard errors of `φ` come from the observed information of `L`,
//!   computed as the finite-difference Jacobian of the analytic gradient;
//!   standard errors of the `σ`s follow by the delta method.
use crate::{
    inference::hessian::{calc_covariance, standard_errors_from_covariance},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::delta_method_exp,
    },
    scoreline::{
        core::{
            data::{Game, MatchDataset},
            derived::{DerivedQuantities, compute_derived},
            laplace::{conditional_mode, laplace_gradient, laplace_mode, laplace_nll},
            likelihood::scoring_rates,
            options::ModelOptions,
            params::EffectParameters,
            shape::{EffectShape, N_FIXED},
            validation::{validate_team, validate_theta},
        },
        errors::{ScorelineError, ScorelineResult},
    },
};
use ndarray::{Array1, Array2, s};
use std::cell::RefCell;

/// Group standard deviations with delta-method standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedReport {
    pub sigma_attack: f64,
    pub sigma_defense: f64,
    pub sigma_home: f64,
    pub se_attack: f64,
    pub se_defense: f64,
    pub se_home: f64,
}

/// Win / draw / loss probabilities from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

/// Hierarchical Poisson scoreline model estimated by Laplace-approximate
/// maximum likelihood.
///
/// # Notes
/// - Stateless between evaluations: each `value`/`grad` call allocates its
///   own conditional-mode solve, so the model can be shared immutably.
/// - Implements [`LogLikelihood`] over `φ` (length 4).
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonGoalsModel {
    /// League size.
    pub shape: EffectShape,
    /// Initialization, outer optimizer and inner solve options.
    pub options: ModelOptions,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fixed effects at `φ̂` and team effects at `û(φ̂)` (populated after `fit`).
    pub fitted_params: Option<EffectParameters>,
}

impl PoissonGoalsModel {
    pub fn new(shape: EffectShape, options: ModelOptions) -> PoissonGoalsModel {
        PoissonGoalsModel { shape, options, results: None, fitted_params: None }
    }

    /// Starting `φ` for `data` according to `options.init`.
    pub fn initial_theta(&self, data: &MatchDataset) -> Array1<f64> {
        self.options.init.initial_fixed_effects(data)
    }

    /// Fit `φ` by maximizing the Laplace marginal likelihood and cache the
    /// results.
    ///
    /// ## Steps
    /// 1. Validate `theta0` and the league size through `check`.
    /// 2. Run L-BFGS per `options.mle_opts`, moving `theta0` into the
    ///    executor.
    /// 3. Re-solve the conditional mode at `φ̂` and store the full parameter
    ///    set in `fitted_params`.
    ///
    /// ## Notes
    /// - Stopping on the iteration cap is not an error: the outcome is
    ///   stored with `converged = false` and a warning is logged.
    pub fn fit(&mut self, theta0: Array1<f64>, data: &MatchDataset) -> OptResult<()> {
        log::debug!(
            "fitting scoreline model: {} teams, {} games, start {:?}",
            data.n_teams(),
            data.n_games(),
            theta0.as_slice()
        );
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        if outcome.converged {
            log::debug!(
                "scoreline fit converged after {} iterations: loglik = {}",
                outcome.iterations,
                outcome.value
            );
        } else {
            log::warn!(
                "scoreline fit stopped without convergence ({}) after {} iterations",
                outcome.status,
                outcome.iterations
            );
        }
        let mode = laplace_mode(data, outcome.theta_hat.view(), &self.options.inner)?;
        self.fitted_params = Some(mode.params);
        self.results = Some(outcome);
        Ok(())
    }

    /// Observed-information covariance of `φ̂` (4 × 4).
    ///
    /// The finite-difference stencil cannot propagate errors, so the first
    /// conditional-mode failure is parked in a slot while the closure
    /// returns `NaN`, and reported in place of the Hessian check.
    ///
    /// # Errors
    /// - `ModelNotFitted` (as an optimizer model error) before `fit`.
    /// - The first conditional-mode failure on the stencil
    ///   (`ModeNotConverged`, `HessianNotPositiveDefinite`,
    ///   `NonFiniteObjective`).
    /// - `InvalidHessian` if the observed information is otherwise not
    ///   finite.
    pub fn covariance(&self, data: &MatchDataset) -> OptResult<Array2<f64>> {
        let theta_hat = self.theta_hat()?;
        let inner = self.options.inner;
        let mode_err: RefCell<Option<ScorelineError>> = RefCell::new(None);
        let grad = |phi: &Array1<f64>| match laplace_gradient(data, phi.view(), &inner) {
            Ok(g) => g,
            Err(e) => {
                mode_err.borrow_mut().get_or_insert(e);
                Array1::from_elem(N_FIXED, f64::NAN)
            }
        };
        let cov = calc_covariance(&grad, &theta_hat);
        if let Some(err) = mode_err.take() {
            return Err(err.into());
        }
        cov
    }

    /// Standard errors of `φ̂`.
    pub fn standard_errors(&self, data: &MatchDataset) -> OptResult<Array1<f64>> {
        Ok(standard_errors_from_covariance(&self.covariance(data)?))
    }

    /// Fitted `σ`s and their standard errors.
    pub fn derived_report(&self, data: &MatchDataset) -> OptResult<DerivedReport> {
        let theta_hat = self.theta_hat()?;
        let cov = self.covariance(data)?;
        let log_sigmas = theta_hat.slice(s![1..]).to_owned();
        let sigma_cov = delta_method_exp(&log_sigmas, &cov.slice(s![1.., 1..]).to_owned());
        let se = standard_errors_from_covariance(&sigma_cov);
        let DerivedQuantities { sigma_attack, sigma_defense, sigma_home } =
            compute_derived(self.fitted()?);
        Ok(DerivedReport {
            sigma_attack,
            sigma_defense,
            sigma_home,
            se_attack: se[0],
            se_defense: se[1],
            se_home: se[2],
        })
    }

    /// Conditional standard deviations of the team effects at the fitted
    /// mode, `sqrt(diag H⁻¹)` in `[attack, defense, home]` layout.
    pub fn random_effect_standard_errors(
        &self, data: &MatchDataset,
    ) -> ScorelineResult<Array1<f64>> {
        let mode = conditional_mode(data, self.fitted()?, &self.options.inner)?;
        Ok(mode.conditional_variances().mapv(f64::sqrt))
    }

    /// Expected goals `(λ_home, λ_away)` for `home` hosting `away`.
    ///
    /// # Errors
    /// - `ModelNotFitted` before `fit`.
    /// - `InvalidParameters` wrapping `UnknownTeam` for an index outside the
    ///   league.
    /// - `SelfMatch` (reported as game 0) when `home == away`.
    pub fn expected_goals(&self, home: usize, away: usize) -> ScorelineResult<(f64, f64)> {
        let params = self.fitted()?;
        validate_team(home, params.n_teams())?;
        validate_team(away, params.n_teams())?;
        if home == away {
            return Err(ScorelineError::SelfMatch { game: 0, team: home });
        }
        Ok(scoring_rates(params, &Game::new(home, away, 0, 0)))
    }

    /// Home win / draw / away win probabilities from independent Poisson
    /// scorelines truncated at `max_goals` per side. Mass beyond the
    /// truncation is folded into the last cell, so the three probabilities
    /// sum to one.
    pub fn outcome_probabilities(
        &self, home: usize, away: usize, max_goals: usize,
    ) -> ScorelineResult<OutcomeProbs> {
        if max_goals == 0 {
            return Err(ScorelineError::InvalidMaxGoals { max_goals });
        }
        let (lambda_home, lambda_away) = self.expected_goals(home, away)?;
        let pmf_home = poisson_pmf(lambda_home, max_goals);
        let pmf_away = poisson_pmf(lambda_away, max_goals);

        let mut probs = OutcomeProbs { home: 0.0, draw: 0.0, away: 0.0 };
        for (i, p_i) in pmf_home.iter().enumerate() {
            for (j, p_j) in pmf_away.iter().enumerate() {
                let p = p_i * p_j;
                if i > j {
                    probs.home += p;
                } else if i < j {
                    probs.away += p;
                } else {
                    probs.draw += p;
                }
            }
        }
        Ok(probs)
    }

    // ---- Helper methods ----

    fn theta_hat(&self) -> ScorelineResult<Array1<f64>> {
        Ok(self.results.as_ref().ok_or(ScorelineError::ModelNotFitted)?.theta_hat.clone())
    }

    fn fitted(&self) -> ScorelineResult<&EffectParameters> {
        self.fitted_params.as_ref().ok_or(ScorelineError::ModelNotFitted)
    }
}

impl LogLikelihood for PoissonGoalsModel {
    type Data = MatchDataset;

    /// Negative Laplace objective `−L(φ)`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(-laplace_nll(data, theta.view(), &self.options.inner)?)
    }

    /// Checks `φ.len() == 4`, finite entries, that `data` holds at least one
    /// game and that it was built for the same league size as the model.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), N_FIXED)?;
        if data.is_empty() {
            return Err(ScorelineError::EmptyDataset.into());
        }
        if data.n_teams() != self.shape.n_teams {
            return Err(ScorelineError::InvalidTeamCount {
                n_teams: data.n_teams(),
                reason: "dataset and model disagree on the number of teams",
            }
            .into());
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        Ok(-laplace_gradient(data, theta.view(), &self.options.inner)?)
    }
}

/// `P(K = k)` for `k = 0..=max_k`, with the tail `P(K > max_k)` added to the
/// last entry.
fn poisson_pmf(lambda: f64, max_k: usize) -> Vec<f64> {
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];
    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    let sum: f64 = out.iter().sum();
    if sum < 1.0 {
        out[max_k] += 1.0 - sum;
    }
    out
}

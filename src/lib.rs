//! rust_scoreline — hierarchical Poisson model of football scorelines.
//!
//! Purpose
//! -------
//! Estimate team attack, defense and home-advantage strengths from match
//! results. Goals of each side are Poisson with log rate
//! `intercept + attack − opponent defense ± home advantage`; the team
//! effects share Gaussian priors whose standard deviations are estimated
//! by maximizing the Laplace-approximated marginal likelihood.
//!
//! Key behaviors
//! -------------
//! - [`scoreline`]: data, parameters, the negative log-likelihood with
//!   analytic derivatives, the Laplace approximation and the
//!   [`PoissonGoalsModel`](scoreline::PoissonGoalsModel) fitting API.
//! - [`optimization`]: argmin-based L-BFGS maximum likelihood with
//!   validated options and a unified error type.
//! - [`inference`]: observed-information covariances and standard errors.
//!
//! Conventions
//! -----------
//! - Teams are 0-based indices; goal counts are `u32`.
//! - The numeric core performs no I/O. Model fitting emits `log` records;
//!   optimizer iterations are logged through argmin's slog observer when the
//!   `obs_slog` feature is enabled and `MLEOptions::verbose` is set.
//!
//! Example
//! -------
//! ```rust,no_run
//! use rust_scoreline::scoreline::{Game, MatchDataset, ModelOptions, PoissonGoalsModel};
//!
//! let games = vec![
//!     Game::new(0, 1, 2, 0),
//!     Game::new(1, 2, 1, 1),
//!     Game::new(2, 0, 0, 3),
//!     Game::new(1, 0, 1, 2),
//!     Game::new(2, 1, 2, 2),
//!     Game::new(0, 2, 4, 1),
//! ];
//! let data = MatchDataset::new(games, 3)?;
//! let mut model = PoissonGoalsModel::new(data.shape(), ModelOptions::default());
//! model.fit(model.initial_theta(&data), &data)?;
//! let (lambda_home, lambda_away) = model.expected_goals(0, 2)?;
//! assert!(lambda_home > 0.0 && lambda_away > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod inference;
pub mod optimization;
pub mod scoreline;

//! Errors for the hierarchical Poisson scoreline model (dataset ingestion,
//! parameter construction, conditional-mode solves and fitted-model state).
//!
//! This module defines a model error type, [`ScorelineError`], and a parameter
//! error type, [`ParamError`]. Both implement `Display`/`Error` and convert
//! into [`OptError`](crate::optimization::errors::OptError) so they can cross
//! the optimizer boundary through `?`.
//!
//! ## Conventions
//! - **Teams are 0-based** indices in `[0, n_teams)`.
//! - Goal counts are unsigned, so negativity is unrepresentable and never
//!   reported.
//! - The likelihood itself never returns these errors; they are raised at the
//!   ingestion boundary ([`MatchDataset`](crate::scoreline::core::data::MatchDataset)
//!   constructors) and by the fitting layer.

/// Result alias for model operations that may produce [`ScorelineError`].
pub type ScorelineResult<T> = Result<T, ScorelineError>;

/// Result alias for parameter construction paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the scoreline model.
#[derive(Debug, Clone, PartialEq)]
pub enum ScorelineError {
    // ---- Input/data validation ----
    /// Fitting was asked for on a dataset with no games.
    EmptyDataset,

    /// League must contain at least two teams.
    InvalidTeamCount { n_teams: usize, reason: &'static str },

    /// A game references a team outside `[0, n_teams)`.
    TeamOutOfRange { game: usize, team: usize, n_teams: usize },

    /// A game lists the same team on both sides.
    SelfMatch { game: usize, team: usize },

    /// A parallel input column does not have `n_games` entries.
    ColumnLengthMismatch { column: &'static str, expected: usize, actual: usize },

    // ---- Conditional mode (inner Newton solve) ----
    /// Random-effect Hessian is not positive definite at the current iterate.
    HessianNotPositiveDefinite { iteration: usize },

    /// Penalized objective became NaN/±inf during the inner solve.
    NonFiniteObjective { value: f64 },

    /// Newton iterations exhausted before the gradient tolerance was met.
    ModeNotConverged { iterations: usize, grad_norm: f64 },

    /// Inner options must be finite and positive.
    InvalidInnerOptions { reason: &'static str },

    // ---- Estimation / optimizer ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Outcome grid must include at least one goal per side.
    InvalidMaxGoals { max_goals: usize },

    /// Parameter construction failed while mapping optimizer output.
    InvalidParameters { source: ParamError },
}

impl std::error::Error for ScorelineError {}

impl std::fmt::Display for ScorelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            ScorelineError::EmptyDataset => {
                write!(f, "Match dataset is empty; fitting needs at least one game.")
            }
            ScorelineError::InvalidTeamCount { n_teams, reason } => {
                write!(f, "Invalid team count {n_teams}: {reason}")
            }
            ScorelineError::TeamOutOfRange { game, team, n_teams } => {
                write!(f, "Game {game} references team {team}, but only {n_teams} teams exist.")
            }
            ScorelineError::SelfMatch { game, team } => {
                write!(f, "Game {game} lists team {team} as both home and away side.")
            }
            ScorelineError::ColumnLengthMismatch { column, expected, actual } => {
                write!(f, "Column '{column}' has length {actual}, expected {expected}.")
            }

            // ---- Conditional mode ----
            ScorelineError::HessianNotPositiveDefinite { iteration } => {
                write!(
                    f,
                    "Random-effect Hessian is not positive definite at Newton iteration {iteration}."
                )
            }
            ScorelineError::NonFiniteObjective { value } => {
                write!(f, "Penalized objective is non-finite: {value}")
            }
            ScorelineError::ModeNotConverged { iterations, grad_norm } => {
                write!(
                    f,
                    "Conditional mode did not converge after {iterations} iterations (max |grad| = {grad_norm})."
                )
            }
            ScorelineError::InvalidInnerOptions { reason } => {
                write!(f, "Invalid inner solver options: {reason}")
            }

            // ---- Estimation / optimizer ----
            ScorelineError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet.")
            }
            ScorelineError::InvalidMaxGoals { max_goals } => {
                write!(f, "Invalid goal grid size {max_goals}: must be at least 1.")
            }
            ScorelineError::InvalidParameters { source } => {
                write!(f, "Invalid parameters: {source}")
            }
        }
    }
}

/// Errors raised while building or mapping [`EffectParameters`](crate::scoreline::core::params::EffectParameters).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Optimizer vector length does not match the model layout.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// A random-effect vector has the wrong number of teams.
    EffectLengthMismatch { effect: &'static str, expected: usize, actual: usize },

    /// Parameter entries must be finite.
    NonFiniteParameter { index: usize, value: f64 },

    /// Team index outside `[0, n_teams)`.
    UnknownTeam { team: usize, n_teams: usize },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::EffectLengthMismatch { effect, expected, actual } => {
                write!(f, "Length mismatch for {effect}: expected {expected}, actual {actual}")
            }
            ParamError::NonFiniteParameter { index, value } => {
                write!(f, "Parameter at index {index} is non-finite: {value}")
            }
            ParamError::UnknownTeam { team, n_teams } => {
                write!(f, "Unknown team {team}: model has {n_teams} teams")
            }
        }
    }
}

impl From<ParamError> for ScorelineError {
    fn from(err: ParamError) -> Self {
        ScorelineError::InvalidParameters { source: err }
    }
}

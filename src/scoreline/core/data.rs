//! Match data containers for the scoreline model.
//!
//! Purpose
//! -------
//! Provide a small, validated container for historical match results. This
//! module is the ingestion boundary of the crate: every structural check on
//! team indices happens here once, so the likelihood can read games without
//! re-validating them.
//!
//! Key behaviors
//! -------------
//! - [`Game`] records one result: home/away team indices and goal counts.
//! - [`MatchDataset`] owns the games plus the league size and enforces that
//!   every team index lies in `[0, n_teams)` and no team plays itself.
//! - [`MatchDataset::from_columns`] accepts the parallel-array layout
//!   (`home_goals`, `away_goals`, `home_team`, `away_team`, `n_games`) and
//!   checks every column length against `n_games`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Goal counts are `u32`, so negative counts are unrepresentable.
//! - A dataset is immutable once built; the likelihood only reads it.
//! - Game order carries no meaning; the likelihood is a sum over games.
//! - A dataset with no games is valid: the likelihood reduces to the
//!   priors. Fitting rejects it in `PoissonGoalsModel::check`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, empty input, out-of-range teams,
//!   self-matches and column length mismatches.
use crate::scoreline::{
    core::{
        shape::EffectShape,
        validation::{validate_column_len, validate_games},
    },
    errors::ScorelineResult,
};

/// One observed match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub home_team: usize,
    pub away_team: usize,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl Game {
    pub fn new(home_team: usize, away_team: usize, home_goals: u32, away_goals: u32) -> Self {
        Game { home_team, away_team, home_goals, away_goals }
    }
}

/// `MatchDataset` — validated collection of games for one league.
///
/// Fields
/// ------
/// - `games`: `Vec<Game>`
///   Observed results in arbitrary order.
/// - `shape`: [`EffectShape`]
///   League size `T`; every team index in `games` is `< T`.
///
/// Invariants
/// ----------
/// - `home_team != away_team` and both are `< shape.n_teams` for every game.
///
/// Notes
/// -----
/// - Teams that never appear in `games` are allowed; their effects are
///   identified only through the shared Gaussian prior.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDataset {
    games: Vec<Game>,
    shape: EffectShape,
}

impl MatchDataset {
    /// Construct a validated dataset from a list of games.
    ///
    /// # Errors
    /// - [`ScorelineError::InvalidTeamCount`] if `n_teams < 2`.
    /// - [`ScorelineError::TeamOutOfRange`] / [`ScorelineError::SelfMatch`]
    ///   for the first offending game.
    pub fn new(games: Vec<Game>, n_teams: usize) -> ScorelineResult<Self> {
        let shape = EffectShape::new(n_teams)?;
        validate_games(&games, n_teams)?;
        Ok(MatchDataset { games, shape })
    }

    /// Construct a dataset from parallel columns.
    ///
    /// All four columns must have exactly `n_games` entries; entry `i` of
    /// each column describes game `i`.
    ///
    /// # Errors
    /// - [`ScorelineError::ColumnLengthMismatch`] naming the first column
    ///   whose length differs from `n_games`.
    /// - Any error from [`MatchDataset::new`].
    pub fn from_columns(
        home_goals: &[u32], away_goals: &[u32], home_team: &[usize], away_team: &[usize],
        n_games: usize, n_teams: usize,
    ) -> ScorelineResult<Self> {
        validate_column_len("home_goals", home_goals.len(), n_games)?;
        validate_column_len("away_goals", away_goals.len(), n_games)?;
        validate_column_len("home_team", home_team.len(), n_games)?;
        validate_column_len("away_team", away_team.len(), n_games)?;
        let games = (0..n_games)
            .map(|i| Game::new(home_team[i], away_team[i], home_goals[i], away_goals[i]))
            .collect();
        MatchDataset::new(games, n_teams)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn n_games(&self) -> usize {
        self.games.len()
    }

    pub fn n_teams(&self) -> usize {
        self.shape.n_teams
    }

    pub fn shape(&self) -> EffectShape {
        self.shape
    }

    /// Total goals scored across both sides of every game.
    pub fn total_goals(&self) -> u64 {
        self.games.iter().map(|g| u64::from(g.home_goals) + u64::from(g.away_goals)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Average goals per side per game, `total_goals / (2 · n_games)`; 0 for
    /// an empty dataset.
    pub fn mean_goals_per_side(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.total_goals() as f64 / (2.0 * self.n_games() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoreline::errors::ScorelineError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `MatchDataset::new` happy path and each validation branch.
    // - `MatchDataset::from_columns` column length checks.
    // - Summary accessors used by initialization.
    //
    // They intentionally DO NOT cover:
    // - Likelihood evaluation on datasets (see `likelihood`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A well-formed two-game dataset is accepted and summarized correctly.
    //
    // Given
    // -----
    // - Games 0 v 1 (2–1) and 1 v 0 (0–0) in a two-team league.
    //
    // Expect
    // ------
    // - `n_games == 2`, `n_teams == 2`, `total_goals == 3` and the mean per
    //   side is 0.75.
    fn new_accepts_valid_games_and_reports_summaries() {
        // Arrange
        let games = vec![Game::new(0, 1, 2, 1), Game::new(1, 0, 0, 0)];

        // Act
        let data = MatchDataset::new(games, 2).expect("valid games should be accepted");

        // Assert
        assert_eq!(data.n_games(), 2);
        assert_eq!(data.n_teams(), 2);
        assert_eq!(data.total_goals(), 3);
        assert!((data.mean_goals_per_side() - 0.75).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // A league with no games yet is a valid dataset with zero summaries.
    fn new_accepts_empty_dataset() {
        let data = MatchDataset::new(Vec::new(), 4).expect("empty league is valid");
        assert!(data.is_empty());
        assert_eq!(data.n_games(), 0);
        assert_eq!(data.total_goals(), 0);
        assert_eq!(data.mean_goals_per_side(), 0.0);
        let columns = MatchDataset::from_columns(&[], &[], &[], &[], 0, 4);
        assert_eq!(columns, Ok(data));
    }

    #[test]
    // Purpose
    // -------
    // Team indices must be inside `[0, n_teams)`.
    //
    // Given
    // -----
    // - A second game referencing away team 3 in a three-team league.
    //
    // Expect
    // ------
    // - `TeamOutOfRange { game: 1, team: 3, n_teams: 3 }`.
    fn new_rejects_out_of_range_team() {
        // Arrange
        let games = vec![Game::new(0, 1, 1, 1), Game::new(2, 3, 0, 1)];

        // Act
        let result = MatchDataset::new(games, 3);

        // Assert
        assert_eq!(result, Err(ScorelineError::TeamOutOfRange { game: 1, team: 3, n_teams: 3 }));
    }

    #[test]
    // Purpose
    // -------
    // A team cannot play itself.
    fn new_rejects_self_match() {
        let games = vec![Game::new(1, 1, 0, 0)];
        let result = MatchDataset::new(games, 2);
        assert_eq!(result, Err(ScorelineError::SelfMatch { game: 0, team: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Parallel columns build the same dataset as a list of games.
    //
    // Given
    // -----
    // - Two games encoded column-wise with `n_games = 2`.
    //
    // Expect
    // ------
    // - `from_columns` equals `new` on the equivalent `Game` list.
    fn from_columns_matches_row_constructor() {
        // Arrange
        let home_goals = [2, 0];
        let away_goals = [1, 3];
        let home_team = [0, 2];
        let away_team = [1, 0];

        // Act
        let by_cols =
            MatchDataset::from_columns(&home_goals, &away_goals, &home_team, &away_team, 2, 3)
                .expect("columns are consistent");
        let by_rows = MatchDataset::new(vec![Game::new(0, 1, 2, 1), Game::new(2, 0, 0, 3)], 3)
            .expect("rows are consistent");

        // Assert
        assert_eq!(by_cols, by_rows);
    }

    #[test]
    // Purpose
    // -------
    // A short column is reported by name.
    //
    // Given
    // -----
    // - `away_team` with one entry while `n_games = 2`.
    //
    // Expect
    // ------
    // - `ColumnLengthMismatch { column: "away_team", expected: 2, actual: 1 }`.
    fn from_columns_rejects_short_column() {
        let result = MatchDataset::from_columns(&[1, 0], &[0, 2], &[0, 1], &[1], 2, 2);
        assert_eq!(
            result,
            Err(ScorelineError::ColumnLengthMismatch {
                column: "away_team",
                expected: 2,
                actual: 1
            })
        );
    }
}

//! Scoreline validation helpers — reusable checks for games, columns and θ.
//!
//! Purpose
//! -------
//! Centralize the structural checks used at the ingestion boundary and by the
//! parameter constructors, so that the likelihood engine can stay a pure
//! read-only computation.
//!
//! Conventions
//! -----------
//! - Helpers report the *first* offending entry and never panic on invalid
//!   inputs.
//! - This module contains no I/O and no logging.
use crate::scoreline::{
    core::data::Game,
    errors::{ParamError, ParamResult, ScorelineError, ScorelineResult},
};
use ndarray::ArrayView1;

/// Validate a list of games against the league size. An empty list is
/// valid.
///
/// # Errors
/// - [`ScorelineError::TeamOutOfRange`] if either side is `>= n_teams`.
/// - [`ScorelineError::SelfMatch`] if `home_team == away_team`.
pub fn validate_games(games: &[Game], n_teams: usize) -> ScorelineResult<()> {
    for (index, game) in games.iter().enumerate() {
        for team in [game.home_team, game.away_team] {
            if team >= n_teams {
                return Err(ScorelineError::TeamOutOfRange { game: index, team, n_teams });
            }
        }
        if game.home_team == game.away_team {
            return Err(ScorelineError::SelfMatch { game: index, team: game.home_team });
        }
    }
    Ok(())
}

/// Validate that a parallel input column has `expected` entries.
pub fn validate_column_len(
    column: &'static str, actual: usize, expected: usize,
) -> ScorelineResult<()> {
    if actual != expected {
        return Err(ScorelineError::ColumnLengthMismatch { column, expected, actual });
    }
    Ok(())
}

/// Validate a parameter vector: expected length and finite entries.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != expected`.
/// - [`ParamError::NonFiniteParameter`] for the first NaN/±inf entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    validate_finite(theta, 0)
}

/// Validate that every entry of `values` is finite; `offset` shifts the
/// reported index so callers can point into a larger vector.
pub fn validate_finite(values: ArrayView1<f64>, offset: usize) -> ParamResult<()> {
    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParameter { index: offset + i, value });
        }
    }
    Ok(())
}

/// Validate that `team` is a known team index.
pub fn validate_team(team: usize, n_teams: usize) -> ParamResult<()> {
    if team >= n_teams {
        return Err(ParamError::UnknownTeam { team, n_teams });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Out-of-range checks fire before the self-match check so the reported
    // error names the bad index.
    //
    // Given
    // -----
    // - A single game 5 v 5 in a two-team league.
    //
    // Expect
    // ------
    // - `TeamOutOfRange { game: 0, team: 5, n_teams: 2 }`.
    fn validate_games_reports_range_before_self_match() {
        let games = [Game::new(5, 5, 0, 0)];
        assert_eq!(
            validate_games(&games, 2),
            Err(ScorelineError::TeamOutOfRange { game: 0, team: 5, n_teams: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // θ validation reports length first and then the first non-finite entry.
    fn validate_theta_checks_length_then_finiteness() {
        let short = array![0.0, 1.0];
        assert_eq!(
            validate_theta(short.view(), 3),
            Err(ParamError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );

        let bad = array![0.0, f64::INFINITY, f64::NAN];
        assert!(matches!(
            validate_theta(bad.view(), 3),
            Err(ParamError::NonFiniteParameter { index: 1, .. })
        ));

        let ok = array![0.0, -1.0, 2.5];
        assert!(validate_theta(ok.view(), 3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_finite` offsets the reported index.
    fn validate_finite_applies_offset() {
        let v = array![1.0, f64::NAN];
        assert!(matches!(
            validate_finite(v.view(), 10),
            Err(ParamError::NonFiniteParameter { index: 11, .. })
        ));
    }

    #[test]
    fn validate_team_rejects_unknown_index() {
        assert_eq!(validate_team(4, 4), Err(ParamError::UnknownTeam { team: 4, n_teams: 4 }));
        assert!(validate_team(3, 4).is_ok());
    }
}

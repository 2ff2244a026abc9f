//! League size and optimizer-vector layout for the scoreline model.
//!
//! The full parameter vector `θ` is laid out as
//!
//! ```text
//! [ intercept | attack[0..T) | defense[0..T) | home[0..T) | log σ_att | log σ_def | log σ_home ]
//! ```
//!
//! so `θ.len() = 3T + 4`. The random-effect block `u = [attack, defense, home]`
//! occupies `θ[1 .. 1 + 3T)` and the fixed effects are the remaining four
//! slots. The fitting layer optimizes only the fixed effects
//! `φ = [intercept, log σ_att, log σ_def, log σ_home]`.
use crate::scoreline::errors::{ScorelineError, ScorelineResult};

/// Number of fixed effects: intercept plus three log standard deviations.
pub const N_FIXED: usize = 4;

/// Number of random-effect groups (attack, defense, home).
pub const N_GROUPS: usize = 3;

/// Random-effect group tag used for index arithmetic and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectGroup {
    Attack,
    Defense,
    Home,
}

impl EffectGroup {
    /// Position of the group inside the random-effect block.
    pub fn offset(self) -> usize {
        match self {
            EffectGroup::Attack => 0,
            EffectGroup::Defense => 1,
            EffectGroup::Home => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectGroup::Attack => "attack",
            EffectGroup::Defense => "defense",
            EffectGroup::Home => "home",
        }
    }
}

/// League size `T`.
///
/// Invariant: `n_teams >= 2` (a game needs two distinct sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectShape {
    pub n_teams: usize,
}

impl EffectShape {
    /// Construct an [`EffectShape`] for a league of `n_teams` teams.
    ///
    /// # Errors
    /// - [`ScorelineError::InvalidTeamCount`] if `n_teams < 2`.
    pub fn new(n_teams: usize) -> ScorelineResult<Self> {
        if n_teams < 2 {
            return Err(ScorelineError::InvalidTeamCount {
                n_teams,
                reason: "A league needs at least two teams.",
            });
        }
        Ok(EffectShape { n_teams })
    }

    /// Length of the full parameter vector, `3T + 4`.
    pub fn theta_len(&self) -> usize {
        N_GROUPS * self.n_teams + N_FIXED
    }

    /// Length of the random-effect block, `3T`.
    pub fn n_random(&self) -> usize {
        N_GROUPS * self.n_teams
    }

    /// Index of `(group, team)` inside the random-effect block `u`.
    pub fn random_index(&self, group: EffectGroup, team: usize) -> usize {
        group.offset() * self.n_teams + team
    }

    /// Index of `(group, team)` inside the full parameter vector `θ`.
    pub fn theta_index(&self, group: EffectGroup, team: usize) -> usize {
        1 + self.random_index(group, team)
    }

    /// Index of `log σ_group` inside the full parameter vector `θ`.
    pub fn log_sigma_index(&self, group: EffectGroup) -> usize {
        1 + self.n_random() + group.offset()
    }
}

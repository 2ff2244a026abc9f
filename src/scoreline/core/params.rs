//! Team effects and hyperparameters for the scoreline model.
//!
//! This module provides the parameter container [`EffectParameters`] and its
//! mappings to and from the flat optimizer vectors used elsewhere in the
//! crate.
//!
//! ## Layout
//! - Full vector `θ` (length `3T + 4`):
//!   `[intercept, attack, defense, home, log σ_att, log σ_def, log σ_home]`.
//! - Random effects `u` (length `3T`): `[attack, defense, home]`.
//! - Fixed effects `φ` (length 4): `[intercept, log σ_att, log σ_def, log σ_home]`.
//!
//! ## Positivity
//! Group standard deviations are stored on the log scale, so every finite
//! `log_sigma_*` maps to a strictly positive `σ = exp(log_sigma)`. No
//! constrained optimization is ever needed.
use crate::scoreline::{
    core::{
        shape::{EffectGroup, EffectShape, N_FIXED},
        validation::{validate_finite, validate_theta},
    },
    errors::{ParamError, ParamResult},
};
use ndarray::{Array1, ArrayView1, s};

/// Fixed and random effects for one likelihood evaluation.
///
/// Fields are public so drivers (and tests) can build arbitrary, possibly
/// non-finite values; [`EffectParameters::new`] is the validated entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectParameters {
    /// Global log scoring rate.
    pub intercept: f64,
    /// Per-team attack strength, length `T`.
    pub attack: Array1<f64>,
    /// Per-team defense strength, length `T`.
    pub defense: Array1<f64>,
    /// Per-team home advantage, length `T`.
    pub home: Array1<f64>,
    pub log_sigma_attack: f64,
    pub log_sigma_defense: f64,
    pub log_sigma_home: f64,
}

impl EffectParameters {
    /// Create validated parameters.
    ///
    /// Validates:
    /// - `attack`, `defense`, `home` each have length `shape.n_teams`.
    /// - Every entry is finite.
    ///
    /// # Errors
    /// - [`ParamError::EffectLengthMismatch`] naming the first wrong vector.
    /// - [`ParamError::NonFiniteParameter`] indexed in θ layout.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        shape: &EffectShape, intercept: f64, attack: Array1<f64>, defense: Array1<f64>,
        home: Array1<f64>, log_sigma_attack: f64, log_sigma_defense: f64, log_sigma_home: f64,
    ) -> ParamResult<Self> {
        let t = shape.n_teams;
        for (effect, values) in [("attack", &attack), ("defense", &defense), ("home", &home)] {
            if values.len() != t {
                return Err(ParamError::EffectLengthMismatch {
                    effect,
                    expected: t,
                    actual: values.len(),
                });
            }
        }
        let params = EffectParameters {
            intercept,
            attack,
            defense,
            home,
            log_sigma_attack,
            log_sigma_defense,
            log_sigma_home,
        };
        validate_finite(params.to_theta().view(), 0)?;
        Ok(params)
    }

    /// All effects zero and all `log σ = 0` (unit standard deviations).
    pub fn zeros(shape: &EffectShape) -> Self {
        let t = shape.n_teams;
        EffectParameters {
            intercept: 0.0,
            attack: Array1::zeros(t),
            defense: Array1::zeros(t),
            home: Array1::zeros(t),
            log_sigma_attack: 0.0,
            log_sigma_defense: 0.0,
            log_sigma_home: 0.0,
        }
    }

    /// Number of teams `T`.
    pub fn n_teams(&self) -> usize {
        self.attack.len()
    }

    /// Build parameters from the full optimizer vector `θ`.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] if `θ.len() != 3T + 4`.
    /// - [`ParamError::NonFiniteParameter`] for the first non-finite entry.
    pub fn from_theta(theta: ArrayView1<f64>, shape: &EffectShape) -> ParamResult<Self> {
        validate_theta(theta, shape.theta_len())?;
        let t = shape.n_teams;
        let r = shape.n_random();
        Ok(EffectParameters {
            intercept: theta[0],
            attack: theta.slice(s![1..1 + t]).to_owned(),
            defense: theta.slice(s![1 + t..1 + 2 * t]).to_owned(),
            home: theta.slice(s![1 + 2 * t..1 + r]).to_owned(),
            log_sigma_attack: theta[1 + r],
            log_sigma_defense: theta[2 + r],
            log_sigma_home: theta[3 + r],
        })
    }

    /// Flatten into the full optimizer vector `θ`.
    pub fn to_theta(&self) -> Array1<f64> {
        let t = self.n_teams();
        let r = 3 * t;
        let mut theta = Array1::zeros(r + N_FIXED);
        theta[0] = self.intercept;
        theta.slice_mut(s![1..1 + t]).assign(&self.attack);
        theta.slice_mut(s![1 + t..1 + 2 * t]).assign(&self.defense);
        theta.slice_mut(s![1 + 2 * t..1 + r]).assign(&self.home);
        theta[1 + r] = self.log_sigma_attack;
        theta[2 + r] = self.log_sigma_defense;
        theta[3 + r] = self.log_sigma_home;
        theta
    }

    /// Random-effect block `u = [attack, defense, home]`.
    pub fn random_effects(&self) -> Array1<f64> {
        let t = self.n_teams();
        let mut u = Array1::zeros(3 * t);
        u.slice_mut(s![0..t]).assign(&self.attack);
        u.slice_mut(s![t..2 * t]).assign(&self.defense);
        u.slice_mut(s![2 * t..]).assign(&self.home);
        u
    }

    /// Fixed-effect block `φ = [intercept, log σ_att, log σ_def, log σ_home]`.
    pub fn fixed_effects(&self) -> Array1<f64> {
        Array1::from(vec![
            self.intercept,
            self.log_sigma_attack,
            self.log_sigma_defense,
            self.log_sigma_home,
        ])
    }

    /// Copy of `self` with the random-effect block replaced by `u`.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] if `u.len() != 3T`.
    pub fn with_random_effects(&self, u: ArrayView1<f64>) -> ParamResult<Self> {
        let t = self.n_teams();
        if u.len() != 3 * t {
            return Err(ParamError::ThetaLengthMismatch { expected: 3 * t, actual: u.len() });
        }
        Ok(EffectParameters {
            attack: u.slice(s![0..t]).to_owned(),
            defense: u.slice(s![t..2 * t]).to_owned(),
            home: u.slice(s![2 * t..]).to_owned(),
            ..self.clone()
        })
    }

    /// Parameters with fixed effects `φ` and all random effects at zero.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] if `φ.len() != 4`.
    /// - [`ParamError::NonFiniteParameter`] for the first non-finite entry.
    pub fn from_fixed_effects(phi: ArrayView1<f64>, shape: &EffectShape) -> ParamResult<Self> {
        validate_theta(phi, N_FIXED)?;
        Ok(EffectParameters {
            intercept: phi[0],
            log_sigma_attack: phi[1],
            log_sigma_defense: phi[2],
            log_sigma_home: phi[3],
            ..EffectParameters::zeros(shape)
        })
    }

    /// Effect vector for one group.
    pub fn effects(&self, group: EffectGroup) -> ArrayView1<'_, f64> {
        match group {
            EffectGroup::Attack => self.attack.view(),
            EffectGroup::Defense => self.defense.view(),
            EffectGroup::Home => self.home.view(),
        }
    }

    /// Log standard deviation for one group.
    pub fn log_sigma(&self, group: EffectGroup) -> f64 {
        match group {
            EffectGroup::Attack => self.log_sigma_attack,
            EffectGroup::Defense => self.log_sigma_defense,
            EffectGroup::Home => self.log_sigma_home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn shape(t: usize) -> EffectShape {
        EffectShape::new(t).expect("valid league size")
    }

    fn sample_params() -> EffectParameters {
        EffectParameters::new(
            &shape(2),
            0.3,
            array![0.1, -0.1],
            array![0.2, -0.2],
            array![0.05, 0.15],
            -0.5,
            -0.7,
            -1.2,
        )
        .expect("sample parameters are valid")
    }

    #[test]
    // Purpose
    // -------
    // `to_theta` writes the documented layout and `from_theta` inverts it.
    //
    // Given
    // -----
    // - A two-team parameter set with distinct entries.
    //
    // Expect
    // ------
    // - θ equals the hand-written vector and maps back to the same params.
    fn theta_mapping_follows_documented_layout() {
        // Arrange
        let params = sample_params();
        let expected = array![0.3, 0.1, -0.1, 0.2, -0.2, 0.05, 0.15, -0.5, -0.7, -1.2];

        // Act
        let theta = params.to_theta();
        let back = EffectParameters::from_theta(theta.view(), &shape(2))
            .expect("θ produced by to_theta is valid");

        // Assert
        assert_eq!(theta, expected);
        assert_eq!(back, params);
    }

    #[test]
    // Purpose
    // -------
    // Random and fixed blocks partition θ.
    //
    // Expect
    // ------
    // - `random_effects` is `[attack, defense, home]` and `fixed_effects`
    //   is `[intercept, log σ_att, log σ_def, log σ_home]`.
    fn random_and_fixed_blocks_are_extracted() {
        let params = sample_params();
        assert_eq!(params.random_effects(), array![0.1, -0.1, 0.2, -0.2, 0.05, 0.15]);
        assert_eq!(params.fixed_effects(), array![0.3, -0.5, -0.7, -1.2]);
    }

    #[test]
    // Purpose
    // -------
    // Replacing the random block keeps the fixed effects untouched.
    fn with_random_effects_replaces_only_random_block() {
        // Arrange
        let params = sample_params();
        let u = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        // Act
        let updated = params.with_random_effects(u.view()).expect("length 3T");

        // Assert
        assert_eq!(updated.attack, array![1.0, 2.0]);
        assert_eq!(updated.defense, array![3.0, 4.0]);
        assert_eq!(updated.home, array![5.0, 6.0]);
        assert_eq!(updated.fixed_effects(), params.fixed_effects());
        assert!(params.with_random_effects(array![1.0].view()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Fixed effects alone seed a parameter set with zero random effects.
    fn from_fixed_effects_zeroes_random_block() {
        let phi = array![0.4, 0.1, 0.2, 0.3];
        let params = EffectParameters::from_fixed_effects(phi.view(), &shape(3))
            .expect("four finite fixed effects");
        assert_eq!(params.fixed_effects(), phi);
        assert!(params.random_effects().iter().all(|&x| x == 0.0));
        assert_eq!(params.n_teams(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Constructor rejects wrong lengths and non-finite entries.
    //
    // Expect
    // ------
    // - A length-1 `defense` yields `EffectLengthMismatch` naming "defense".
    // - A NaN `log_sigma_home` yields `NonFiniteParameter` at its θ index.
    fn new_rejects_bad_lengths_and_non_finite_values() {
        let s = shape(2);
        let short = EffectParameters::new(
            &s,
            0.0,
            array![0.0, 0.0],
            array![0.0],
            array![0.0, 0.0],
            0.0,
            0.0,
            0.0,
        );
        assert_eq!(
            short,
            Err(ParamError::EffectLengthMismatch { effect: "defense", expected: 2, actual: 1 })
        );

        let nan = EffectParameters::new(
            &s,
            0.0,
            array![0.0, 0.0],
            array![0.0, 0.0],
            array![0.0, 0.0],
            0.0,
            0.0,
            f64::NAN,
        );
        assert!(matches!(nan, Err(ParamError::NonFiniteParameter { index: 9, .. })));
    }
}

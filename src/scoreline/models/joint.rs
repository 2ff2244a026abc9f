//! Joint density of team effects and results over the full θ.
//!
//! [`JointDensity`] exposes `ℓ(θ) = −NLL(θ)` and its analytic gradient
//! through [`LogLikelihood`], for drivers that handle the random effects
//! themselves (external samplers, alternative marginalizations). Maximizing
//! it jointly over `θ` is not a sensible estimator: the density is unbounded
//! as any `σ → 0` with its effects at zero.
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, Theta},
    },
    scoreline::{
        core::{
            data::MatchDataset,
            likelihood::{neg_log_likelihood, nll_gradient},
            params::EffectParameters,
            shape::EffectShape,
            validation::validate_theta,
        },
        errors::ScorelineError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDensity {
    pub shape: EffectShape,
}

impl JointDensity {
    pub fn new(shape: EffectShape) -> JointDensity {
        JointDensity { shape }
    }
}

impl LogLikelihood for JointDensity {
    type Data = MatchDataset;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = EffectParameters::from_theta(theta.view(), &self.shape)?;
        Ok(-neg_log_likelihood(data, &params))
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.shape.theta_len())?;
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
        let params = EffectParameters::from_theta(theta.view(), &self.shape)?;
        Ok(-nll_gradient(data, &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimization::errors::OptError, scoreline::core::data::Game};
    use finitediff::FiniteDiff;
    use ndarray::Array1;

    fn data() -> MatchDataset {
        let games = vec![
            Game::new(0, 1, 2, 1),
            Game::new(1, 2, 0, 0),
            Game::new(2, 0, 3, 2),
            Game::new(1, 0, 1, 4),
        ];
        MatchDataset::new(games, 3).expect("valid league")
    }

    fn theta(shape: &EffectShape) -> Array1<f64> {
        Array1::from_iter((0..shape.theta_len()).map(|i| 0.1 * ((i * 7 % 5) as f64) - 0.2))
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient of the joint log density agrees with central
    // differences of `value`.
    //
    // Given
    // -----
    // - Three teams, four games, a non-trivial θ of length 13.
    //
    // Expect
    // ------
    // - value = −NLL and |grad − numeric| < 1e-6 entry-wise.
    fn gradient_matches_central_differences() {
        // Arrange
        let shape = EffectShape::new(3).expect("valid league");
        let density = JointDensity::new(shape);
        let data = data();
        let theta = theta(&shape);

        // Act
        let value = density.value(&theta, &data).expect("valid theta");
        let grad = density.grad(&theta, &data).expect("valid theta");
        let numeric = theta.central_diff(&|t: &Array1<f64>| {
            density.value(t, &data).unwrap_or(f64::NAN)
        });

        // Assert
        let params = EffectParameters::from_theta(theta.view(), &shape).expect("valid theta");
        assert_eq!(value, -neg_log_likelihood(&data, &params));
        assert!(grad.iter().zip(numeric.iter()).all(|(g, n)| (g - n).abs() < 1e-6));
    }

    #[test]
    fn check_and_value_reject_wrong_length() {
        let shape = EffectShape::new(3).expect("valid league");
        let density = JointDensity::new(shape);
        let data = data();
        let short = Array1::zeros(12);
        assert!(matches!(
            density.check(&short, &data),
            Err(OptError::ThetaLengthMismatch { expected: 13, actual: 12 })
        ));
        assert!(matches!(
            density.value(&short, &data),
            Err(OptError::ThetaLengthMismatch { expected: 13, actual: 12 })
        ));
        let other = JointDensity::new(EffectShape::new(4).expect("valid league"));
        assert!(matches!(
            other.check(&Array1::zeros(16), &data),
            Err(OptError::ModelError { .. })
        ));
    }
}

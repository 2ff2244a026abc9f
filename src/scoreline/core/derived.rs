//! Group standard deviations reported on the natural scale.
use crate::scoreline::core::params::EffectParameters;

/// `σ = exp(log σ)` for each random-effect group.
///
/// Strictly positive whenever the corresponding `log_sigma_*` is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    pub sigma_attack: f64,
    pub sigma_defense: f64,
    pub sigma_home: f64,
}

/// Map log standard deviations to standard deviations.
///
/// Pure; `compute_derived(p).sigma_attack == p.log_sigma_attack.exp()` holds
/// exactly.
pub fn compute_derived(params: &EffectParameters) -> DerivedQuantities {
    DerivedQuantities {
        sigma_attack: params.log_sigma_attack.exp(),
        sigma_defense: params.log_sigma_defense.exp(),
        sigma_home: params.log_sigma_home.exp(),
    }
}

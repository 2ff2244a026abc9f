//! Log densities used by the scoreline likelihood.
//!
//! Both functions are evaluated directly on the log scale with no guards:
//! a non-positive rate or standard deviation yields `-inf`/`NaN` and the
//! caller sees it unchanged.
use statrs::function::factorial::ln_factorial;

/// `½ ln(2π)`.
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_8;

/// Poisson log mass `ln P(K = k; λ) = k ln λ − λ − ln k!`.
///
/// For `k = 0` the `k ln λ` term is taken as exactly zero, so `λ = 0` gives
/// `ln P(0; 0) = 0`.
pub fn ln_poisson_pmf(k: u32, lambda: f64) -> f64 {
    let kf = f64::from(k);
    let k_ln_lambda = if k == 0 { 0.0 } else { kf * lambda.ln() };
    k_ln_lambda - lambda - ln_factorial(u64::from(k))
}

/// Normal log density `ln N(x; μ, σ) = −ln σ − ½ ln 2π − ½ ((x − μ)/σ)²`.
pub fn ln_normal_pdf(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    -sd.ln() - HALF_LN_2PI - 0.5 * z * z
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Continuous, Discrete, Normal, Poisson};
    use std::f64::consts::PI;

    #[test]
    fn half_ln_2pi_constant_is_exact() {
        assert!((HALF_LN_2PI - 0.5 * (2.0 * PI).ln()).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // The closed-form Poisson log mass agrees with statrs on a small grid.
    //
    // Given
    // -----
    // - k ∈ {0, 1, 2, 5, 9}, λ ∈ {0.3, 1.0, 2.7}.
    //
    // Expect
    // ------
    // - Agreement to 1e-12.
    fn ln_poisson_pmf_matches_statrs() {
        for &lambda in &[0.3, 1.0, 2.7] {
            let dist = Poisson::new(lambda).expect("positive rate");
            for &k in &[0_u32, 1, 2, 5, 9] {
                let ours = ln_poisson_pmf(k, lambda);
                let reference = dist.ln_pmf(u64::from(k));
                assert!((ours - reference).abs() < 1e-12, "k={k}, λ={lambda}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Known values: ln Pois(2; 1) = −1 − ln 2 and ln Pois(1; 1) = −1.
    fn ln_poisson_pmf_known_values() {
        assert!((ln_poisson_pmf(2, 1.0) - (-1.0 - 2.0_f64.ln())).abs() < 1e-15);
        assert!((ln_poisson_pmf(1, 1.0) + 1.0).abs() < 1e-15);
        assert_eq!(ln_poisson_pmf(0, 0.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Non-positive rates are not guarded.
    //
    // Expect
    // ------
    // - k > 0 with λ = 0 gives −∞; λ < 0 gives NaN.
    fn ln_poisson_pmf_propagates_invalid_rates() {
        assert_eq!(ln_poisson_pmf(3, 0.0), f64::NEG_INFINITY);
        assert!(ln_poisson_pmf(3, -1.0).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // The normal log density agrees with statrs, including a non-zero mean.
    fn ln_normal_pdf_matches_statrs() {
        for &(x, mean, sd) in &[(0.0, 0.0, 1.0), (0.7, 0.0, 0.4), (-2.3, 0.5, 1.9)] {
            let dist = Normal::new(mean, sd).expect("positive sd");
            let reference = dist.ln_pdf(x);
            assert!((ln_normal_pdf(x, mean, sd) - reference).abs() < 1e-12);
        }
        assert!(ln_normal_pdf(1.0, 0.0, -1.0).is_nan());
    }
}

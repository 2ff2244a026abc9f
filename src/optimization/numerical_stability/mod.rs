//! numerical_stability — shared tolerances and the delta method for
//! log-scale parameters.
//!
//! Group standard deviations are estimated as `log σ`, so the only
//! transform the crate needs is `exp`. [`delta_method_exp`] carries a
//! covariance from `log σ` to `σ`; [`EIGEN_EPS`] is the eigenvalue cutoff
//! used by the pseudoinverse in [`inference`](crate::inference).

pub mod transformations;

pub use self::transformations::{EIGEN_EPS, delta_method_exp};

pub mod prelude {
    pub use super::transformations::{EIGEN_EPS, delta_method_exp};
}

//! inference — uncertainty for fitted parameters.
//!
//! [`hessian`] builds the observed-information covariance from a gradient
//! map and returns standard errors. Model layers combine it with
//! [`delta_method_exp`](crate::optimization::numerical_stability::delta_method_exp)
//! to report standard errors on the natural scale.

pub mod hessian;

pub use self::hessian::{calc_covariance, calc_standard_errors, standard_errors_from_covariance};

pub mod prelude {
    pub use super::hessian::{
        calc_covariance, calc_standard_errors, standard_errors_from_covariance,
    };
}

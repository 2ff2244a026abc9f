//! L-BFGS construction for each supported line search.
//!
//! Builders apply the history size and the gradient/cost tolerances from
//! [`MLEOptions`]. The starting point and iteration cap belong to the
//! executor and are set in [`run_lbfgs`](crate::optimization::loglik_optimizer::run::run_lbfgs).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with a Hager–Zhang line search.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance as [`OptError`](crate::optimization::errors::OptError).
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with a More–Thuente line search.
///
/// # Errors
/// Propagates argmin's rejection of a tolerance as [`OptError`](crate::optimization::errors::OptError).
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply `tol_grad` / `tol_cost` when present; absent ones keep argmin's
/// defaults.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::traits::{LineSearcher, Tolerances},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of both L-BFGS variants with default and explicit memory.
    // - Tolerance wiring through `configure_lbfgs`, including argmin's own
    //   rejection of a tolerance that bypassed `Tolerances::new`.
    //
    // They intentionally DO NOT cover:
    // - Running the solver; see the model and integration tests.
    // -------------------------------------------------------------------------

    fn options(line_searcher: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).expect("valid tolerances");
        MLEOptions::new(tols, line_searcher, false, mem).expect("valid options")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with the default and an explicit history size.
    fn builders_accept_default_and_explicit_memory() {
        assert!(build_optimizer_hager_zhang(&options(LineSearcher::HagerZhang, None)).is_ok());
        assert!(build_optimizer_hager_zhang(&options(LineSearcher::HagerZhang, Some(11))).is_ok());
        assert!(build_optimizer_more_thuente(&options(LineSearcher::MoreThuente, None)).is_ok());
        assert!(build_optimizer_more_thuente(&options(LineSearcher::MoreThuente, Some(3))).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves argmin defaults in place when no tolerance is
    // given.
    //
    // Given
    // -----
    // - Options with only an iteration cap.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("valid tolerances");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("valid options");
        assert!(configure_lbfgs(raw, &opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A negative tolerance set directly on the struct is rejected by argmin
    // and surfaces as an `OptError`.
    fn configure_lbfgs_surfaces_backend_rejection() {
        let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let mut opts = options(LineSearcher::HagerZhang, None);
        opts.tols.tol_grad = Some(-1.0);
        assert!(matches!(configure_lbfgs(raw, &opts), Err(OptError::InvalidParameter { .. })));
    }
}

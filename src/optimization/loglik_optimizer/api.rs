//! Entry point for maximizing a [`LogLikelihood`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `ℓ(θ)` with L-BFGS and the line search named in `opts`.
///
/// Runs `f.check(theta0, data)` first, then minimizes `−ℓ` through
/// [`ArgMinAdapter`].
///
/// # Errors
/// - Whatever `f.check` rejects.
/// - Solver construction and runtime errors, including model errors raised
///   during evaluation.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_scoreline::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize},
/// };
///
/// struct Gaussian;
/// impl LogLikelihood for Gaussian {
///     type Data = Vec<f64>;
///     fn value(&self, theta: &Theta, data: &Vec<f64>) -> OptResult<f64> {
///         Ok(-data.iter().map(|x| 0.5 * (x - theta[0]).powi(2)).sum::<f64>())
///     }
///     fn check(&self, _: &Theta, _: &Vec<f64>) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Gaussian, array![0.0], &vec![1.0, 2.0, 3.0], &MLEOptions::default())?;
/// assert!((out.theta_hat[0] - 2.0).abs() < 1e-4);
/// # Ok::<(), rust_scoreline::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

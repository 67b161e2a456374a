//! Convergence loop that drives a step-wise [`Optimizer`] against a known
//! optimum and returns a crate-friendly [`DriverOutcome`].
use log::{info, warn};

use crate::{
    driver::{
        errors::{DriverError, DriverResult},
        traits::{DriverOptions, DriverOutcome, Optimizer},
    },
    evaluation::{Objective, Point},
    mesh::Mesh,
};

/// Repeatedly step `it` until the best value is within `opts.tol` of
/// `optimum` or `opts.max_evals` evaluations have been spent.
///
/// The budget is checked before every step, so the final count may exceed
/// `max_evals` by up to one step's worth of evaluations. A step that
/// performs no evaluations ends the run unconverged.
///
/// # Errors
/// - [`DriverError::StepFailed`] as soon as a step fails. The error carries
///   the total evaluation count (including the failed step's partial count)
///   and the best point from the last successful step.
/// - [`DriverError::InvalidMaxEvals`] if `opts.max_evals == 0`.
pub fn minimize<O: Optimizer + ?Sized>(
    it: &mut O, obj: &dyn Objective, mut mesh: Option<&mut dyn Mesh>, optimum: f64,
    opts: &DriverOptions,
) -> DriverResult<DriverOutcome> {
    let mut neval = 0;
    let mut iterations = 0;
    let mut best: Option<Point> = None;

    while neval < opts.max_evals {
        let result = match mesh.as_mut() {
            Some(m) => it.iterate(obj, Some(&mut **m)),
            None => it.iterate(obj, None),
        };
        let step = match result {
            Ok(step) => step,
            Err(source) => {
                neval += source.neval();
                warn!("step {} failed after {neval} evaluation(s): {source}", iterations + 1);
                return Err(DriverError::StepFailed { neval, best, source });
            }
        };
        neval += step.neval;
        iterations += 1;

        if convergence_error(step.best.val, optimum) < opts.tol {
            info!("converged after {iterations} step(s), {neval} evaluation(s): {}", step.best.val);
            return Ok(DriverOutcome { best: step.best, neval, iterations, converged: true });
        }
        let stalled = step.neval == 0;
        best = Some(step.best);
        if stalled {
            warn!("step {iterations} performed no evaluations; stopping");
            break;
        }
    }

    match best {
        Some(best) => {
            info!(
                "stopped after {iterations} step(s), {neval} evaluation(s) without converging: {}",
                best.val
            );
            Ok(DriverOutcome { best, neval, iterations, converged: false })
        }
        None => Err(DriverError::InvalidMaxEvals {
            max_evals: opts.max_evals,
            reason: "Evaluation budget must be greater than zero.",
        }),
    }
}

/// Relative error against `optimum`, or absolute error when it is zero.
pub fn convergence_error(val: f64, optimum: f64) -> f64 {
    if optimum == 0.0 { (val - optimum).abs() } else { (val - optimum).abs() / optimum.abs() }
}

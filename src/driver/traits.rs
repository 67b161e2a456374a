//! Public API surface for driving step-wise optimizers.
//!
//! - [`Optimizer`]: the one-step contract a driver loop consumes.
//! - [`Step`]: what one step reports.
//! - [`DriverOptions`]: stopping rules for [`minimize`](crate::driver::minimize).
//! - [`DriverOutcome`]: normalized result of a driver run.
use crate::{
    driver::errors::{DriverError, DriverResult},
    evaluation::{Objective, Point},
    mesh::Mesh,
    swarm::SwarmResult,
};

pub const DEFAULT_TOL: f64 = 1e-4;
pub const DEFAULT_MAX_EVALS: usize = 10_000;

/// Outcome of a single optimizer step.
///
/// - `best`: best point known after the step.
/// - `neval`: evaluations performed by the step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub best: Point,
    pub neval: usize,
}

/// An optimizer that advances one step per call.
///
/// Implementations must not retry or suppress evaluation failures; a failed
/// step returns its error and the driver stops.
pub trait Optimizer {
    fn iterate(&mut self, obj: &dyn Objective, mesh: Option<&mut dyn Mesh>) -> SwarmResult<Step>;
}

impl<T: Optimizer + ?Sized> Optimizer for Box<T> {
    fn iterate(&mut self, obj: &dyn Objective, mesh: Option<&mut dyn Mesh>) -> SwarmResult<Step> {
        (**self).iterate(obj, mesh)
    }
}

/// Stopping rules for the driver loop.
///
/// - `tol`: stop once the error against the known optimum drops below it.
///   The error is relative (`|best - optimum| / |optimum|`) unless the
///   optimum is zero, where it is absolute.
/// - `max_evals`: stop once at least this many evaluations were performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverOptions {
    pub tol: f64,
    pub max_evals: usize,
}

impl DriverOptions {
    /// Construct validated driver options.
    ///
    /// # Errors
    /// - [`DriverError::InvalidTolerance`] if `tol` is non-finite or `<= 0`.
    /// - [`DriverError::InvalidMaxEvals`] if `max_evals == 0`.
    pub fn new(tol: f64, max_evals: usize) -> DriverResult<Self> {
        if !tol.is_finite() {
            return Err(DriverError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(DriverError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
        }
        if max_evals == 0 {
            return Err(DriverError::InvalidMaxEvals {
                max_evals,
                reason: "Evaluation budget must be greater than zero.",
            });
        }
        Ok(Self { tol, max_evals })
    }
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { tol: DEFAULT_TOL, max_evals: DEFAULT_MAX_EVALS }
    }
}

/// Result of a driver run.
///
/// - `best`: best point found.
/// - `neval`: total evaluations performed.
/// - `iterations`: optimizer steps taken.
/// - `converged`: `true` if the tolerance was met before the budget ran out.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOutcome {
    pub best: Point,
    pub neval: usize,
    pub iterations: usize,
    pub converged: bool,
}

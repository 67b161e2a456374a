//! driver::errors — option validation and step failures surfaced by the
//! convergence loop.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{evaluation::Point, swarm::SwarmError};

/// Result alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    // ---- DriverOptions ----
    /// Convergence tolerance needs to be positive and finite.
    InvalidTolerance { tol: f64, reason: &'static str },

    /// Evaluation budget needs to be positive.
    InvalidMaxEvals { max_evals: usize, reason: &'static str },

    // ---- Run ----
    /// A step failed; carries the evaluations accumulated so far (including
    /// the partial count of the failed step) and the best point seen before
    /// the failure, if any step succeeded.
    StepFailed { neval: usize, best: Option<Point>, source: SwarmError },
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::StepFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            DriverError::InvalidMaxEvals { max_evals, reason } => {
                write!(f, "Invalid evaluation budget {max_evals}: {reason}")
            }
            DriverError::StepFailed { neval, best, source } => match best {
                Some(best) => write!(
                    f,
                    "Optimization stopped after {neval} evaluation(s) (best value {}): {source}",
                    best.val
                ),
                None => write!(f, "Optimization stopped after {neval} evaluation(s): {source}"),
            },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DriverError> for PyErr {
    fn from(err: DriverError) -> PyErr {
        PyValueError::new_err(format!("DriverError: {err}"))
    }
}

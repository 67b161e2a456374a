//! evaluation::errors — objective failures and batch aborts.
//!
//! Purpose
//! -------
//! Provide the error surface shared by objectives and evaluators. A single
//! point's failure is an [`ObjectiveError`]; a batch that stops (or finishes
//! with a failure) is a [`BatchError`] that also carries the points which
//! were evaluated before the batch gave up.
//!
//! Key behaviors
//! -------------
//! - Attach human-readable `Display` messages to each variant.
//! - Map `argmin` backend errors into [`ObjectiveError::Backend`] so argmin
//!   cost functions can be used as objectives without leaking argmin types.
//! - Keep partial results attached to batch failures so callers can report
//!   how many evaluations were performed before the abort.
//!
//! Conventions
//! -----------
//! - A failed evaluation carries the value `+inf` wherever a value has to be
//!   recorded for it (lower is better, so a failure never becomes a best).
//! - `BatchError::source` is the *last* failure seen by the evaluator; for
//!   evaluators that stop on the first failure this is also the first one.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use argmin::core::{ArgminError, Error};

use crate::evaluation::point::Point;

/// Result alias for a single objective evaluation.
pub type ObjectiveResult<T> = Result<T, ObjectiveError>;

/// Result alias for a batch evaluation.
pub type EvalResult = Result<Vec<Point>, BatchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveError {
    /// The objective could not produce a value for the given coordinates.
    Failed { reason: String },

    /// The objective produced NaN or an infinite value.
    NonFinite { value: f64 },

    /// The coordinate vector does not have the dimensionality the objective
    /// was written for.
    DimensionMismatch { expected: usize, found: usize },

    /// Wrapper for errors raised by an argmin `CostFunction`.
    Backend { text: String },
}

impl ObjectiveError {
    /// Shorthand for [`ObjectiveError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        ObjectiveError::Failed { reason: reason.into() }
    }
}

impl std::error::Error for ObjectiveError {}

impl std::fmt::Display for ObjectiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveError::Failed { reason } => {
                write!(f, "Objective evaluation failed: {reason}")
            }
            ObjectiveError::NonFinite { value } => {
                write!(f, "Objective returned a non-finite value: {value}")
            }
            ObjectiveError::DimensionMismatch { expected, found } => {
                write!(f, "Objective dimension mismatch: expected {expected}, found {found}")
            }
            ObjectiveError::Backend { text } => {
                write!(f, "Cost function backend error: {text}")
            }
        }
    }
}

impl From<Error> for ObjectiveError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => ObjectiveError::Backend { text: argmin_err.to_string() },
            Err(err) => match err.downcast::<ObjectiveError>() {
                Ok(obj_err) => obj_err,
                Err(other) => ObjectiveError::Backend { text: other.to_string() },
            },
        }
    }
}

/// A batch evaluation that ended with a failure.
///
/// - `evaluated`: every point the evaluator finished before returning, in the
///   order the evaluator produced them. Failed points that were recorded
///   (continue-on-error mode) carry `val = +inf`.
/// - `source`: the failure reported for the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchError {
    pub evaluated: Vec<Point>,
    pub source: ObjectiveError,
}

impl BatchError {
    pub fn new(evaluated: Vec<Point>, source: ObjectiveError) -> Self {
        Self { evaluated, source }
    }

    /// Number of points evaluated before the batch was abandoned.
    pub fn neval(&self) -> usize {
        self.evaluated.len()
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Batch evaluation failed after {} point(s): {}", self.evaluated.len(), self.source)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ObjectiveError> for PyErr {
    fn from(err: ObjectiveError) -> PyErr {
        PyValueError::new_err(format!("ObjectiveError: {err}"))
    }
}

#[cfg(feature = "python-bindings")]
impl From<BatchError> for PyErr {
    fn from(err: BatchError) -> PyErr {
        PyValueError::new_err(format!("BatchError: {err}"))
    }
}

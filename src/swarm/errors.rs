//! swarm::errors — errors raised while building or stepping a swarm.
//!
//! Construction and configuration problems get their own variants; failures
//! from the layers below are wrapped so the iterator can report them with
//! the evaluation count accrued in the aborted step.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{evaluation::ObjectiveError, mesh::MeshError};

/// Result alias for swarm operations.
pub type SwarmResult<T> = Result<T, SwarmError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SwarmError {
    // ---- Population ----
    /// A population needs at least one particle for a global best.
    EmptyPopulation,

    /// Velocity bound vectors differ from the point dimension.
    VelocityBoundsMismatch { vmin: usize, vmax: usize, dim: usize },

    /// A lower velocity bound exceeds the upper one.
    InvertedVelocityBounds { index: usize, vmin: f64, vmax: f64 },

    /// Position bound vectors have different lengths.
    BoundsMismatch { lower: usize, upper: usize },

    /// A lower position bound exceeds the upper one.
    InvertedBounds { index: usize, lower: f64, upper: f64 },

    /// Points (or a point and a velocity) of different dimensionality.
    PointDimMismatch { expected: usize, found: usize },

    // ---- Mover configuration ----
    /// A velocity coefficient is negative or non-finite.
    InvalidCoefficient { name: &'static str, value: f64, reason: &'static str },

    /// The fixed speed cap is negative or non-finite.
    InvalidMaxSpeed { value: f64 },

    // ---- Step failures ----
    /// The evaluator returned no result for a particle's coordinates.
    MissingResult { id: usize },

    /// The evaluator aborted the batch after `neval` evaluations.
    Evaluation { neval: usize, source: ObjectiveError },

    /// Mesh configuration error while snapping.
    Mesh(MeshError),
}

impl SwarmError {
    /// Evaluations performed before the error, where known.
    pub fn neval(&self) -> usize {
        match self {
            SwarmError::Evaluation { neval, .. } => *neval,
            _ => 0,
        }
    }
}

impl std::error::Error for SwarmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwarmError::Evaluation { source, .. } => Some(source),
            SwarmError::Mesh(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SwarmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwarmError::EmptyPopulation => write!(f, "Population has no particles"),
            SwarmError::VelocityBoundsMismatch { vmin, vmax, dim } => write!(
                f,
                "Velocity bounds have lengths {vmin} and {vmax}, expected point dimension {dim}"
            ),
            SwarmError::InvertedVelocityBounds { index, vmin, vmax } => {
                write!(f, "Velocity lower bound {vmin} exceeds upper bound {vmax} at index {index}")
            }
            SwarmError::BoundsMismatch { lower, upper } => {
                write!(f, "Lower and upper bounds have different lengths: {lower} vs {upper}")
            }
            SwarmError::InvertedBounds { index, lower, upper } => {
                write!(f, "Lower bound {lower} exceeds upper bound {upper} at index {index}")
            }
            SwarmError::PointDimMismatch { expected, found } => {
                write!(f, "Point dimension mismatch: expected {expected}, found {found}")
            }
            SwarmError::InvalidCoefficient { name, value, reason } => {
                write!(f, "Invalid {name} coefficient {value}: {reason}")
            }
            SwarmError::InvalidMaxSpeed { value } => {
                write!(f, "Invalid maximum speed {value}: must be finite and non-negative")
            }
            SwarmError::MissingResult { id } => {
                write!(f, "Evaluator returned no result for particle {id}")
            }
            SwarmError::Evaluation { neval, source } => {
                write!(f, "Evaluation aborted after {neval} point(s): {source}")
            }
            SwarmError::Mesh(err) => write!(f, "Mesh error: {err}"),
        }
    }
}

impl From<MeshError> for SwarmError {
    fn from(err: MeshError) -> Self {
        SwarmError::Mesh(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SwarmError> for PyErr {
    fn from(err: SwarmError) -> PyErr {
        PyValueError::new_err(format!("SwarmError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Evaluation aborts keep their partial count and underlying cause.
    fn evaluation_error_exposes_count_and_source() {
        // Arrange
        let err = SwarmError::Evaluation { neval: 2, source: ObjectiveError::failed("boom") };

        // Act
        let shown = err.to_string();

        // Assert
        assert_eq!(err.neval(), 2);
        assert!(shown.contains("after 2 point(s)"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    // Purpose
    // -------
    // Mesh errors convert via `?` and count as zero evaluations.
    fn mesh_error_converts() {
        // Arrange
        let mesh_err = MeshError::SingularBasis;

        // Act
        let err: SwarmError = mesh_err.clone().into();

        // Assert
        assert_eq!(err, SwarmError::Mesh(mesh_err));
        assert_eq!(err.neval(), 0);
    }
}

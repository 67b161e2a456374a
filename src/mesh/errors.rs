//! mesh::errors — configuration errors raised by mesh projection.
//!
//! Every variant describes an invariant violation in how a mesh was set up
//! (shapes, dimensionality, invertibility). These errors are not retryable:
//! callers should abort the current step and fix the configuration.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Point dimensionality differs from the previously fixed origin.
    OriginDimMismatch { origin: usize, point: usize },

    /// Grid step must be finite and non-negative.
    InvalidStep { step: f64 },

    /// Basis matrix must be square.
    BasisNotSquare { rows: usize, cols: usize },

    /// Basis dimension differs from the point dimension.
    BasisDimMismatch { basis: usize, point: usize },

    /// Basis matrix could not be inverted.
    SingularBasis,

    /// Lower and upper bound vectors have different lengths.
    BoundsLengthMismatch { lower: usize, upper: usize },

    /// A lower bound exceeds its upper bound.
    InvertedBounds { index: usize, lower: f64, upper: f64 },

    /// Point dimensionality differs from the bound vectors.
    BoundsDimMismatch { bounds: usize, point: usize },

    /// Constraint matrix rows and right-hand side lengths differ.
    ConstraintShapeMismatch { rows: usize, rhs: usize },

    /// Constraint matrix columns differ from the point dimension.
    ConstraintDimMismatch { cols: usize, point: usize },
}

impl std::error::Error for MeshError {}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::OriginDimMismatch { origin, point } => {
                write!(f, "Origin length {origin} incompatible with point length {point}")
            }
            MeshError::InvalidStep { step } => {
                write!(f, "Invalid mesh step {step}: must be finite and non-negative")
            }
            MeshError::BasisNotSquare { rows, cols } => {
                write!(f, "Basis must be square, got {rows}x{cols}")
            }
            MeshError::BasisDimMismatch { basis, point } => {
                write!(f, "Basis dimension {basis} incompatible with point length {point}")
            }
            MeshError::SingularBasis => {
                write!(f, "Basis inversion failed: matrix is singular")
            }
            MeshError::BoundsLengthMismatch { lower, upper } => {
                write!(f, "Lower and upper bounds have different lengths: {lower} vs {upper}")
            }
            MeshError::InvertedBounds { index, lower, upper } => {
                write!(f, "Lower bound {lower} exceeds upper bound {upper} at index {index}")
            }
            MeshError::BoundsDimMismatch { bounds, point } => {
                write!(f, "Bounds length {bounds} incompatible with point length {point}")
            }
            MeshError::ConstraintShapeMismatch { rows, rhs } => {
                write!(f, "Constraint matrix has {rows} rows but right-hand side has {rhs} entries")
            }
            MeshError::ConstraintDimMismatch { cols, point } => {
                write!(f, "Constraint matrix has {cols} columns but point length is {point}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<MeshError> for PyErr {
    fn from(err: MeshError) -> PyErr {
        PyValueError::new_err(format!("MeshError: {err}"))
    }
}

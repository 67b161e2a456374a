//! mesh::infinite — unbounded linear grid (or continuous space).
//!
//! Purpose
//! -------
//! Snap points onto a regular grid that extends without bounds in every
//! dimension, optionally rotated/sheared by a basis matrix. A step of `0`
//! turns the mesh into continuous space.
//!
//! Key behaviors
//! -------------
//! - `step == 0`: [`Mesh::nearest`] returns an unmodified copy.
//! - Otherwise: translate by the origin, map into mesh-local coordinates
//!   with the inverse basis, round every local coordinate to the nearest
//!   multiple of `step`, then map back and re-add the origin.
//! - The origin is fixed to the zero vector of the first point's dimension
//!   when unset; the basis inverse is computed once and cached.
//!
//! Invariants & assumptions
//! ------------------------
//! - Once fixed, the origin length is the mesh dimension; feeding a point of
//!   a different length is a [`MeshError::OriginDimMismatch`].
//! - The basis maps local to world coordinates (`world = origin + B·local`),
//!   so its **columns** are the mesh axis directions. A singular basis is a
//!   [`MeshError::SingularBasis`].
//! - Rounding is half-up: a local quotient whose fractional part is exactly
//!   one half moves toward `+inf`. Snapping is idempotent up to
//!   floating-point error.
use ndarray::Array2;

use crate::{
    evaluation::Pos,
    mesh::{
        Mesh,
        errors::{MeshError, MeshResult},
        linalg::invert,
    },
};

/// Unbounded grid mesh with optional basis transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Infinite {
    origin: Option<Pos>,
    basis: Option<Array2<f64>>,
    step: f64,
    inverse: Option<Array2<f64>>,
}

impl Infinite {
    /// Axis-aligned grid with spacing `step` (`0` for continuous space).
    pub fn new(step: f64) -> Self {
        Self { step, ..Self::default() }
    }

    /// Continuous space: `nearest` is the identity.
    pub fn continuous() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Pos) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_basis(mut self, basis: Array2<f64>) -> Self {
        self.set_basis(Some(basis));
        self
    }

    pub fn basis(&self) -> Option<&Array2<f64>> {
        self.basis.as_ref()
    }

    /// Replace the basis; the cached inverse is dropped and recomputed lazily.
    pub fn set_basis(&mut self, basis: Option<Array2<f64>>) {
        self.basis = basis;
        self.inverse = None;
    }

    /// Forget the origin so the next point fixes a new dimensionality.
    pub fn reset_origin(&mut self) {
        self.origin = None;
    }

    fn ensure_inverse(&mut self, dim: usize) -> MeshResult<()> {
        if let Some(basis) = &self.basis {
            if basis.nrows() != dim || basis.ncols() != dim {
                if basis.nrows() != basis.ncols() {
                    return Err(MeshError::BasisNotSquare {
                        rows: basis.nrows(),
                        cols: basis.ncols(),
                    });
                }
                return Err(MeshError::BasisDimMismatch { basis: basis.nrows(), point: dim });
            }
            if self.inverse.is_none() {
                self.inverse = Some(invert(basis)?);
            }
        }
        Ok(())
    }
}

impl Mesh for Infinite {
    fn step(&self) -> f64 {
        self.step
    }

    fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    fn origin(&self) -> Option<&Pos> {
        self.origin.as_ref()
    }

    fn set_origin(&mut self, origin: Pos) -> MeshResult<()> {
        self.origin = Some(origin);
        Ok(())
    }

    fn nearest(&mut self, p: &Pos) -> MeshResult<Pos> {
        if self.step == 0.0 {
            return Ok(p.clone());
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(MeshError::InvalidStep { step: self.step });
        }
        if let Some(origin) = &self.origin {
            if origin.len() != p.len() {
                return Err(MeshError::OriginDimMismatch { origin: origin.len(), point: p.len() });
            }
        }
        self.ensure_inverse(p.len())?;
        let origin = self.origin.get_or_insert_with(|| Pos::zeros(p.len()));

        let offset = p - &*origin;
        let local = match &self.inverse {
            Some(inv) => inv.dot(&offset),
            None => offset,
        };
        let step = self.step;
        let snapped = local.mapv(|x| snap_to_grid(x, step));
        let world = match &self.basis {
            Some(basis) => basis.dot(&snapped),
            None => snapped,
        };
        Ok(world + &*origin)
    }
}

/// Round `x` to the nearest multiple of `step` (ties toward `+inf`).
fn snap_to_grid(x: f64, step: f64) -> f64 {
    let q = x / step;
    let mut n = q.trunc();
    let rem = q - n;
    if rem >= 0.5 {
        n += 1.0;
    } else if rem < -0.5 {
        n -= 1.0;
    }
    n * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Step 0 is continuous space: the input comes back bit-for-bit.
    fn zero_step_returns_exact_copy() {
        // Arrange
        let mut mesh = Infinite::continuous();
        let p = array![0.123456789, -1e-300, 7.5e12];

        // Act
        let q = mesh.nearest(&p).unwrap();

        // Assert
        assert_eq!(q, p);
        assert!(mesh.origin().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Grid rounding goes to the nearest multiple of the step in both
    // directions, with exact halves rounding up.
    //
    // Given
    // -----
    // - Step 0.5 and coordinates on either side of the midpoints.
    //
    // Expect
    // ------
    // - 0.74 -> 0.5, 0.76 -> 1.0, -0.74 -> -0.5, -0.76 -> -1.0.
    // - Exact halves (0.25, -0.25) -> 0.5 and 0.0.
    fn rounds_to_nearest_step_with_half_up_ties() {
        // Arrange
        let mut mesh = Infinite::new(0.5);
        let p = array![0.74, 0.76, -0.74, -0.76, 0.25, -0.25];

        // Act
        let q = mesh.nearest(&p).unwrap();

        // Assert
        assert_eq!(q, array![0.5, 1.0, -0.5, -1.0, 0.5, 0.0]);
        assert_eq!(mesh.origin(), Some(&Pos::zeros(6)));
    }

    #[test]
    // Purpose
    // -------
    // The origin shifts the grid.
    fn origin_offsets_the_grid() {
        // Arrange
        let mut mesh = Infinite::new(1.0).with_origin(array![0.25, -0.5]);

        // Act
        let q = mesh.nearest(&array![1.0, 1.1]).unwrap();

        // Assert
        assert_abs_diff_eq!(q[0], 1.25, epsilon = 1e-12);
        assert_abs_diff_eq!(q[1], 1.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Rotated grids snap in mesh-local coordinates.
    //
    // Given
    // -----
    // - A 45° rotation basis (columns (h, h) and (-h, h), h = 1/√2), step 1.
    // - The point (1, 0), whose local coordinates are (h, -h).
    //
    // Expect
    // ------
    // - Local snap to (1, -1), which maps back to (√2, 0).
    fn rotated_basis_snaps_in_local_coordinates() {
        // Arrange
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let mut mesh = Infinite::new(1.0).with_basis(array![[h, -h], [h, h]]);

        // Act
        let q = mesh.nearest(&array![1.0, 0.0]).unwrap();

        // Assert
        assert_abs_diff_eq!(q[0], std::f64::consts::SQRT_2, epsilon = 1e-9);
        assert_abs_diff_eq!(q[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Snapping an already snapped point is a no-op, including for rotated
    // and offset grids.
    fn nearest_is_idempotent() {
        // Arrange
        let mut mesh = Infinite::new(0.3)
            .with_origin(array![0.1, -0.2])
            .with_basis(array![[2.0, 0.5], [-0.3, 1.0]]);
        let samples = [array![1.7, -3.2], array![-0.05, 0.44], array![12.3, 9.9]];

        for p in samples {
            // Act
            let once = mesh.nearest(&p).unwrap();
            let twice = mesh.nearest(&once).unwrap();

            // Assert
            for (a, b) in once.iter().zip(twice.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Configuration errors are reported, not silently corrected.
    fn configuration_errors_are_reported() {
        // Arrange
        let mut fixed = Infinite::new(1.0);
        fixed.nearest(&array![1.0, 2.0]).unwrap();
        let mut singular = Infinite::new(1.0).with_basis(array![[1.0, 2.0], [2.0, 4.0]]);
        let mut wrong_basis = Infinite::new(1.0).with_basis(Array2::eye(3));
        let mut negative = Infinite::new(-1.0);

        // Act / Assert
        assert_eq!(
            fixed.nearest(&array![1.0, 2.0, 3.0]),
            Err(MeshError::OriginDimMismatch { origin: 2, point: 3 })
        );
        assert_eq!(singular.nearest(&array![1.0, 2.0]), Err(MeshError::SingularBasis));
        assert_eq!(
            wrong_basis.nearest(&array![1.0, 2.0]),
            Err(MeshError::BasisDimMismatch { basis: 3, point: 2 })
        );
        assert_eq!(negative.nearest(&array![1.0]), Err(MeshError::InvalidStep { step: -1.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Resetting the origin lets the mesh adopt a new dimensionality.
    fn reset_origin_allows_new_dimension() {
        // Arrange
        let mut mesh = Infinite::new(1.0);
        mesh.nearest(&array![0.2]).unwrap();

        // Act
        mesh.reset_origin();
        let q = mesh.nearest(&array![0.2, 0.7]).unwrap();

        // Assert
        assert_eq!(q, array![0.0, 1.0]);
    }
}

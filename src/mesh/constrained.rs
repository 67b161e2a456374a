//! mesh::constrained — linear-inequality mesh wrapper.
//!
//! Projects points onto the feasible region `{x : A x <= b}` (Euclidean
//! nearest point, via [`project_halfspaces`]) and then delegates to the
//! wrapped mesh. Snapping runs after the projection, so a result may violate
//! a constraint by up to the inner mesh's rounding distance.
use ndarray::{Array1, Array2};

use crate::{
    evaluation::Pos,
    mesh::{
        Mesh,
        errors::{MeshError, MeshResult},
        linalg::{DEFAULT_MAX_SWEEPS, DEFAULT_PROJECTION_TOL, project_halfspaces},
    },
};

/// Mesh restricted to `{x : A x <= b}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constrained<M> {
    a: Array2<f64>,
    b: Array1<f64>,
    inner: M,
    max_sweeps: usize,
    tol: f64,
}

impl<M: Mesh> Constrained<M> {
    /// Wrap `inner` with the constraints `A x <= b`.
    ///
    /// # Errors
    /// - [`MeshError::ConstraintShapeMismatch`] if `A` has a different number
    ///   of rows than `b` has entries.
    pub fn new(inner: M, a: Array2<f64>, b: Array1<f64>) -> MeshResult<Self> {
        if a.nrows() != b.len() {
            return Err(MeshError::ConstraintShapeMismatch { rows: a.nrows(), rhs: b.len() });
        }
        Ok(Self { a, b, inner, max_sweeps: DEFAULT_MAX_SWEEPS, tol: DEFAULT_PROJECTION_TOL })
    }

    /// Override the projection iteration cap and tolerance.
    pub fn with_projection(mut self, max_sweeps: usize, tol: f64) -> Self {
        self.max_sweeps = max_sweeps;
        self.tol = tol;
        self
    }

    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    pub fn b(&self) -> &Array1<f64> {
        &self.b
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Nearest feasible point to `p`, without snapping.
    pub fn project(&self, p: &Pos) -> MeshResult<Pos> {
        if self.a.ncols() != p.len() {
            return Err(MeshError::ConstraintDimMismatch { cols: self.a.ncols(), point: p.len() });
        }
        Ok(project_halfspaces(p, &self.a, &self.b, self.max_sweeps, self.tol))
    }
}

impl<M: Mesh> Mesh for Constrained<M> {
    fn step(&self) -> f64 {
        self.inner.step()
    }

    fn set_step(&mut self, step: f64) {
        self.inner.set_step(step)
    }

    fn origin(&self) -> Option<&Pos> {
        self.inner.origin()
    }

    fn set_origin(&mut self, origin: Pos) -> MeshResult<()> {
        self.inner.set_origin(origin)
    }

    fn nearest(&mut self, p: &Pos) -> MeshResult<Pos> {
        let projected = self.project(p)?;
        self.inner.nearest(&projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Infinite, linalg::is_feasible};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // In continuous space the result is the feasible projection.
    //
    // Given
    // -----
    // - Constraint x0 + x1 <= 1, step 0, p = (2, 2).
    //
    // Expect
    // ------
    // - (0.5, 0.5), which satisfies the constraint.
    fn continuous_inner_mesh_returns_projection() {
        // Arrange
        let a = array![[1.0, 1.0]];
        let b = array![1.0];
        let mut mesh = Constrained::new(Infinite::continuous(), a.clone(), b.clone()).unwrap();

        // Act
        let q = mesh.nearest(&array![2.0, 2.0]).unwrap();

        // Assert
        assert_abs_diff_eq!(q[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(q[1], 0.5, epsilon = 1e-12);
        assert!(is_feasible(&q, &a, &b, 1e-12));
    }

    #[test]
    // Purpose
    // -------
    // Snapping after projection may leave the feasible region.
    //
    // Given
    // -----
    // - Constraint x0 + x1 <= 1, step 1, p = (2, 2).
    //
    // Expect
    // ------
    // - Projection gives (0.5, 0.5); half-up snapping gives (1, 1), which
    //   violates the constraint.
    fn snapping_after_projection_may_be_infeasible() {
        // Arrange
        let a = array![[1.0, 1.0]];
        let b = array![1.0];
        let mut mesh = Constrained::new(Infinite::new(1.0), a.clone(), b.clone()).unwrap();

        // Act
        let q = mesh.nearest(&array![2.0, 2.0]).unwrap();

        // Assert
        assert_eq!(q, array![1.0, 1.0]);
        assert!(!is_feasible(&q, &a, &b, 1e-12));
    }

    #[test]
    // Purpose
    // -------
    // Shape problems are reported at construction or on first use.
    fn shape_errors_are_reported() {
        // Arrange
        let a = array![[1.0, 0.0], [0.0, 1.0]];

        // Act
        let bad_rhs = Constrained::new(Infinite::new(1.0), a.clone(), array![1.0]);
        let mut mesh = Constrained::new(Infinite::new(1.0), a, array![1.0, 1.0]).unwrap();

        // Assert
        assert_eq!(bad_rhs.unwrap_err(), MeshError::ConstraintShapeMismatch { rows: 2, rhs: 1 });
        assert_eq!(
            mesh.nearest(&array![0.0, 0.0, 0.0]),
            Err(MeshError::ConstraintDimMismatch { cols: 2, point: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Feasible points are only snapped, never moved by the projection.
    fn feasible_points_are_only_snapped() {
        // Arrange
        let mut mesh =
            Constrained::new(Infinite::new(0.5), array![[1.0, 0.0]], array![10.0]).unwrap();

        // Act
        let q = mesh.nearest(&array![3.1, -2.2]).unwrap();

        // Assert
        assert_eq!(q, array![3.0, -2.0]);
    }
}

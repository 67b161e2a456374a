//! mesh::linalg — small dense linear-algebra helpers for mesh geometry.
//!
//! Purpose
//! -------
//! Bridge `ndarray` matrices into `nalgebra` for inversion, and provide the
//! projection of a point onto an intersection of half-spaces used by
//! [`Constrained`](crate::mesh::constrained::Constrained).
//!
//! Conventions
//! -----------
//! - Matrices live in `ndarray` everywhere else in the crate; `nalgebra` is
//!   only touched inside [`invert`].
//! - The projection never fails: rows with zero norm cannot be projected on
//!   and are skipped, and the iteration is capped.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

use crate::{
    evaluation::Pos,
    mesh::errors::{MeshError, MeshResult},
};

/// Default cap on Dykstra sweeps in [`project_halfspaces`].
pub const DEFAULT_MAX_SWEEPS: usize = 1000;

/// Default convergence tolerance for [`project_halfspaces`].
pub const DEFAULT_PROJECTION_TOL: f64 = 1e-12;

/// Invert a square matrix.
///
/// # Errors
/// - [`MeshError::BasisNotSquare`] if `m` is not square.
/// - [`MeshError::SingularBasis`] if `m` is singular or the inverse is not
///   finite.
pub fn invert(m: &Array2<f64>) -> MeshResult<Array2<f64>> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(MeshError::BasisNotSquare { rows, cols });
    }
    let mut m_nalg = DMatrix::<f64>::zeros(rows, cols);
    fill_dmatrix(m, &mut m_nalg);
    let inv = m_nalg.try_inverse().ok_or(MeshError::SingularBasis)?;
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(MeshError::SingularBasis);
    }
    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| inv[(i, j)]))
}

/// Copy an `ndarray` matrix into a preallocated `DMatrix` of the same shape.
fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    for ((i, j), &value) in src.indexed_iter() {
        dst[(i, j)] = value;
    }
}

/// Euclidean projection of `p` onto `{x : A x <= b}` via Dykstra's algorithm.
///
/// Each sweep projects onto every half-space `a_i · x <= b_i` in turn,
/// carrying Dykstra's correction terms so the limit is the nearest feasible
/// point rather than just some feasible point. Iteration stops once a sweep
/// moves the iterate by at most `tol` (max-norm) and every constraint holds
/// within `tol`, or after `max_sweeps` sweeps.
///
/// Callers must ensure `a.nrows() == b.len()` and `a.ncols() == p.len()`.
pub fn project_halfspaces(
    p: &Pos, a: &Array2<f64>, b: &Array1<f64>, max_sweeps: usize, tol: f64,
) -> Pos {
    let norms: Vec<f64> = a.rows().into_iter().map(|row| row.dot(&row)).collect();
    let mut x = p.clone();
    if is_feasible(&x, a, b, 0.0) {
        return x;
    }

    let mut corrections = Array2::<f64>::zeros((a.nrows(), p.len()));
    for _ in 0..max_sweeps {
        let prev = x.clone();
        for (i, &norm) in norms.iter().enumerate() {
            if !(norm > 0.0 && norm.is_finite()) {
                continue;
            }
            let row = a.row(i);
            let z = &x + &corrections.row(i);
            let violation = row.dot(&z) - b[i];
            let projected =
                if violation > 0.0 { &z - &(&row * (violation / norm)) } else { z.clone() };
            corrections.row_mut(i).assign(&(&z - &projected));
            x = projected;
        }
        let moved = (&x - &prev).iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
        if moved <= tol && is_feasible(&x, a, b, tol) {
            break;
        }
    }
    x
}

/// `true` when every constraint `a_i · x <= b_i + tol` holds.
pub fn is_feasible(x: &Pos, a: &Array2<f64>, b: &Array1<f64>, tol: f64) -> bool {
    a.dot(x).iter().zip(b.iter()).all(|(ax, bi)| *ax <= bi + tol)
}

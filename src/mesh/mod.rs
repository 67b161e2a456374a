//! mesh — projection of candidate points onto structured search geometries.
//!
//! Purpose
//! -------
//! Let an optimizer search over a discretized, bounded, or linearly
//! constrained space without knowing which. Every geometry implements
//! [`Mesh`]; the variants compose by wrapping an owned inner mesh.
//!
//! Key behaviors
//! -------------
//! - [`Infinite`]: unbounded grid with optional basis transform; step `0`
//!   means continuous space.
//! - [`Bounded`]: clamps into `[lower, upper]`, then delegates.
//! - [`Constrained`]: projects onto `{x : A x <= b}`, then delegates. The
//!   final snapped point may be slightly infeasible because snapping happens
//!   after the projection.
//! - [`Integer`]: forces a step of at least 1 and rounds every coordinate of
//!   the inner result to a whole number.
//!
//! Invariants & assumptions
//! ------------------------
//! - For any nonzero step, `nearest(nearest(p)) == nearest(p)` up to
//!   floating-point error.
//! - For step `0`, `nearest(p) == p` exactly.
//! - Configuration problems are reported as [`MeshError`]s and are not
//!   retryable.
//!
//! Conventions
//! -----------
//! - Wrappers forward `step`, `set_step`, `origin`, and `set_origin` to the
//!   inner mesh unless they change that behavior (as [`Integer`] does).
//! - `nearest` takes `&mut self` because the origin dimensionality and the
//!   basis inverse are fixed lazily on first use.
//!
//! Testing notes
//! -------------
//! - Each variant has unit tests for its own behavior; idempotence, bounded
//!   containment, and the integer lattice property are tested on composed
//!   meshes as well.

pub mod bounded;
pub mod constrained;
pub mod errors;
pub mod infinite;
pub mod integer;
pub mod linalg;

pub use self::bounded::Bounded;
pub use self::constrained::Constrained;
pub use self::errors::{MeshError, MeshResult};
pub use self::infinite::Infinite;
pub use self::integer::Integer;

use crate::evaluation::{Point, Pos};

/// A geometry that snaps arbitrary points onto representable coordinates.
pub trait Mesh {
    /// Grid spacing; `0` denotes continuous space.
    fn step(&self) -> f64;

    fn set_step(&mut self, step: f64);

    /// The mesh origin, once fixed.
    fn origin(&self) -> Option<&Pos>;

    fn set_origin(&mut self, origin: Pos) -> MeshResult<()>;

    /// The mesh point nearest to `p`.
    fn nearest(&mut self, p: &Pos) -> MeshResult<Pos>;
}

impl<M: Mesh + ?Sized> Mesh for Box<M> {
    fn step(&self) -> f64 {
        (**self).step()
    }

    fn set_step(&mut self, step: f64) {
        (**self).set_step(step)
    }

    fn origin(&self) -> Option<&Pos> {
        (**self).origin()
    }

    fn set_origin(&mut self, origin: Pos) -> MeshResult<()> {
        (**self).set_origin(origin)
    }

    fn nearest(&mut self, p: &Pos) -> MeshResult<Pos> {
        (**self).nearest(p)
    }
}

/// Snap a point's coordinates through `mesh`, keeping its value.
pub fn nearest_point(p: &Point, mesh: &mut dyn Mesh) -> MeshResult<Point> {
    Ok(Point::new(mesh.nearest(&p.pos)?, p.val))
}

pub mod prelude {
    pub use super::errors::{MeshError, MeshResult};
    pub use super::{Bounded, Constrained, Infinite, Integer, Mesh, nearest_point};
}

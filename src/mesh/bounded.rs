//! mesh::bounded — box-bounded mesh wrapper.
//!
//! Clamps every coordinate into `[lower, upper]` before delegating to the
//! wrapped mesh. Construction validates the bounds and probes the inner mesh
//! with `lower`, so a dimensionality mismatch fails at construction time
//! rather than on the first optimizer step. The probe fixes the inner
//! mesh's origin if it was unset.
use crate::{
    evaluation::Pos,
    mesh::{
        Mesh,
        errors::{MeshError, MeshResult},
    },
};

/// Mesh restricted to the box `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounded<M> {
    lower: Pos,
    upper: Pos,
    inner: M,
}

impl<M: Mesh> Bounded<M> {
    /// Wrap `inner` with box bounds.
    ///
    /// # Errors
    /// - [`MeshError::BoundsLengthMismatch`] if `lower` and `upper` differ in
    ///   length.
    /// - [`MeshError::InvertedBounds`] if some `lower[i] > upper[i]`.
    /// - Any error `inner.nearest(&lower)` reports (e.g. an origin of a
    ///   different dimension).
    pub fn new(mut inner: M, lower: Pos, upper: Pos) -> MeshResult<Self> {
        if lower.len() != upper.len() {
            return Err(MeshError::BoundsLengthMismatch { lower: lower.len(), upper: upper.len() });
        }
        for (index, (&lo, &up)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo > up {
                return Err(MeshError::InvertedBounds { index, lower: lo, upper: up });
            }
        }
        inner.nearest(&lower)?;
        Ok(Self { lower, upper, inner })
    }

    pub fn lower(&self) -> &Pos {
        &self.lower
    }

    pub fn upper(&self) -> &Pos {
        &self.upper
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    /// Clamp `p` into the box without snapping.
    pub fn clamp(&self, p: &Pos) -> MeshResult<Pos> {
        if p.len() != self.lower.len() {
            return Err(MeshError::BoundsDimMismatch { bounds: self.lower.len(), point: p.len() });
        }
        let mut clamped = p.clone();
        for ((x, &lo), &up) in clamped.iter_mut().zip(self.lower.iter()).zip(self.upper.iter()) {
            *x = x.max(lo).min(up);
        }
        Ok(clamped)
    }
}

impl<M: Mesh> Mesh for Bounded<M> {
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
        let clamped = self.clamp(p)?;
        self.inner.nearest(&clamped)
    }
}

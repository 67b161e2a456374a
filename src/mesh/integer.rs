//! mesh::integer — integer-lattice mesh wrapper.
//!
//! Forces the inner mesh step to at least 1 and rounds every coordinate of
//! the inner result to the nearest whole number (`floor(x + 0.5)`, so
//! halves round up). Origins are snapped through the same rule before they
//! reach the inner mesh, which keeps the whole lattice integral.
use crate::{
    evaluation::Pos,
    mesh::{Mesh, errors::MeshResult},
};

/// Mesh whose points all have whole-number coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Integer<M> {
    inner: M,
}

impl<M: Mesh> Integer<M> {
    /// Wrap `inner`, raising its step to 1 if it is smaller.
    pub fn new(mut inner: M) -> Self {
        let step = inner.step();
        if step < 1.0 {
            inner.set_step(1.0);
        }
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: Mesh> Mesh for Integer<M> {
    fn step(&self) -> f64 {
        self.inner.step()
    }

    fn set_step(&mut self, step: f64) {
        self.inner.set_step(step.max(1.0))
    }

    fn origin(&self) -> Option<&Pos> {
        self.inner.origin()
    }

    fn set_origin(&mut self, origin: Pos) -> MeshResult<()> {
        let snapped = self.nearest(&origin)?;
        self.inner.set_origin(snapped)
    }

    fn nearest(&mut self, p: &Pos) -> MeshResult<Pos> {
        Ok(self.inner.nearest(p)?.mapv(round_half_up))
    }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Bounded, Infinite};
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Every returned coordinate is a whole number, even on a rotated inner
    // grid.
    //
    // Given
    // -----
    // - An integer mesh over a rotated, offset inner grid.
    //
    // Expect
    // ------
    // - All coordinates within 1e-9 of an integer.
    fn nearest_lands_on_integer_lattice() {
        // Arrange
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let inner = Infinite::new(1.0)
            .with_basis(array![[h, -h], [h, h]])
            .with_origin(array![0.3, -0.7]);
        let mut mesh = Integer::new(inner);
        let samples = [array![1.2, 3.7], array![-5.5, 0.49], array![100.01, -42.6]];

        for p in samples {
            // Act
            let q = mesh.nearest(&p).unwrap();

            // Assert
            for x in q.iter() {
                assert!((x - x.round()).abs() < 1e-9, "{x} is not integral");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The step never drops below 1.
    fn step_is_floored_at_one() {
        // Arrange
        let mut mesh = Integer::new(Infinite::new(0.25));

        // Act
        let initial = mesh.step();
        mesh.set_step(0.1);
        let lowered = mesh.step();
        mesh.set_step(3.0);

        // Assert
        assert_eq!(initial, 1.0);
        assert_eq!(lowered, 1.0);
        assert_eq!(mesh.step(), 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Halves round up and continuous inner meshes still produce integers.
    fn rounding_is_half_up() {
        // Arrange
        let mut mesh = Integer::new(Infinite::continuous());

        // Act
        let q = mesh.nearest(&array![2.5, -2.5, 0.49, -0.51]).unwrap();

        // Assert
        assert_eq!(q, array![3.0, -2.0, 0.0, -1.0]);
    }

    #[test]
    // Purpose
    // -------
    // A non-integral origin is snapped before it reaches the inner mesh.
    fn set_origin_snaps_to_lattice() {
        // Arrange
        let mut mesh = Integer::new(Infinite::new(1.0));

        // Act
        mesh.set_origin(array![0.4, 1.6]).unwrap();

        // Assert
        assert_eq!(mesh.origin(), Some(&array![0.0, 2.0]));
    }

    #[test]
    // Purpose
    // -------
    // Integer and bounded wrappers compose.
    fn composes_with_bounded_mesh() {
        // Arrange
        let bounded = Bounded::new(Infinite::new(1.0), array![-2.0, -2.0], array![2.0, 2.0]).unwrap();
        let mut mesh = Integer::new(bounded);

        // Act
        let q = mesh.nearest(&array![7.3, -0.6]).unwrap();

        // Assert
        assert_eq!(q, array![2.0, -1.0]);
    }
}

//! bench — benchmark objectives with known optima and a runner.
//!
//! Purpose
//! -------
//! Provide standard test functions for derivative-free optimizers and a
//! one-call runner ([`run`]) that drives any [`Optimizer`] against a
//! function's known optimum.
//!
//! Key behaviors
//! -------------
//! - [`BenchFunction`] bundles a closed-form function with its search box and
//!   the list of global optima.
//! - [`BenchObjective`] adapts a benchmark to the
//!   [`Objective`](crate::evaluation::Objective) contract, turning wrong-length
//!   inputs into [`ObjectiveError::DimensionMismatch`](crate::evaluation::ObjectiveError::DimensionMismatch).
//! - [`run`] targets [`BenchFunction::optimum`] with
//!   [`minimize`](crate::driver::minimize); a zero optimum is matched with
//!   absolute error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every function lists at least one optimum; all listed optima share the
//!   same value.
//! - The two-dimensional functions index `v[0]` and `v[1]` directly; go
//!   through [`BenchObjective`] when the input length is not known.

pub mod functions;

pub use self::functions::{Ackley, BenchObjective, CrossTray, Eggholder, HolderTable, Sphere};

use crate::{
    driver::{DriverOptions, DriverOutcome, DriverResult, Optimizer, minimize},
    evaluation::{Point, Pos},
    mesh::Mesh,
};

/// A test function with a known search box and known global optima.
pub trait BenchFunction {
    /// Evaluate at `v`; `v` must have [`BenchFunction::dim`] entries.
    fn eval(&self, v: &Pos) -> f64;

    /// Lower and upper corners of the search box.
    fn bounds(&self) -> (Pos, Pos);

    /// Global optima.
    fn optima(&self) -> Vec<Point>;

    fn dim(&self) -> usize {
        self.bounds().0.len()
    }

    /// Optimal value (smallest listed optimum).
    fn optimum(&self) -> f64 {
        self.optima().iter().map(|p| p.val).fold(f64::INFINITY, f64::min)
    }

    fn objective(&self) -> BenchObjective<'_, Self>
    where
        Self: Sized,
    {
        BenchObjective(self)
    }
}

/// Drive `it` on `f` until it reaches `f`'s optimum within `opts.tol` or
/// spends `opts.max_evals` evaluations.
///
/// # Errors
/// Propagates [`DriverError`](crate::driver::DriverError)s from
/// [`minimize`].
pub fn run<F, O>(
    f: &F, it: &mut O, mesh: Option<&mut dyn Mesh>, opts: &DriverOptions,
) -> DriverResult<DriverOutcome>
where
    F: BenchFunction + ?Sized,
    O: Optimizer + ?Sized,
{
    let obj = BenchObjective(f);
    minimize(it, &obj, mesh, f.optimum(), opts)
}

pub mod prelude {
    pub use super::functions::{Ackley, CrossTray, Eggholder, HolderTable, Sphere};
    pub use super::{BenchFunction, run};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::{Population, SwarmIterator};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    // Purpose
    // -------
    // The runner drives a default swarm to the sphere minimum.
    //
    // Given
    // -----
    // - 10 particles placed uniformly in [-5, 5]^2 (generator seed 5).
    // - Default mover and serial evaluator, tol 1e-4, budget 10_000.
    //
    // Expect
    // ------
    // - Convergence within budget, best value below the tolerance, and an
    //   evaluation count that is a whole number of 10-point steps.
    fn run_converges_on_sphere() {
        // Arrange
        let sphere = Sphere::new(2);
        let (lower, upper) = sphere.bounds();
        let mut rng = Xoshiro256Plus::seed_from_u64(5);
        let pop = Population::uniform(10, &lower, &upper, &mut rng).unwrap();
        let mut it = SwarmIterator::with_defaults(pop);
        let opts = DriverOptions::default();

        // Act
        let out = run(&sphere, &mut it, None, &opts).unwrap();

        // Assert
        assert!(out.converged);
        assert!(out.best.val < 1e-4);
        assert_eq!(out.neval, 10 * out.iterations);
        assert!(out.neval <= opts.max_evals);
    }
}

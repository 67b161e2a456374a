//! rust_optim — derivative-free optimization with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the particle swarm to Python via the `_rust_optim` extension module. When
//! the `python-bindings` feature is enabled, this module defines the
//! Python-facing classes and submodules used by the `rust_optim` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`evaluation`, `mesh`, `swarm`, `driver`,
//!   `bench`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_optim` Python extension.
//! - Register the `swarm` submodule under `rust_optim` in `sys.modules` so
//!   that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input validation, and error mapping.
//! - Python objectives are called with the GIL held, one point at a time.
//!
//! Conventions
//! -----------
//! - Lower objective values are better everywhere.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` (`ValueError`) at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules (or their
//!   `prelude`s) and can ignore the items guarded by `python-bindings`.
//! - The Python packaging layer imports `_rust_optim` and may wrap its
//!   classes in thin pure-Python facades.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_swarm_pipeline.rs`.
//! - The PyO3 classes are exercised from Python; they hold no logic beyond
//!   argument conversion.

pub mod bench;
pub mod driver;
pub mod evaluation;
pub mod mesh;
pub mod swarm;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::SeedableRng;

#[cfg(feature = "python-bindings")]
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "python-bindings")]
use crate::{
    driver::{DriverOptions, DriverOutcome, minimize},
    evaluation::{CachingEvaluator, Evaluator, Point, SerialEvaluator},
    mesh::{Bounded, Infinite, Mesh},
    swarm::{MoverOptions, Population, SimpleMover, SwarmIterator},
    utils::{PyObjective, extract_pos},
};

/// ParticleSwarm — Python-facing particle swarm over a bounded search box.
///
/// Purpose
/// -------
/// Minimize a Python callable `f(x: numpy.ndarray) -> float` with a
/// [`SwarmIterator`], either one step at a time (`step`) or until a known
/// optimum is reached (`minimize`).
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ParticleSwarm(lower, upper, n_particles=30, step=0.0, seed=1,
/// cognition=0.5, social=0.5, vmax=0.0, cache=True)`:
/// - `lower`, `upper`: array-like of `f64`
///   Corners of the search box; initial positions are drawn uniformly in it
///   and every evaluated point is clamped to it.
/// - `n_particles`: `usize`
///   Population size.
/// - `step`: `f64`
///   Mesh spacing for evaluated points; `0.0` keeps the space continuous.
/// - `seed`: `u64`
///   Seeds both the initial placement and the mover.
/// - `cognition`, `social`, `vmax`:
///   Mover coefficients, see [`MoverOptions`].
/// - `cache`: `bool`
///   Memoize objective values by coordinates across steps.
///
/// Notes
/// -----
/// - `unsendable`: the evaluator is a boxed trait object and the class is
///   only meant to be driven from the thread that created it.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_optim.swarm", unsendable)]
pub struct ParticleSwarm {
    inner: SwarmIterator<Box<dyn Evaluator>, SimpleMover>,
    mesh: Bounded<Infinite>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ParticleSwarm {
    #[new]
    #[pyo3(
        signature = (
            lower,
            upper,
            n_particles = 30,
            step = 0.0,
            seed = 1,
            cognition = 0.5,
            social = 0.5,
            vmax = 0.0,
            cache = true,
        ),
        text_signature = "(lower, upper, /, n_particles=30, step=0.0, seed=1, \
                          cognition=0.5, social=0.5, vmax=0.0, cache=True)"
    )]
    pub fn new<'py>(
        py: Python<'py>, lower: &Bound<'py, PyAny>, upper: &Bound<'py, PyAny>,
        n_particles: usize, step: f64, seed: u64, cognition: f64, social: f64, vmax: f64,
        cache: bool,
    ) -> PyResult<Self> {
        let lower = extract_pos(py, lower, "lower")?;
        let upper = extract_pos(py, upper, "upper")?;

        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let pop = Population::uniform(n_particles, &lower, &upper, &mut rng)?;
        let mover = SimpleMover::new(MoverOptions::new(cognition, social, vmax, seed)?);
        let evaluator: Box<dyn Evaluator> = if cache {
            Box::new(CachingEvaluator::new(SerialEvaluator::default()))
        } else {
            Box::new(SerialEvaluator::default())
        };
        let mesh = Bounded::new(Infinite::new(step), lower, upper)?;

        Ok(ParticleSwarm { inner: SwarmIterator::new(pop, evaluator, mover), mesh })
    }

    /// Run one swarm step and return `(best_x, best_value, n_evaluations)`.
    #[pyo3(text_signature = "(self, objective, /)")]
    pub fn step<'py>(&mut self, objective: Bound<'py, PyAny>) -> PyResult<(Vec<f64>, f64, usize)> {
        let obj = PyObjective::new(objective)?;
        let step = self.inner.iterate(&obj, Some(&mut self.mesh as &mut dyn Mesh))?;
        Ok((step.best.pos.to_vec(), step.best.val, step.neval))
    }

    /// Step until the best value is within `tol` of `optimum` (relative, or
    /// absolute for a zero optimum) or `max_evals` evaluations are spent.
    #[pyo3(
        signature = (objective, optimum, tol = 1e-4, max_evals = 10_000),
        text_signature = "(self, objective, optimum, /, tol=1e-4, max_evals=10000)"
    )]
    pub fn minimize<'py>(
        &mut self, objective: Bound<'py, PyAny>, optimum: f64, tol: f64, max_evals: usize,
    ) -> PyResult<SwarmOutcome> {
        let obj = PyObjective::new(objective)?;
        let opts = DriverOptions::new(tol, max_evals)?;
        let outcome =
            minimize(&mut self.inner, &obj, Some(&mut self.mesh as &mut dyn Mesh), optimum, &opts)?;
        Ok(SwarmOutcome { inner: outcome })
    }

    /// Inject an externally found point; it replaces the first particle's
    /// personal best if it beats the current global best.
    #[pyo3(text_signature = "(self, x, value, /)")]
    pub fn add_point<'py>(&mut self, x: &Bound<'py, PyAny>, value: f64) -> PyResult<()> {
        let pos = extract_pos(x.py(), x, "x")?;
        self.inner.add_point(Point::new(pos, value))?;
        Ok(())
    }

    /// Coordinates of the current global best.
    #[getter]
    pub fn best_x(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.population().best()?.pos.to_vec())
    }

    /// Value of the current global best (`inf` before the first step).
    #[getter]
    pub fn best_value(&self) -> PyResult<f64> {
        Ok(self.inner.population().best()?.val)
    }

    /// Current particle positions, one list per particle.
    #[getter]
    pub fn positions(&self) -> Vec<Vec<f64>> {
        self.inner.population().iter().map(|p| p.point.pos.to_vec()).collect()
    }

    #[getter]
    pub fn n_particles(&self) -> usize {
        self.inner.population().len()
    }
}

/// SwarmOutcome — result of `ParticleSwarm.minimize`, exposed read-only.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_optim.swarm")]
pub struct SwarmOutcome {
    pub inner: DriverOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SwarmOutcome {
    #[getter]
    pub fn x(&self) -> Vec<f64> {
        self.inner.best.pos.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.best.val
    }

    #[getter]
    pub fn neval(&self) -> usize {
        self.inner.neval
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }
}

/// _rust_optim — PyO3 module initializer for the Python extension.
///
/// Creates the `swarm` submodule, attaches it to `_rust_optim`, and registers
/// it in `sys.modules` as `rust_optim.swarm`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_optim<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let swarm_mod = PyModule::new(_py, "swarm")?;
    swarm(_py, m, &swarm_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_optim.swarm", swarm_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn swarm<'py>(
    _py: Python, rust_optim: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ParticleSwarm>()?;
    m.add_class::<SwarmOutcome>()?;
    rust_optim.add_submodule(m)?;
    Ok(())
}

//! Integration tests for the particle-swarm pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: population construction, mesh snapping,
//!   batch evaluation (plain and cached), velocity updates, and the
//!   convergence driver.
//! - Exercise realistic objectives (shifted quadratics and the benchmark
//!   functions) rather than single-step toy cases only.
//!
//! Coverage
//! --------
//! - `swarm`:
//!   - `SwarmIterator` with the default serial evaluator and mover.
//!   - Personal-best bookkeeping across many steps.
//! - `mesh`:
//!   - `Bounded` over `Integer` over `Infinite`, and a bounded continuous box.
//! - `evaluation`:
//!   - `CachingEvaluator` sharing results across steps.
//! - `driver` and `bench`:
//!   - `minimize` error surfacing and `bench::run` on Ackley and Hölder table.
//!
//! Exclusions
//! ----------
//! - Single-component behavior (rounding rules, option validation, Display
//!   messages); those are covered by unit tests.
//! - Python bindings; those are exercised from Python.
use std::cell::{Cell, RefCell};

use ndarray::{Array1, array};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use rust_optim::{
    bench::{Ackley, BenchFunction, HolderTable, run},
    driver::{DriverError, DriverOptions, minimize},
    evaluation::{
        CachingEvaluator, Objective, ObjectiveError, ObjectiveResult, Point, Pos, SerialEvaluator,
        SimpleObjective,
    },
    mesh::{Bounded, Infinite, Integer},
    swarm::{Particle, Population, SimpleMover, SwarmError, SwarmIterator},
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three particles with hand-picked positions and velocities around the
/// origin.
fn three_particles() -> Population {
    let positions = [array![-0.1, 1.2], array![-0.8, 0.2], array![-1.9, 0.0]];
    let velocities = [array![-0.8, 0.7], array![0.4, -0.1], array![0.9, 0.9]];
    let particles = positions
        .into_iter()
        .zip(velocities)
        .enumerate()
        .map(|(id, (pos, vel))| Particle::new(id, pos, vel).unwrap())
        .collect();
    Population::from_particles(particles).unwrap()
}

fn sphere(v: &Pos) -> f64 {
    v.dot(v)
}

/// Counts calls and records every coordinate vector it is asked about.
struct Recording<F> {
    f: F,
    seen: RefCell<Vec<Pos>>,
}

impl<F: Fn(&Pos) -> f64> Recording<F> {
    fn new(f: F) -> Self {
        Self { f, seen: RefCell::new(Vec::new()) }
    }

    fn calls(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl<F: Fn(&Pos) -> f64> Objective for Recording<F> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        self.seen.borrow_mut().push(v.clone());
        Ok((self.f)(v))
    }
}

/// Fails on exactly one (1-based) call number.
struct FailOnCall {
    calls: Cell<usize>,
    fail_on: usize,
}

impl Objective for FailOnCall {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n == self.fail_on {
            return Err(ObjectiveError::failed("simulator crashed"));
        }
        Ok(sphere(v))
    }
}

#[test]
// Purpose
// -------
// A default swarm converges on the sphere from fixed starting conditions.
//
// Given
// -----
// - Three particles with fixed positions and velocities, sphere objective.
// - Default serial evaluator and mover (seed 1), no mesh, 50 steps.
//
// Expect
// ------
// - Final global best below 1e-3 and strictly better than the first step's.
// - Every step evaluates all three particles.
fn swarm_converges_on_sphere_from_fixed_start() {
    init_logging();

    // Arrange
    let mut it = SwarmIterator::with_defaults(three_particles());
    let obj = SimpleObjective(sphere);

    // Act
    let mut history = Vec::new();
    for _ in 0..50 {
        let step = it.iterate(&obj, None).unwrap();
        assert_eq!(step.neval, 3);
        history.push(step.best.val);
    }

    // Assert
    let first = history[0];
    let last = *history.last().unwrap();
    assert!((first - 0.68).abs() < 1e-12, "first best {first}");
    assert!(last < 1e-3, "final best {last}");
    assert!(last < first);
}

#[test]
// Purpose
// -------
// Personal bests and the global best never get worse from step to step.
//
// Given
// -----
// - The fixed three-particle start and sphere objective, 30 steps.
//
// Expect
// ------
// - Each particle's personal-best value is non-increasing.
// - The reported global best is non-increasing and equals the minimum of
//   the personal bests.
fn personal_bests_are_monotone() {
    init_logging();

    // Arrange
    let mut it = SwarmIterator::with_defaults(three_particles());
    let obj = SimpleObjective(sphere);
    let mut prev_personal = vec![f64::INFINITY; 3];
    let mut prev_global = f64::INFINITY;

    for _ in 0..30 {
        // Act
        let step = it.iterate(&obj, None).unwrap();

        // Assert
        let personal: Vec<f64> = it.population().iter().map(|p| p.best.val).collect();
        for (now, before) in personal.iter().zip(&prev_personal) {
            assert!(now <= before, "personal best rose from {before} to {now}");
        }
        let min_personal = personal.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(step.best.val, min_personal);
        assert!(step.best.val <= prev_global);
        prev_personal = personal;
        prev_global = step.best.val;
    }
}

#[test]
// Purpose
// -------
// Mesh snapping, caching, and the swarm work together on a discrete
// problem.
//
// Given
// -----
// - Objective `(x - 1)^2 + (y + 2)^2` recording every call.
// - Six particles placed uniformly in [-3, 3]^2 (generator seed 11).
// - A bounded integer mesh over the same box and a caching serial
//   evaluator; 25 steps.
//
// Expect
// ------
// - Every coordinate the objective sees is a whole number inside the box.
// - The swarm finds the integer minimizer (1, -2) with value 0.
// - Steps report 6 evaluations each (cache hits included) while the
//   objective itself runs far less often; no point is cached twice.
fn mesh_cache_and_swarm_pipeline() {
    init_logging();

    // Arrange
    let lower = array![-3.0, -3.0];
    let upper = array![3.0, 3.0];
    let obj = Recording::new(|v: &Pos| (v[0] - 1.0).powi(2) + (v[1] + 2.0).powi(2));
    let mut rng = Xoshiro256Plus::seed_from_u64(11);
    let pop = Population::uniform(6, &lower, &upper, &mut rng).unwrap();
    let mover: SimpleMover = SimpleMover::default();
    let mut it = SwarmIterator::new(pop, CachingEvaluator::new(SerialEvaluator::default()), mover);
    let mut mesh =
        Bounded::new(Integer::new(Infinite::continuous()), lower.clone(), upper.clone()).unwrap();

    // Act
    let mut neval = 0;
    let mut last = None;
    for _ in 0..25 {
        let step = it.iterate(&obj, Some(&mut mesh)).unwrap();
        neval += step.neval;
        last = Some(step.best);
    }
    let best = last.unwrap();

    // Assert
    for v in obj.seen.borrow().iter() {
        for (i, x) in v.iter().enumerate() {
            assert_eq!(x.fract(), 0.0, "non-integer coordinate {x}");
            assert!(lower[i] <= *x && *x <= upper[i], "{x} outside the box");
        }
    }
    assert_eq!(best, Point::new(array![1.0, -2.0], 0.0));
    assert_eq!(neval, 25 * 6);

    let cache = it.evaluator();
    assert!(cache.len() <= 49);
    assert!(obj.calls() >= cache.len());
    assert!(obj.calls() < neval / 2, "{} objective calls", obj.calls());
    assert_eq!(cache.cached(&Point::unevaluated(array![1.0, -2.0])), Some(0.0));
}

#[test]
// Purpose
// -------
// An objective failure mid-run stops the driver with the work done so far.
//
// Given
// -----
// - The fixed three-particle start; the objective fails on its 8th call.
// - A serial evaluator that stops at the first failure.
//
// Expect
// ------
// - `DriverError::StepFailed` with 7 evaluations (two full steps plus one
//   point of the third), the best point of step two, and the evaluation
//   error as its source.
fn driver_surfaces_objective_failure() {
    init_logging();

    // Arrange
    let mut it = SwarmIterator::with_defaults(three_particles());
    let obj = FailOnCall { calls: Cell::new(0), fail_on: 8 };
    let opts = DriverOptions::new(1e-9, 1_000).unwrap();

    // Act
    let err = minimize(&mut it, &obj, None, 0.0, &opts).unwrap_err();

    // Assert
    match err {
        DriverError::StepFailed { neval, best, source } => {
            assert_eq!(neval, 7);
            let best = best.unwrap();
            assert_eq!(&best, it.population().best().unwrap());
            assert_eq!(
                source,
                SwarmError::Evaluation {
                    neval: 1,
                    source: ObjectiveError::failed("simulator crashed")
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(obj.calls.get(), 8);
}

#[test]
// Purpose
// -------
// The benchmark runner converges on Ackley with a default swarm.
//
// Given
// -----
// - 20 particles placed uniformly in Ackley's box (generator seed 3).
// - Default mover and evaluator, tolerance 1e-4 (absolute, optimum 0),
//   budget 10_000.
//
// Expect
// ------
// - Convergence within budget, best value below 1e-4, and a whole number
//   of 20-point steps.
fn bench_run_converges_on_ackley() {
    init_logging();

    // Arrange
    let ackley = Ackley;
    let (lower, upper) = ackley.bounds();
    let mut rng = Xoshiro256Plus::seed_from_u64(3);
    let pop = Population::uniform(20, &lower, &upper, &mut rng).unwrap();
    let mut it = SwarmIterator::with_defaults(pop);

    // Act
    let out = run(&ackley, &mut it, None, &DriverOptions::default()).unwrap();

    // Assert
    assert!(out.converged);
    assert!(out.best.val < 1e-4);
    assert_eq!(out.neval, 20 * out.iterations);
    assert!(out.neval <= 10_000);
}

#[test]
// Purpose
// -------
// A bounded continuous mesh keeps the swarm inside Hölder table's box and
// the runner reaches one of its four global minima.
//
// Given
// -----
// - 20 particles placed uniformly in [-10, 10]^2 (generator seed 2).
// - `Bounded<Infinite>` with step 0 over the same box.
//
// Expect
// ------
// - Convergence to within relative error 1e-4 of -19.2085.
// - The best point lies within 0.05 of (±8.05502, ±9.66459).
fn bench_run_converges_on_holder_table_in_box() {
    init_logging();

    // Arrange
    let holder = HolderTable;
    let (lower, upper) = holder.bounds();
    let mut rng = Xoshiro256Plus::seed_from_u64(2);
    let pop = Population::uniform(20, &lower, &upper, &mut rng).unwrap();
    let mut it = SwarmIterator::with_defaults(pop);
    let mut mesh = Bounded::new(Infinite::continuous(), lower, upper).unwrap();

    // Act
    let out = run(&holder, &mut it, Some(&mut mesh), &DriverOptions::default()).unwrap();

    // Assert
    assert!(out.converged);
    assert!((out.best.val + 19.2085).abs() / 19.2085 < 1e-4);
    let target: Array1<f64> = array![8.05502, 9.66459];
    let dist = (out.best.pos.mapv(f64::abs) - &target).mapv(f64::abs);
    assert!(dist.iter().all(|d| *d < 0.05), "best at {:?}", out.best.pos);
}

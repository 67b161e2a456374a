//! Closed-form benchmark functions with known optima.
//!
//! Formulas follow the standard test-function literature; the two-dimensional
//! functions take `v = (x, y)`.
use std::f64::consts::{E, PI};

use ndarray::{Array1, array};

use crate::{
    bench::BenchFunction,
    evaluation::{Objective, ObjectiveError, ObjectiveResult, Point, Pos},
};

/// Ackley: minimum `f(0, 0) = 0` on `[-5, 5]^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ackley;

impl BenchFunction for Ackley {
    fn eval(&self, v: &Pos) -> f64 {
        let (x, y) = (v[0], v[1]);
        -20.0 * (-0.2 * (0.5 * (x * x + y * y)).sqrt()).exp()
            - (0.5 * ((2.0 * PI * x).cos() + (2.0 * PI * y).cos())).exp()
            + 20.0
            + E
    }

    fn bounds(&self) -> (Pos, Pos) {
        (array![-5.0, -5.0], array![5.0, 5.0])
    }

    fn optima(&self) -> Vec<Point> {
        vec![Point::new(array![0.0, 0.0], 0.0)]
    }
}

/// Cross-in-tray: four global minima `f(±1.34941, ±1.34941) = -2.06261` on
/// `[-10, 10]^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossTray;

impl BenchFunction for CrossTray {
    fn eval(&self, v: &Pos) -> f64 {
        let (x, y) = (v[0], v[1]);
        let inner = (x.sin() * y.sin() * (100.0 - (x * x + y * y).sqrt() / PI).abs().exp()).abs();
        -1e-4 * (inner + 1.0).powf(0.1)
    }

    fn bounds(&self) -> (Pos, Pos) {
        (array![-10.0, -10.0], array![10.0, 10.0])
    }

    fn optima(&self) -> Vec<Point> {
        const X: f64 = 1.34941;
        const VAL: f64 = -2.06261;
        vec![
            Point::new(array![X, -X], VAL),
            Point::new(array![X, X], VAL),
            Point::new(array![-X, X], VAL),
            Point::new(array![-X, -X], VAL),
        ]
    }
}

/// Eggholder: minimum `f(512, 404.2319) = -959.6407` on `[-512, 512]^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Eggholder;

impl BenchFunction for Eggholder {
    fn eval(&self, v: &Pos) -> f64 {
        let (x, y) = (v[0], v[1]);
        -(y + 47.0) * (y + x / 2.0 + 47.0).abs().sqrt().sin()
            - x * (x - (y + 47.0)).abs().sqrt().sin()
    }

    fn bounds(&self) -> (Pos, Pos) {
        (array![-512.0, -512.0], array![512.0, 512.0])
    }

    fn optima(&self) -> Vec<Point> {
        vec![Point::new(array![512.0, 404.2319], -959.6407)]
    }
}

/// Hölder table: four global minima `f(±8.05502, ±9.66459) = -19.2085` on
/// `[-10, 10]^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HolderTable;

impl BenchFunction for HolderTable {
    fn eval(&self, v: &Pos) -> f64 {
        let (x, y) = (v[0], v[1]);
        -(x.sin() * y.cos() * (1.0 - (x * x + y * y).sqrt() / PI).abs().exp()).abs()
    }

    fn bounds(&self) -> (Pos, Pos) {
        (array![-10.0, -10.0], array![10.0, 10.0])
    }

    fn optima(&self) -> Vec<Point> {
        const X: f64 = 8.05502;
        const Y: f64 = 9.66459;
        const VAL: f64 = -19.2085;
        vec![
            Point::new(array![X, Y], VAL),
            Point::new(array![-X, Y], VAL),
            Point::new(array![X, -Y], VAL),
            Point::new(array![-X, -Y], VAL),
        ]
    }
}

/// Sphere `f(x) = Σ x_i²` in `dim` dimensions: minimum `0` at the origin on
/// `[-5, 5]^dim`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub dim: usize,
}

impl Sphere {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(2)
    }
}

impl BenchFunction for Sphere {
    fn eval(&self, v: &Pos) -> f64 {
        v.dot(v)
    }

    fn bounds(&self) -> (Pos, Pos) {
        (Array1::from_elem(self.dim, -5.0), Array1::from_elem(self.dim, 5.0))
    }

    fn optima(&self) -> Vec<Point> {
        vec![Point::new(Array1::zeros(self.dim), 0.0)]
    }
}

/// Borrowing [`Objective`] view of a benchmark function.
///
/// Rejects coordinate vectors whose length differs from the function's
/// bounds instead of indexing out of range.
#[derive(Debug, Clone, Copy)]
pub struct BenchObjective<'a, F: ?Sized>(pub &'a F);

impl<F: BenchFunction + ?Sized> Objective for BenchObjective<'_, F> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        let expected = self.0.dim();
        if v.len() != expected {
            return Err(ObjectiveError::DimensionMismatch { expected, found: v.len() });
        }
        Ok(self.0.eval(v))
    }
}

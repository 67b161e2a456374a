//! evaluation::objective — the objective capability and its adapters.
//!
//! Purpose
//! -------
//! Define the [`Objective`] contract consumed by every evaluator and provide
//! the stock implementations: plain closures ([`SimpleObjective`]), argmin
//! cost functions ([`CostFunctionObjective`]), and a diagnostic decorator
//! that logs every evaluation ([`ObjectiveLogger`]).
//!
//! Conventions
//! -----------
//! - Objectives are framed so that **lower values are better**.
//! - A failing evaluation returns `Err(ObjectiveError)`; evaluators record
//!   such a point with the value `+inf`.
//! - Objectives take `&self` so that a single objective can be shared by
//!   several evaluators; implementations that keep counters use atomics.
use std::sync::atomic::{AtomicUsize, Ordering};

use argmin::core::CostFunction;
use log::info;

use crate::evaluation::{
    errors::{ObjectiveError, ObjectiveResult},
    point::Pos,
};

/// Black-box scalar function over a coordinate vector.
///
/// Required:
/// - `objective(&Pos) -> ObjectiveResult<f64>`: evaluate the function at `v`.
///   Lower is better. On failure return a descriptive [`ObjectiveError`]
///   instead of panicking.
///
/// [`ObjectiveError`]: crate::evaluation::errors::ObjectiveError
pub trait Objective {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64>;
}

impl<O: Objective + ?Sized> Objective for &O {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        (**self).objective(v)
    }
}

impl<O: Objective + ?Sized> Objective for Box<O> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        (**self).objective(v)
    }
}

/// Objective backed by an infallible closure `Fn(&Pos) -> f64`.
#[derive(Debug, Clone, Copy)]
pub struct SimpleObjective<F>(pub F);

impl<F: Fn(&Pos) -> f64> Objective for SimpleObjective<F> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        Ok((self.0)(v))
    }
}

/// Exposes an argmin [`CostFunction`] as an [`Objective`].
///
/// The cost is used as-is (argmin minimizes too). Errors raised by the cost
/// function are converted through `From<argmin::core::Error>`; a NaN cost is
/// reported as [`ObjectiveError::NonFinite`].
#[derive(Debug, Clone)]
pub struct CostFunctionObjective<C> {
    pub problem: C,
}

impl<C> CostFunctionObjective<C> {
    pub fn new(problem: C) -> Self {
        Self { problem }
    }
}

impl<C> Objective for CostFunctionObjective<C>
where
    C: CostFunction<Param = Pos, Output = f64>,
{
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        let value = self.problem.cost(v)?;
        if value.is_nan() {
            return Err(ObjectiveError::NonFinite { value });
        }
        Ok(value)
    }
}

/// Diagnostic decorator: counts evaluations and logs each one at `info`.
///
/// Each record has the form `"<count> <x0> <x1> ... -> <value>"`; failures are
/// logged with the error message instead of the value.
#[derive(Debug)]
pub struct ObjectiveLogger<O> {
    inner: O,
    count: AtomicUsize,
}

impl<O: Objective> ObjectiveLogger<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, count: AtomicUsize::new(0) }
    }

    /// Number of evaluations routed through this decorator so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Objective> Objective for ObjectiveLogger<O> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        let result = self.inner.objective(v);
        let n = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        let coords = v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ");
        match &result {
            Ok(val) => info!("{n} {coords} -> {val}"),
            Err(e) => info!("{n} {coords} -> failed: {e}"),
        }
        result
    }
}

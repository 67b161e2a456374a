//! evaluation::evaluator — batch evaluation strategies.
//!
//! Purpose
//! -------
//! Define the [`Evaluator`] contract (evaluate a batch of points against an
//! objective) and the sequential reference implementation
//! [`SerialEvaluator`].
//!
//! Key behaviors
//! -------------
//! - Evaluators return one evaluated point per input point, with the
//!   coordinates preserved and the value filled in, or a [`BatchError`]
//!   carrying whatever was evaluated before the batch stopped.
//! - [`SerialEvaluator`] evaluates in input order on the calling thread.
//!   Without `continue_on_err` it stops at the first failure. With it, every
//!   point is evaluated, failures are recorded as `+inf`, and the batch
//!   error reports the **last** failure; earlier failures are superseded
//!   and only visible through the `warn` log.
//!
//! Invariants & assumptions
//! ------------------------
//! - Order-preserving evaluators (such as [`SerialEvaluator`]) return
//!   results in input order. Decorators are allowed to reorder (see
//!   [`CachingEvaluator`](crate::evaluation::cache::CachingEvaluator)), so
//!   consumers that need to match results to inputs should do so by
//!   coordinates.
//! - Implementations used concurrently must uphold the same one-result-per-
//!   input contract; nothing in this module spawns threads.
use log::warn;

use crate::evaluation::{
    errors::{BatchError, EvalResult, ObjectiveError},
    objective::Objective,
    point::Point,
};

/// Batch evaluation strategy over an [`Objective`].
pub trait Evaluator {
    /// Evaluate `points` with `obj`.
    ///
    /// Unevaluated points are never returned: on `Err`, `evaluated` holds only
    /// the points the evaluator actually finished.
    fn eval(&mut self, obj: &dyn Objective, points: &[Point]) -> EvalResult;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn eval(&mut self, obj: &dyn Objective, points: &[Point]) -> EvalResult {
        (**self).eval(obj, points)
    }
}

/// Sequential evaluator.
///
/// - `continue_on_err = false` (default): stop at the first failure and
///   return the points evaluated before it.
/// - `continue_on_err = true`: evaluate every point, record failures with
///   `val = +inf`, and report the last failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialEvaluator {
    pub continue_on_err: bool,
}

impl SerialEvaluator {
    pub fn new(continue_on_err: bool) -> Self {
        Self { continue_on_err }
    }
}

impl Evaluator for SerialEvaluator {
    fn eval(&mut self, obj: &dyn Objective, points: &[Point]) -> EvalResult {
        let mut results = Vec::with_capacity(points.len());
        let mut last_err: Option<ObjectiveError> = None;
        for p in points {
            let pos = p.pos.clone();
            match obj.objective(&pos) {
                Ok(val) => results.push(Point::new(pos, val)),
                Err(e) if !self.continue_on_err => {
                    return Err(BatchError::new(results, e));
                }
                Err(e) => {
                    if let Some(prev) = &last_err {
                        warn!("superseding earlier evaluation failure: {prev}");
                    }
                    warn!("evaluation {} failed, continuing: {e}", results.len());
                    results.push(Point::unevaluated(pos));
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(source) => Err(BatchError::new(results, source)),
            None => Ok(results),
        }
    }
}

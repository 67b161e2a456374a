//! evaluation::cache — memoizing evaluator decorator.
//!
//! Purpose
//! -------
//! Avoid re-evaluating coordinates that have been seen before. The cache is
//! keyed by [`PointDigest`] and stores only the scalar value; it grows for
//! the lifetime of the decorator and never evicts.
//!
//! Key behaviors
//! -------------
//! - Cache hits are answered without touching the wrapped evaluator.
//! - All misses go to the wrapped evaluator in a single batch.
//! - Every point the wrapped evaluator returns is cached, including the
//!   partial results of a batch that failed. A hit therefore never carries
//!   error information, even if the value was produced by a failed
//!   evaluation (`+inf`).
//! - The result is the cache hits (in input order) followed by the freshly
//!   evaluated points. **Input order is not preserved** when hits and misses
//!   interleave.
//!
//! Invariants & assumptions
//! ------------------------
//! - One result per input point unless the wrapped evaluator aborts.
//! - Lookups never modify stored values. Digest collisions are accepted.
//! - Not synchronized: concurrent use needs external locking (the `&mut self`
//!   receiver enforces this within safe Rust).
use std::collections::HashMap;

use log::debug;

use crate::evaluation::{
    errors::{BatchError, EvalResult},
    evaluator::Evaluator,
    objective::Objective,
    point::{Point, PointDigest},
};

/// Memoizing decorator over another [`Evaluator`].
#[derive(Debug, Clone, Default)]
pub struct CachingEvaluator<E> {
    inner: E,
    cache: HashMap<PointDigest, f64>,
}

impl<E: Evaluator> CachingEvaluator<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, cache: HashMap::new() }
    }

    /// Number of distinct coordinate vectors cached so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cached value for `pos`, if any.
    pub fn cached(&self, point: &Point) -> Option<f64> {
        self.cache.get(&point.digest()).copied()
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    fn store(&mut self, points: &[Point]) {
        for p in points {
            self.cache.insert(p.digest(), p.val);
        }
    }
}

impl<E: Evaluator> Evaluator for CachingEvaluator<E> {
    fn eval(&mut self, obj: &dyn Objective, points: &[Point]) -> EvalResult {
        let mut results = Vec::with_capacity(points.len());
        let mut misses = Vec::with_capacity(points.len());
        for p in points {
            match self.cache.get(&p.digest()) {
                Some(&val) => results.push(Point::new(p.pos.clone(), val)),
                None => misses.push(p.clone()),
            }
        }
        debug!("cache: {} hit(s), {} miss(es)", results.len(), misses.len());

        if misses.is_empty() {
            return Ok(results);
        }
        match self.inner.eval(obj, &misses) {
            Ok(fresh) => {
                self.store(&fresh);
                results.extend(fresh);
                Ok(results)
            }
            Err(BatchError { evaluated, source }) => {
                self.store(&evaluated);
                results.extend(evaluated);
                Err(BatchError::new(results, source))
            }
        }
    }
}

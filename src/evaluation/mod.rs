//! evaluation — objectives, batch evaluators, and evaluation caching.
//!
//! Purpose
//! -------
//! Provide the leaf layer of the optimizer: how a black-box function is
//! called ([`Objective`]), how a batch of candidate points is evaluated
//! ([`Evaluator`]), and how repeated coordinates are answered from memory
//! ([`CachingEvaluator`]).
//!
//! Key behaviors
//! -------------
//! - [`Point`] pairs a coordinate vector ([`Pos`]) with its value; its
//!   [`PointDigest`] (SHA-1 over big-endian IEEE-754 bits) is the cache key.
//! - [`SerialEvaluator`] evaluates sequentially, optionally continuing past
//!   failures and reporting the last one.
//! - [`CachingEvaluator`] wraps any evaluator, evaluates misses in one batch,
//!   caches everything it sees, and returns hits before fresh results.
//! - [`SimpleObjective`], [`CostFunctionObjective`], and [`ObjectiveLogger`]
//!   adapt closures, argmin cost functions, and add diagnostic logging.
//!
//! Conventions
//! -----------
//! - Lower objective values are better; failures are recorded as `+inf`.
//! - Batch failures are [`BatchError`]s carrying the partial results, so the
//!   caller can always account for the evaluations performed.
//!
//! Testing notes
//! -------------
//! - Unit tests cover abort vs continue-on-error semantics, exactly-once
//!   caching, the ordering deviation of the cache, caching of failed
//!   batches, and digest stability.

pub mod cache;
pub mod errors;
pub mod evaluator;
pub mod objective;
pub mod point;

pub use self::cache::CachingEvaluator;
pub use self::errors::{BatchError, EvalResult, ObjectiveError, ObjectiveResult};
pub use self::evaluator::{Evaluator, SerialEvaluator};
pub use self::objective::{CostFunctionObjective, Objective, ObjectiveLogger, SimpleObjective};
pub use self::point::{Point, PointDigest, Pos};

pub mod prelude {
    pub use super::cache::CachingEvaluator;
    pub use super::errors::{BatchError, ObjectiveError, ObjectiveResult};
    pub use super::evaluator::{Evaluator, SerialEvaluator};
    pub use super::objective::{Objective, SimpleObjective};
    pub use super::point::{Point, Pos};
}

//! driver — convergence loop around step-wise optimizers.
//!
//! Purpose
//! -------
//! Run any [`Optimizer`] (one step per call) until it reaches a known
//! optimum within tolerance or exhausts an evaluation budget. This is the
//! glue used by benchmarks and by callers that know their target value.
//!
//! Key behaviors
//! -------------
//! - [`minimize`] accumulates per-step evaluation counts, checks the budget
//!   before each step, and stops on the first step whose best value is close
//!   enough to the optimum.
//! - Closeness is relative error `|best - optimum| / |optimum|`; for a zero
//!   optimum, where the relative form is undefined, absolute error is used.
//! - Any step error stops the run immediately and is surfaced as
//!   [`DriverError::StepFailed`] with the accumulated count and the best point
//!   found so far.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`DriverOptions`] are validated on construction (`tol > 0` and finite,
//!   `max_evals > 0`).
//! - The driver never retries a failed step.
//!
//! Conventions
//! -----------
//! - Lower objective values are better, matching the rest of the crate.

pub mod errors;
pub mod run;
pub mod traits;

pub use self::errors::{DriverError, DriverResult};
pub use self::run::{convergence_error, minimize};
pub use self::traits::{DriverOptions, DriverOutcome, Optimizer, Step};

pub mod prelude {
    pub use super::errors::{DriverError, DriverResult};
    pub use super::run::minimize;
    pub use super::traits::{DriverOptions, DriverOutcome, Optimizer, Step};
}

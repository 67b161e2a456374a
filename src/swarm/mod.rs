//! swarm — particle-swarm optimization over evaluators and meshes.
//!
//! Purpose
//! -------
//! Maintain a population of candidate solutions and advance it one step at
//! a time with inertia/cognitive/social dynamics. Evaluation and mesh
//! projection are delegated to the [`evaluation`](crate::evaluation) and
//! [`mesh`](crate::mesh) layers.
//!
//! Key behaviors
//! -------------
//! - [`Particle`] / [`Population`]: swarm state and the global best.
//! - [`Mover`] / [`SimpleMover`]: the velocity and position update law,
//!   configured by [`MoverOptions`] and seeded deterministically.
//! - [`SwarmIterator`]: one snap -> evaluate -> update -> move step per
//!   call, reporting the global best and evaluation count.
//!
//! Invariants & assumptions
//! ------------------------
//! - Personal-best values are non-increasing across steps.
//! - Lower objective values are better; unevaluated points carry `+inf`.
//!
//! Downstream usage
//! ----------------
//! - Build a [`Population`], wrap it in a [`SwarmIterator`], then either
//!   call [`SwarmIterator::iterate`] yourself or hand the iterator to
//!   [`minimize`](crate::driver::minimize).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the update law with a constant generator, the
//!   reproducibility of seeded runs, digest-based result matching, and
//!   step aborts. The deterministic convergence scenario lives in the
//!   integration tests.

pub mod errors;
pub mod iterator;
pub mod mover;
pub mod particle;

pub use self::errors::{SwarmError, SwarmResult};
pub use self::iterator::SwarmIterator;
pub use self::mover::{
    DEFAULT_COGNITION, DEFAULT_INERTIA, DEFAULT_SEED, DEFAULT_SOCIAL, Mover, MoverOptions,
    SimpleMover,
};
pub use self::particle::{Particle, Population};

pub mod prelude {
    pub use super::errors::{SwarmError, SwarmResult};
    pub use super::iterator::SwarmIterator;
    pub use super::mover::{Mover, MoverOptions, SimpleMover};
    pub use super::particle::{Particle, Population};
}

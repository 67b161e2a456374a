//! swarm::mover — velocity and position update rules.
//!
//! Purpose
//! -------
//! Advance a [`Population`] by one step of particle-swarm dynamics. The
//! [`Mover`] trait is the seam; [`SimpleMover`] is the default
//! inertia/cognitive/social rule.
//!
//! Key behaviors
//! -------------
//! - The random generator is private to the mover and seeded lazily from
//!   [`MoverOptions::seed`] on first use, so runs are reproducible unless a
//!   generator is supplied with [`SimpleMover::with_rng`].
//! - For every particle, exactly two uniform scalars `r1`, `r2` are drawn
//!   (in that order) and reused for every dimension of its update.
//! - Velocity update per dimension `i`, with `g` the global best position:
//!   `v_i = w * v_i + cognition * r1 * (g_i - x_i) + social * r2 * (g_i - x_i)`.
//!   Both pull terms use the global best; the personal best does not
//!   enter the update.
//! - The inertia function is called once per velocity component.
//! - After the full velocity is computed, a fixed speed cap (`vmax > 0`)
//!   rescales it to norm `vmax` when exceeded. Without a fixed cap the cap is
//!   `1.5` times the pre-update speed, which never triggers the rescale.
//! - Finally `x_i += v_i`; the particle's value stays stale until the next
//!   evaluation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coefficients and the speed cap are finite and non-negative (checked by
//!   [`MoverOptions::new`]).
//! - One mover owns one generator; concurrent swarms need separate movers.
use std::fmt;

use log::trace;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::swarm::{
    errors::{SwarmError, SwarmResult},
    particle::Population,
};

pub const DEFAULT_COGNITION: f64 = 0.5;
pub const DEFAULT_SOCIAL: f64 = 0.5;
pub const DEFAULT_INERTIA: f64 = 0.9;
pub const DEFAULT_SEED: u64 = 1;

/// Multiple of the pre-update speed used as the cap when none is fixed.
const DYNAMIC_CAP_FACTOR: f64 = 1.5;

/// Rule that updates velocities and positions of a population in place.
pub trait Mover {
    /// Advance every particle of `pop` by one step.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if `pop` has no particles.
    fn advance(&mut self, pop: &mut Population) -> SwarmResult<()>;
}

impl<M: Mover + ?Sized> Mover for Box<M> {
    fn advance(&mut self, pop: &mut Population) -> SwarmResult<()> {
        (**self).advance(pop)
    }
}

/// Coefficients and seeding for [`SimpleMover`].
///
/// - `cognition`, `social`: weights of the two pull terms.
/// - `vmax`: fixed speed cap; `0` selects the dynamic cap.
/// - `seed`: seed for the lazily created generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverOptions {
    pub cognition: f64,
    pub social: f64,
    pub vmax: f64,
    pub seed: u64,
}

impl MoverOptions {
    /// Construct validated mover options.
    ///
    /// # Errors
    /// - [`SwarmError::InvalidCoefficient`] if `cognition` or `social` is
    ///   non-finite or negative.
    /// - [`SwarmError::InvalidMaxSpeed`] if `vmax` is non-finite or negative.
    pub fn new(cognition: f64, social: f64, vmax: f64, seed: u64) -> SwarmResult<Self> {
        verify_coefficient("cognition", cognition)?;
        verify_coefficient("social", social)?;
        if !vmax.is_finite() || vmax < 0.0 {
            return Err(SwarmError::InvalidMaxSpeed { value: vmax });
        }
        Ok(Self { cognition, social, vmax, seed })
    }
}

impl Default for MoverOptions {
    fn default() -> Self {
        Self { cognition: DEFAULT_COGNITION, social: DEFAULT_SOCIAL, vmax: 0.0, seed: DEFAULT_SEED }
    }
}

fn verify_coefficient(name: &'static str, value: f64) -> SwarmResult<()> {
    if !value.is_finite() {
        return Err(SwarmError::InvalidCoefficient { name, value, reason: "must be finite" });
    }
    if value < 0.0 {
        return Err(SwarmError::InvalidCoefficient { name, value, reason: "must be non-negative" });
    }
    Ok(())
}

type InertiaFn = Box<dyn FnMut() -> f64 + Send>;

/// Default particle-swarm mover.
pub struct SimpleMover<R = Xoshiro256Plus> {
    opts: MoverOptions,
    inertia: InertiaFn,
    rng: Option<R>,
}

impl<R: Rng + SeedableRng> SimpleMover<R> {
    pub fn new(opts: MoverOptions) -> Self {
        Self { opts, inertia: Box::new(|| DEFAULT_INERTIA), rng: None }
    }

    /// Replace the constant inertia weight with a schedule.
    pub fn with_inertia(mut self, inertia: impl FnMut() -> f64 + Send + 'static) -> Self {
        self.inertia = Box::new(inertia);
        self
    }

    /// Use `rng` instead of seeding from [`MoverOptions::seed`].
    pub fn with_rng(mut self, rng: R) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn options(&self) -> &MoverOptions {
        &self.opts
    }
}

impl Default for SimpleMover {
    fn default() -> Self {
        Self::new(MoverOptions::default())
    }
}

impl<R> fmt::Debug for SimpleMover<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleMover")
            .field("opts", &self.opts)
            .field("seeded", &self.rng.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: Rng + SeedableRng> Mover for SimpleMover<R> {
    fn advance(&mut self, pop: &mut Population) -> SwarmResult<()> {
        let best = pop.best()?.pos.clone();
        let seed = self.opts.seed;
        let rng = self.rng.get_or_insert_with(|| R::seed_from_u64(seed));
        let MoverOptions { cognition, social, vmax, .. } = self.opts;

        for p in pop.iter_mut() {
            let cap = if vmax > 0.0 { vmax } else { DYNAMIC_CAP_FACTOR * p.speed() };
            let r1: f64 = rng.r#gen();
            let r2: f64 = rng.r#gen();

            for i in 0..p.vel.len() {
                let pull = best[i] - p.point.pos[i];
                p.vel[i] = (self.inertia)() * p.vel[i] + cognition * r1 * pull + social * r2 * pull;
            }

            let speed = p.speed();
            if vmax > 0.0 && speed > cap {
                p.vel *= cap / speed;
            }
            p.point.pos += &p.vel;
            trace!("particle {} moved with speed {}", p.id, p.speed());
        }
        Ok(())
    }
}

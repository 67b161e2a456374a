//! swarm::particle — particle state and the population container.
//!
//! Purpose
//! -------
//! Hold the per-particle swarm state (current point, velocity, personal
//! best) and aggregate it into a [`Population`] that exposes the global
//! best.
//!
//! Key behaviors
//! -------------
//! - A fresh particle's personal best is its starting position with value
//!   `+inf`, so the first evaluation always becomes its best.
//! - [`Particle::update`] records the evaluated value and replaces the
//!   personal best only on strict improvement.
//! - [`Population::best`] is the minimum personal best (first particle wins
//!   ties); it is an error on an empty population.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every particle in a population has the same dimensionality, and its
//!   velocity has that dimensionality too.
//! - Particle ids are `0..n` in construction order and never change.
use argmin_math::ArgminL2Norm;
use ndarray::Array1;
use rand::Rng;

use crate::{
    evaluation::{Point, Pos},
    swarm::errors::{SwarmError, SwarmResult},
};

/// One candidate solution in a swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    /// Current position; the value is stale between a move and the next
    /// evaluation.
    pub point: Point,
    pub vel: Array1<f64>,
    pub best: Point,
}

impl Particle {
    /// Particle at `pos` moving with `vel`, not yet evaluated.
    ///
    /// # Errors
    /// - [`SwarmError::PointDimMismatch`] if `vel` and `pos` differ in length.
    pub fn new(id: usize, pos: Pos, vel: Array1<f64>) -> SwarmResult<Self> {
        if vel.len() != pos.len() {
            return Err(SwarmError::PointDimMismatch { expected: pos.len(), found: vel.len() });
        }
        Ok(Self { id, best: Point::unevaluated(pos.clone()), point: Point::unevaluated(pos), vel })
    }

    /// Record the evaluation `evaluated` of this particle.
    ///
    /// The current value is always replaced; the personal best becomes
    /// `evaluated` when it is strictly better or no best has been observed
    /// yet. The current coordinates are left alone, so a mesh-snapped
    /// result does not move the particle.
    pub fn update(&mut self, evaluated: &Point) {
        self.point.val = evaluated.val;
        if evaluated.val < self.best.val || self.best.val == f64::INFINITY {
            self.best = evaluated.clone();
        }
    }

    pub fn dim(&self) -> usize {
        self.point.len()
    }

    /// Euclidean norm of the velocity.
    pub fn speed(&self) -> f64 {
        self.vel.l2_norm()
    }
}

/// Ordered collection of particles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    particles: Vec<Particle>,
}

impl Population {
    /// Build a population from starting positions, drawing every velocity
    /// component `i` uniformly from `[vmin[i], vmax[i]]` with `rng`.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if `points` is empty.
    /// - [`SwarmError::PointDimMismatch`] if the points differ in length.
    /// - [`SwarmError::VelocityBoundsMismatch`] if a bound vector's length
    ///   differs from the point dimension.
    /// - [`SwarmError::InvertedVelocityBounds`] if some `vmin[i] > vmax[i]`.
    pub fn new<R: Rng>(
        points: Vec<Pos>, vmin: &Array1<f64>, vmax: &Array1<f64>, rng: &mut R,
    ) -> SwarmResult<Self> {
        let dim = points.first().map(|p| p.len()).ok_or(SwarmError::EmptyPopulation)?;
        if vmin.len() != dim || vmax.len() != dim {
            return Err(SwarmError::VelocityBoundsMismatch {
                vmin: vmin.len(),
                vmax: vmax.len(),
                dim,
            });
        }
        for (index, (&lo, &hi)) in vmin.iter().zip(vmax.iter()).enumerate() {
            if lo > hi {
                return Err(SwarmError::InvertedVelocityBounds { index, vmin: lo, vmax: hi });
            }
        }

        let mut particles = Vec::with_capacity(points.len());
        for (id, pos) in points.into_iter().enumerate() {
            if pos.len() != dim {
                return Err(SwarmError::PointDimMismatch { expected: dim, found: pos.len() });
            }
            let vel = Array1::from_iter(
                vmin.iter().zip(vmax.iter()).map(|(&lo, &hi)| lo + (hi - lo) * rng.r#gen::<f64>()),
            );
            particles.push(Particle::new(id, pos, vel)?);
        }
        Ok(Self { particles })
    }

    /// Build `n` particles placed uniformly at random in the box
    /// `[lower, upper]`, with velocity components drawn from
    /// `[-span/2, span/2]` where `span = upper - lower`.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if `n == 0`.
    /// - [`SwarmError::BoundsMismatch`] if the bound vectors differ in length.
    /// - [`SwarmError::InvertedBounds`] if some `lower[i] > upper[i]`.
    pub fn uniform<R: Rng>(
        n: usize, lower: &Array1<f64>, upper: &Array1<f64>, rng: &mut R,
    ) -> SwarmResult<Self> {
        if n == 0 {
            return Err(SwarmError::EmptyPopulation);
        }
        if lower.len() != upper.len() {
            return Err(SwarmError::BoundsMismatch { lower: lower.len(), upper: upper.len() });
        }
        for (index, (&lo, &up)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo > up {
                return Err(SwarmError::InvertedBounds { index, lower: lo, upper: up });
            }
        }

        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            let mut pos = lower.clone();
            for (x, &up) in pos.iter_mut().zip(upper.iter()) {
                *x += (up - *x) * rng.r#gen::<f64>();
            }
            points.push(pos);
        }
        let vmax = (upper - lower) * 0.5;
        let vmin = vmax.mapv(|v| -v);
        Self::new(points, &vmin, &vmax, rng)
    }

    /// Wrap already constructed particles.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if `particles` is empty.
    /// - [`SwarmError::PointDimMismatch`] if the particles differ in
    ///   dimensionality or a velocity does not match its point.
    pub fn from_particles(particles: Vec<Particle>) -> SwarmResult<Self> {
        let dim = particles.first().map(Particle::dim).ok_or(SwarmError::EmptyPopulation)?;
        for p in &particles {
            if p.dim() != dim {
                return Err(SwarmError::PointDimMismatch { expected: dim, found: p.dim() });
            }
            if p.vel.len() != dim {
                return Err(SwarmError::PointDimMismatch { expected: dim, found: p.vel.len() });
            }
        }
        Ok(Self { particles })
    }

    /// Snapshot of every particle's current point, in particle order.
    pub fn points(&self) -> Vec<Point> {
        self.particles.iter().map(|p| p.point.clone()).collect()
    }

    /// Minimum-value personal best across the population.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if there are no particles.
    pub fn best(&self) -> SwarmResult<&Point> {
        let (first, rest) = self.particles.split_first().ok_or(SwarmError::EmptyPopulation)?;
        let mut best = &first.best;
        for p in rest {
            if p.best.val < best.val {
                best = &p.best;
            }
        }
        Ok(best)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Dimensionality shared by all particles (`0` when empty).
    pub fn dim(&self) -> usize {
        self.particles.first().map_or(0, Particle::dim)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

//! swarm::iterator — one-step particle-swarm optimizer.
//!
//! Purpose
//! -------
//! Orchestrate a single optimization step over a [`Population`]: snapshot,
//! optional mesh projection, batch evaluation, personal-best updates, and
//! movement. Termination belongs to the caller (see
//! [`minimize`](crate::driver::minimize)).
//!
//! Key behaviors
//! -------------
//! - Step order is fixed: snap -> evaluate -> update bests -> move.
//! - Evaluation results are matched to particles through the
//!   [`PointDigest`] of the coordinates that were submitted, so evaluators
//!   that reorder their output (such as
//!   [`CachingEvaluator`](crate::evaluation::CachingEvaluator)) are handled.
//! - The reported evaluation count is the number of results the evaluator
//!   returned, cache hits included.
//!
//! Invariants & assumptions
//! ------------------------
//! - A failed evaluation or mesh error aborts the step before any particle
//!   is updated or moved; the error carries the partial evaluation count.
//! - Particles are never snapped in place: only the evaluated copy lies on
//!   the mesh, which then becomes the personal best on improvement.
use std::collections::HashMap;

use log::debug;

use crate::{
    driver::{Optimizer, Step},
    evaluation::{Evaluator, Objective, Point, PointDigest, SerialEvaluator},
    mesh::{Mesh, nearest_point},
    swarm::{
        errors::{SwarmError, SwarmResult},
        mover::{Mover, SimpleMover},
        particle::Population,
    },
};

/// Particle-swarm optimizer driven one step at a time.
#[derive(Debug)]
pub struct SwarmIterator<E = SerialEvaluator, M = SimpleMover> {
    pop: Population,
    evaluator: E,
    mover: M,
}

impl SwarmIterator {
    /// Iterator with a stop-on-error serial evaluator and the default mover.
    pub fn with_defaults(pop: Population) -> Self {
        Self::new(pop, SerialEvaluator::default(), SimpleMover::default())
    }
}

impl<E: Evaluator, M: Mover> SwarmIterator<E, M> {
    pub fn new(pop: Population, evaluator: E, mover: M) -> Self {
        Self { pop, evaluator, mover }
    }

    pub fn population(&self) -> &Population {
        &self.pop
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn mover(&self) -> &M {
        &self.mover
    }

    pub fn into_parts(self) -> (Population, E, M) {
        (self.pop, self.evaluator, self.mover)
    }

    /// Offer an externally found point to the swarm.
    ///
    /// When `p` beats the current global best it becomes the personal best
    /// of the first particle, so the next move pulls the swarm toward it.
    ///
    /// # Errors
    /// - [`SwarmError::EmptyPopulation`] if there are no particles.
    /// - [`SwarmError::PointDimMismatch`] if `p` has the wrong dimension.
    pub fn add_point(&mut self, p: Point) -> SwarmResult<()> {
        let dim = self.pop.dim();
        let best_val = self.pop.best()?.val;
        if p.len() != dim {
            return Err(SwarmError::PointDimMismatch { expected: dim, found: p.len() });
        }
        if p.val < best_val {
            if let Some(first) = self.pop.particles_mut().first_mut() {
                first.best = p;
            }
        }
        Ok(())
    }

    /// Run one step and return the new global best and evaluation count.
    ///
    /// # Errors
    /// - [`SwarmError::Mesh`] if snapping fails; nothing was evaluated.
    /// - [`SwarmError::Evaluation`] if the evaluator aborts; `neval` holds
    ///   the number of points it finished.
    /// - [`SwarmError::MissingResult`] if no result matches a particle.
    /// - [`SwarmError::EmptyPopulation`] if there are no particles.
    pub fn iterate(
        &mut self, obj: &dyn Objective, mesh: Option<&mut dyn Mesh>,
    ) -> SwarmResult<Step> {
        if self.pop.is_empty() {
            return Err(SwarmError::EmptyPopulation);
        }
        let mut points = self.pop.points();
        if let Some(mesh) = mesh {
            for p in points.iter_mut() {
                *p = nearest_point(p, mesh)?;
            }
        }
        let keys: Vec<PointDigest> = points.iter().map(Point::digest).collect();

        let results = self.evaluator.eval(obj, &points).map_err(|err| {
            debug!("step aborted after {} evaluation(s): {}", err.neval(), err.source);
            SwarmError::Evaluation { neval: err.neval(), source: err.source }
        })?;
        let neval = results.len();

        let by_digest: HashMap<PointDigest, &Point> =
            results.iter().map(|r| (r.digest(), r)).collect();
        let mut matched = Vec::with_capacity(keys.len());
        for (particle, key) in self.pop.iter().zip(&keys) {
            match by_digest.get(key) {
                Some(result) => matched.push(*result),
                None => return Err(SwarmError::MissingResult { id: particle.id }),
            }
        }
        for (particle, result) in self.pop.iter_mut().zip(matched) {
            particle.update(result);
        }

        self.mover.advance(&mut self.pop)?;
        let best = self.pop.best()?.clone();
        debug!("step: {neval} evaluation(s), best value {}", best.val);
        Ok(Step { best, neval })
    }
}

impl<E: Evaluator, M: Mover> Optimizer for SwarmIterator<E, M> {
    fn iterate(
        &mut self, obj: &dyn Objective, mesh: Option<&mut dyn Mesh>,
    ) -> SwarmResult<Step> {
        SwarmIterator::iterate(self, obj, mesh)
    }
}

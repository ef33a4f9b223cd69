//! Pre-drawn relocation proposals and acceptance randomness for one run

use rand::Rng;

use crate::spatial::pattern::Point;
use crate::spatial::window::{UniformSampler, Window};

/// Acceptance draw used when annealing is disabled
///
/// No valid annealing probability exceeds it, so the stochastic acceptance
/// branch can never fire.
pub const DISABLED_ANNEALING_DRAW: f64 = 1.0;

/// Everything random about one annealing run, drawn up front
///
/// Generated in a fixed order (indices, candidates, acceptance draws) from a
/// single generator, so a seed fully determines the run.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbationPlan {
    relocation_indices: Vec<usize>,
    candidates: Vec<Point>,
    annealing_draws: Vec<f64>,
}

/// One iteration's share of a plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    /// Index of the point to move
    pub index: usize,
    /// Replacement location
    pub candidate: Point,
    /// Uniform draw compared against the annealing probability
    pub annealing_draw: f64,
}

impl PerturbationPlan {
    /// Draw the plan for a run of `max_runs` iterations
    ///
    /// Indices are uniform in `0..point_count` with replacement, so one point
    /// can be chosen several times. With `annealing == 0` the acceptance draws
    /// are a constant [`DISABLED_ANNEALING_DRAW`] and consume no randomness.
    pub fn generate<S, R>(
        max_runs: usize,
        point_count: usize,
        annealing: f64,
        window: &Window,
        sampler: &S,
        rng: &mut R,
    ) -> Self
    where
        S: UniformSampler,
        R: Rng + ?Sized,
    {
        let relocation_indices = (0..max_runs)
            .map(|_| rng.random_range(0..point_count.max(1)))
            .collect();

        let candidates = sampler.sample(max_runs, window, rng).into_points();

        // Annealing is validated to lie in [0, 1]
        let annealing_draws = if annealing <= 0.0 {
            vec![DISABLED_ANNEALING_DRAW; max_runs]
        } else {
            (0..max_runs).map(|_| rng.random::<f64>()).collect()
        };

        Self {
            relocation_indices,
            candidates,
            annealing_draws,
        }
    }

    /// Build a plan from explicit sequences, truncated to the shortest
    pub fn from_parts(
        mut relocation_indices: Vec<usize>,
        mut candidates: Vec<Point>,
        mut annealing_draws: Vec<f64>,
    ) -> Self {
        let len = relocation_indices
            .len()
            .min(candidates.len())
            .min(annealing_draws.len());
        relocation_indices.truncate(len);
        candidates.truncate(len);
        annealing_draws.truncate(len);
        Self {
            relocation_indices,
            candidates,
            annealing_draws,
        }
    }

    /// Number of iterations covered
    pub const fn len(&self) -> usize {
        self.relocation_indices.len()
    }

    /// Whether the plan covers no iteration
    pub const fn is_empty(&self) -> bool {
        self.relocation_indices.is_empty()
    }

    /// Proposal for a zero-based iteration step
    pub fn get(&self, step: usize) -> Option<Perturbation> {
        Some(Perturbation {
            index: *self.relocation_indices.get(step)?,
            candidate: *self.candidates.get(step)?,
            annealing_draw: *self.annealing_draws.get(step)?,
        })
    }

    /// Indices of the points to relocate
    pub fn relocation_indices(&self) -> &[usize] {
        &self.relocation_indices
    }

    /// Candidate coordinates
    pub fn candidates(&self) -> &[Point] {
        &self.candidates
    }

    /// Acceptance draws
    pub fn annealing_draws(&self) -> &[f64] {
        &self.annealing_draws
    }
}

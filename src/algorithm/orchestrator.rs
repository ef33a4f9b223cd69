//! Multi-run reconstruction driver
//!
//! Validates the configuration, derives the quantities every run shares
//! (point count, window, distance grid, estimator mode, observed curves) and
//! executes the requested number of independent annealing runs.

use std::time::Instant;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::algorithm::annealing::{AnnealingLoop, EvaluationContext, IterationObserver};
use crate::algorithm::parameters::ReconstructionConfig;
use crate::algorithm::perturbation::PerturbationPlan;
use crate::algorithm::result::{ReconstructionOutput, ReconstructionResult, RunResult};
use crate::analysis::statistics::{
    DistanceGrid, EstimatorMode, SpatialStatistics, SummaryStatisticProvider,
};
use crate::io::error::{Result, invalid_pattern};
use crate::spatial::pattern::PointConfiguration;
use crate::spatial::window::{CompleteSpatialRandomness, UniformSampler, Window};

/// Reconstruction driver parameterised by its statistic provider and sampler
#[derive(Debug, Clone, Default)]
pub struct Reconstruction<P = SpatialStatistics, S = CompleteSpatialRandomness> {
    provider: P,
    sampler: S,
}

/// Quantities derived once and shared read-only by every run
#[derive(Debug, Clone)]
struct SharedInputs {
    point_count: usize,
    window: Window,
    grid: DistanceGrid,
    mode: EstimatorMode,
}

impl<P: SummaryStatisticProvider, S: UniformSampler> Reconstruction<P, S> {
    /// Create a driver from its collaborators
    pub const fn new(provider: P, sampler: S) -> Self {
        Self { provider, sampler }
    }

    /// Statistic provider used for every evaluation
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Reconstruct `observed` according to `config`
    ///
    /// Runs are seeded from `config.seed` before any of them starts, so the
    /// result is the same whether runs execute sequentially or in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or the observed
    /// pattern is empty and no point count is given. No run executes in
    /// either case.
    pub fn run(
        &self,
        observed: &PointConfiguration,
        config: &ReconstructionConfig,
        monitor: Option<&dyn IterationObserver>,
    ) -> Result<ReconstructionResult> {
        let start_time = Instant::now();
        let shared = derive_shared_inputs(observed, config)?;
        let observed_curves = self
            .provider
            .evaluate(observed, &shared.grid, shared.mode);

        info!(
            "Reconstructing {} points over {} run(s) ({:?} estimators, {} distances up to {:.4})",
            shared.point_count,
            config.n_random,
            shared.mode,
            shared.grid.len(),
            shared.grid.r_max()
        );

        let mut master = StdRng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_random).map(|_| master.random()).collect();

        let context = EvaluationContext {
            provider: &self.provider,
            grid: &shared.grid,
            observed: &observed_curves,
            weights: config.weights,
            mode: shared.mode,
        };
        let execute = |(run_index, &seed): (usize, &u64)| {
            self.execute_run(&context, &shared, config, run_index, seed, monitor)
        };

        let runs: Vec<RunResult> = if config.parallel {
            seeds.par_iter().enumerate().map(execute).collect()
        } else {
            seeds.iter().enumerate().map(execute).collect()
        };

        info!(
            "Finished {} run(s) in {:.2?}",
            runs.len(),
            start_time.elapsed()
        );

        let mut result = ReconstructionResult {
            runs,
            observed: Some(observed.clone()),
            grid: shared.grid,
            observed_curves,
            config: config.clone(),
        };
        if !config.return_input {
            result.discard_observed();
        }
        Ok(result)
    }

    /// Reconstruct and apply the configured simplification
    ///
    /// # Errors
    ///
    /// Same conditions as [`Reconstruction::run`]
    pub fn reconstruct(
        &self,
        observed: &PointConfiguration,
        config: &ReconstructionConfig,
        monitor: Option<&dyn IterationObserver>,
    ) -> Result<ReconstructionOutput> {
        self.run(observed, config, monitor)
            .map(ReconstructionOutput::from_result)
    }

    fn execute_run(
        &self,
        context: &EvaluationContext<'_, P>,
        shared: &SharedInputs,
        config: &ReconstructionConfig,
        run_index: usize,
        seed: u64,
        monitor: Option<&dyn IterationObserver>,
    ) -> RunResult {
        let mut rng = StdRng::seed_from_u64(seed);
        let initial = self
            .sampler
            .sample(shared.point_count, &shared.window, &mut rng);
        let plan = PerturbationPlan::generate(
            config.max_runs,
            shared.point_count,
            config.annealing,
            &shared.window,
            &self.sampler,
            &mut rng,
        );

        let mut result = AnnealingLoop::new(context, config.schedule(), plan, run_index, initial)
            .with_observer(monitor)
            .run_to_completion();
        result.diagnostics.seed = Some(seed);

        info!(
            "Run {run_index} stopped ({}) after {} iterations: energy {:.6} -> {:.6}",
            result.stop_reason.as_str(),
            result.iterations,
            result.diagnostics.initial_energy,
            result.diagnostics.final_energy
        );
        debug!(
            "Run {run_index} accepted {} proposals ({} by annealing)",
            result.diagnostics.accepted_moves,
            result.diagnostics.annealing_acceptances
        );
        result
    }
}

/// Convenience entry point with the default statistic provider and sampler
///
/// # Errors
///
/// Same conditions as [`Reconstruction::run`]
pub fn reconstruct_pattern(
    observed: &PointConfiguration,
    config: &ReconstructionConfig,
) -> Result<ReconstructionOutput> {
    Reconstruction::<SpatialStatistics, CompleteSpatialRandomness>::default()
        .reconstruct(observed, config, None)
}

fn derive_shared_inputs(
    observed: &PointConfiguration,
    config: &ReconstructionConfig,
) -> Result<SharedInputs> {
    config.validate()?;

    let point_count = config.n_points.unwrap_or(observed.len());
    if point_count == 0 {
        return Err(invalid_pattern(
            &"observed pattern is empty and no point count was given",
        ));
    }

    let requested = config.window.unwrap_or(*observed.window());
    let window = Window::new(
        requested.x_min,
        requested.x_max,
        requested.y_min,
        requested.y_max,
    )?;

    let outside = observed.count_outside();
    if outside > 0 {
        warn!("{outside} observed point(s) lie outside the observation window");
    }

    let intensity = point_count as f64 / window.area();
    let r_max = config
        .r_max
        .unwrap_or_else(|| DistanceGrid::default_r_max(&window, intensity));
    let grid = DistanceGrid::new(r_max, config.r_length)?;
    let mode = EstimatorMode::select(point_count, config.comp_fast);

    debug!(
        "Window {:.4}x{:.4}, intensity {intensity:.6}, r_max {r_max:.6}, mode {mode:?}",
        window.width(),
        window.height()
    );

    Ok(SharedInputs {
        point_count,
        window,
        grid,
        mode,
    })
}

//! Single-run annealing loop relocating one point per iteration
//!
//! Each iteration moves one point to a pre-drawn candidate location, scores
//! the proposal against the observed curves, and keeps it if the energy
//! drops or the pre-drawn annealing draw falls below the annealing
//! probability. The run ends at the energy threshold, after too many
//! consecutive rejections, or when the iteration cap is reached.

use crate::algorithm::energy::energy;
use crate::algorithm::parameters::{AnnealingSchedule, EnergyWeights};
use crate::algorithm::perturbation::PerturbationPlan;
use crate::algorithm::result::{IterationRecord, RunDiagnostics, RunResult, StopReason};
use crate::analysis::statistics::{
    DistanceGrid, EstimatorMode, SummaryCurvePair, SummaryStatisticProvider,
};
use crate::spatial::pattern::PointConfiguration;

/// Receives the accepted energy after every iteration
///
/// Shared across concurrently executing runs, so implementations synchronise
/// their own state. The loop behaves identically with or without one.
pub trait IterationObserver: Sync {
    /// Called once per iteration with the accepted energy
    fn on_iteration(&self, run_index: usize, iteration: usize, energy: f64);

    /// Called once when a run stops
    fn on_run_complete(&self, _result: &RunResult) {}
}

/// Read-only inputs shared by every run of a reconstruction
pub struct EvaluationContext<'a, P: SummaryStatisticProvider + ?Sized> {
    /// Statistic provider
    pub provider: &'a P,
    /// Shared distance grid
    pub grid: &'a DistanceGrid,
    /// Curves of the observed pattern
    pub observed: &'a SummaryCurvePair,
    /// Energy term weights
    pub weights: EnergyWeights,
    /// Estimator family
    pub mode: EstimatorMode,
}

impl<P: SummaryStatisticProvider + ?Sized> EvaluationContext<'_, P> {
    /// Energy of a configuration against the observed curves
    pub fn energy_of(&self, configuration: &PointConfiguration) -> f64 {
        let curves = self.provider.evaluate(configuration, self.grid, self.mode);
        energy(self.observed, &curves, self.weights)
    }
}

/// State machine for one reconstruction run
pub struct AnnealingLoop<'a, P: SummaryStatisticProvider + ?Sized> {
    context: &'a EvaluationContext<'a, P>,
    schedule: AnnealingSchedule,
    plan: PerturbationPlan,
    observer: Option<&'a dyn IterationObserver>,
    run_index: usize,
    current: PointConfiguration,
    current_energy: f64,
    initial_energy: f64,
    stagnation: usize,
    iteration: usize,
    history: Vec<IterationRecord>,
    accepted_moves: usize,
    annealing_acceptances: usize,
    stop_reason: Option<StopReason>,
}

impl<'a, P: SummaryStatisticProvider + ?Sized> AnnealingLoop<'a, P> {
    /// Start a run from `initial`, scoring it once before any relocation
    pub fn new(
        context: &'a EvaluationContext<'a, P>,
        schedule: AnnealingSchedule,
        plan: PerturbationPlan,
        run_index: usize,
        initial: PointConfiguration,
    ) -> Self {
        let initial_energy = context.energy_of(&initial);
        let capacity = schedule.max_runs.min(plan.len());

        Self {
            context,
            schedule,
            plan,
            observer: None,
            run_index,
            current: initial,
            current_energy: initial_energy,
            initial_energy,
            stagnation: 0,
            iteration: 0,
            history: Vec::with_capacity(capacity),
            accepted_moves: 0,
            annealing_acceptances: 0,
            stop_reason: None,
        }
    }

    /// Attach an observer notified after every iteration
    #[must_use]
    pub const fn with_observer(mut self, observer: Option<&'a dyn IterationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Energy of the accepted configuration
    pub const fn current_energy(&self) -> f64 {
        self.current_energy
    }

    /// Accepted configuration
    pub const fn current(&self) -> &PointConfiguration {
        &self.current
    }

    /// Iterations executed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Consecutive rejections since the last acceptance
    pub const fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Accepted energies recorded so far
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Stop reason, once the run has stopped
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Execute one iteration
    ///
    /// Returns the stop reason once the run has ended; further calls do
    /// nothing and keep returning it.
    pub fn execute_iteration(&mut self) -> Option<StopReason> {
        if self.stop_reason.is_some() {
            return self.stop_reason;
        }
        let cap = self.schedule.max_runs.min(self.plan.len());
        let Some(perturbation) = self.plan.get(self.iteration).filter(|_| self.iteration < cap)
        else {
            self.stop_reason = Some(StopReason::IterationCap);
            return self.stop_reason;
        };
        self.iteration += 1;

        let proposal = self
            .current
            .with_relocated(perturbation.index, perturbation.candidate);
        let proposed_energy = self.context.energy_of(&proposal);

        let improves = proposed_energy < self.current_energy;
        let accepted = improves || perturbation.annealing_draw < self.schedule.annealing;

        if accepted {
            self.accepted_moves += 1;
            if !improves {
                self.annealing_acceptances += 1;
            }
            self.current = proposal;
            self.current_energy = proposed_energy;
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        self.history.push(IterationRecord {
            iteration: self.iteration,
            energy: self.current_energy,
            accepted,
        });
        if let Some(observer) = self.observer {
            observer.on_iteration(self.run_index, self.iteration, self.current_energy);
        }

        let stagnated = self
            .schedule
            .no_change
            .is_some_and(|limit| self.stagnation > limit);
        if self.current_energy <= self.schedule.e_threshold || stagnated {
            self.stop_reason = Some(StopReason::ThresholdOrStagnation);
        } else if self.iteration >= cap {
            self.stop_reason = Some(StopReason::IterationCap);
        }
        self.stop_reason
    }

    /// Iterate until a stopping rule fires and return the result
    pub fn run_to_completion(mut self) -> RunResult {
        loop {
            if self.execute_iteration().is_some() {
                break;
            }
        }
        let observer = self.observer;
        let result = self.finish();
        if let Some(observer) = observer {
            observer.on_run_complete(&result);
        }
        result
    }

    /// Package the current state as a result
    ///
    /// A run finished before any stopping rule fired reports the iteration
    /// cap.
    pub fn finish(self) -> RunResult {
        RunResult {
            run_index: self.run_index,
            configuration: self.current,
            history: self.history,
            iterations: self.iteration,
            stop_reason: self.stop_reason.unwrap_or(StopReason::IterationCap),
            diagnostics: RunDiagnostics {
                initial_energy: self.initial_energy,
                final_energy: self.current_energy,
                accepted_moves: self.accepted_moves,
                annealing_acceptances: self.annealing_acceptances,
                mode: self.context.mode,
                seed: None,
            },
        }
    }
}

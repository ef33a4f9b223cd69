//! Per-run and aggregate reconstruction results

use serde::{Deserialize, Serialize};

use crate::algorithm::parameters::ReconstructionConfig;
use crate::analysis::statistics::{DistanceGrid, EstimatorMode, SummaryCurvePair};
use crate::spatial::pattern::PointConfiguration;

/// Accepted energy after one iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// One-based iteration number
    pub iteration: usize,
    /// Energy of the accepted configuration after this iteration
    pub energy: f64,
    /// Whether this iteration's proposal was accepted
    pub accepted: bool,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Every planned iteration was executed
    IterationCap,
    /// Energy reached the threshold or the stagnation limit was exceeded
    ThresholdOrStagnation,
}

impl StopReason {
    /// Short label used in logs and reports
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IterationCap => "iteration-cap",
            Self::ThresholdOrStagnation => "threshold-or-stagnation",
        }
    }
}

/// Summary numbers describing how a run went
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Energy of the initial uniform configuration
    pub initial_energy: f64,
    /// Energy of the final configuration
    pub final_energy: f64,
    /// Proposals accepted
    pub accepted_moves: usize,
    /// Accepted proposals that did not strictly lower the energy
    pub annealing_acceptances: usize,
    /// Estimator family used for every evaluation
    pub mode: EstimatorMode,
    /// Seed of the run's generator, when known
    pub seed: Option<u64>,
}

/// Outcome of one annealing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Position of the run within its reconstruction
    pub run_index: usize,
    /// Final accepted configuration
    pub configuration: PointConfiguration,
    /// One record per executed iteration
    pub history: Vec<IterationRecord>,
    /// Number of executed iterations
    pub iterations: usize,
    /// Why the run stopped
    pub stop_reason: StopReason,
    /// Energies and acceptance counts
    pub diagnostics: RunDiagnostics,
}

impl RunResult {
    /// Energy of the final configuration
    pub const fn final_energy(&self) -> f64 {
        self.diagnostics.final_energy
    }
}

/// All runs of one reconstruction plus the shared inputs they were compared to
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionResult {
    /// Runs ordered by run index
    pub runs: Vec<RunResult>,
    /// Observed pattern, `None` when discarded
    pub observed: Option<PointConfiguration>,
    /// Shared distance grid
    pub grid: DistanceGrid,
    /// Observed summary curves
    pub observed_curves: SummaryCurvePair,
    /// Validated configuration the runs used
    pub config: ReconstructionConfig,
}

impl ReconstructionResult {
    /// Drop the observed pattern from the result
    pub fn discard_observed(&mut self) {
        self.observed = None;
    }

    /// Run with the lowest final energy (first one on ties)
    pub fn best_run(&self) -> Option<&RunResult> {
        self.runs
            .iter()
            .min_by(|a, b| a.final_energy().total_cmp(&b.final_energy()))
    }
}

/// Result as handed to callers after presentation policies are applied
#[derive(Debug, Clone, PartialEq)]
pub enum ReconstructionOutput {
    /// The only run, unwrapped
    Single(Box<RunResult>),
    /// Every run with shared inputs
    Full(Box<ReconstructionResult>),
}

impl ReconstructionOutput {
    /// Unwrap a lone run when `simplify` was requested
    pub fn from_result(mut result: ReconstructionResult) -> Self {
        if result.config.simplify && result.runs.len() == 1 {
            if let Some(run) = result.runs.pop() {
                return Self::Single(Box::new(run));
            }
        }
        Self::Full(Box::new(result))
    }
}

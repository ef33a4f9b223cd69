//! JSON summary of a reconstruction for downstream analysis

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::algorithm::parameters::ReconstructionConfig;
use crate::algorithm::result::{ReconstructionResult, RunDiagnostics, RunResult, StopReason};
use crate::io::error::{ReconstructionError, Result};

/// Per-run section of the report
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Position of the run
    pub run_index: usize,
    /// Why the run stopped
    pub stop_reason: StopReason,
    /// Executed iterations
    pub iterations: usize,
    /// Energies and acceptance counts
    pub diagnostics: RunDiagnostics,
    /// Accepted energy after each iteration
    pub energy_history: Vec<f64>,
}

impl From<&RunResult> for RunReport {
    fn from(run: &RunResult) -> Self {
        Self {
            run_index: run.run_index,
            stop_reason: run.stop_reason,
            iterations: run.iterations,
            diagnostics: run.diagnostics,
            energy_history: run.history.iter().map(|record| record.energy).collect(),
        }
    }
}

/// Serializable summary of a whole reconstruction
///
/// Undefined curve values serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructionReport {
    /// Options the reconstruction ran with
    pub config: ReconstructionConfig,
    /// Shared distance grid
    pub distances: Vec<f64>,
    /// Observed G(r)
    pub observed_nearest_neighbor: Vec<f64>,
    /// Observed g(r)
    pub observed_pair_correlation: Vec<f64>,
    /// Whether the observed pattern was kept in the result
    pub observed_retained: bool,
    /// Index of the run with the lowest final energy
    pub best_run: Option<usize>,
    /// One entry per run
    pub runs: Vec<RunReport>,
}

impl ReconstructionReport {
    /// Summarise a reconstruction result
    pub fn from_result(result: &ReconstructionResult) -> Self {
        Self {
            config: result.config.clone(),
            distances: result.grid.distances().to_vec(),
            observed_nearest_neighbor: result.observed_curves.nearest_neighbor.to_vec(),
            observed_pair_correlation: result.observed_curves.pair_correlation.to_vec(),
            observed_retained: result.observed.is_some(),
            best_run: result.best_run().map(|run| run.run_index),
            runs: result.runs.iter().map(RunReport::from).collect(),
        }
    }

    /// Render the report as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|error| ReconstructionError::Export {
            path: "<memory>".into(),
            reason: error.to_string(),
        })
    }

    /// Write the report to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ReconstructionError::FileSystem {
            path: path.to_path_buf(),
            operation: "write report",
            source,
        })
    }
}

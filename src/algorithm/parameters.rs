//! Reconstruction parameters and their validation

use serde::{Deserialize, Serialize};

use crate::io::configuration::{
    DEFAULT_ANNEALING, DEFAULT_COMP_FAST, DEFAULT_E_THRESHOLD, DEFAULT_MAX_RUNS, DEFAULT_N_RANDOM,
    DEFAULT_R_LENGTH, DEFAULT_SEED, DEFAULT_WEIGHTS, WEIGHT_SUM_TOLERANCE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::window::Window;

/// Weights of the nearest-neighbour and pair-correlation energy terms
///
/// Both weights are non-negative and sum to a value in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyWeights {
    nearest_neighbor: f64,
    pair_correlation: f64,
}

impl EnergyWeights {
    /// Validate and create a weight pair
    ///
    /// # Errors
    ///
    /// Returns an error if either weight is negative or not finite, or the
    /// sum is zero or exceeds one
    pub fn new(nearest_neighbor: f64, pair_correlation: f64) -> Result<Self> {
        let value = format!("({nearest_neighbor}, {pair_correlation})");
        let valid_component = |w: f64| w.is_finite() && w >= 0.0;
        if !valid_component(nearest_neighbor) || !valid_component(pair_correlation) {
            return Err(invalid_parameter(
                "weights",
                &value,
                &"weights must be finite and non-negative",
            ));
        }
        let sum = nearest_neighbor + pair_correlation;
        if sum <= 0.0 || sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(invalid_parameter(
                "weights",
                &value,
                &"weights must sum to more than 0 and at most 1",
            ));
        }
        Ok(Self {
            nearest_neighbor,
            pair_correlation,
        })
    }

    /// Weight of the nearest-neighbour term
    pub const fn nearest_neighbor(&self) -> f64 {
        self.nearest_neighbor
    }

    /// Weight of the pair-correlation term
    pub const fn pair_correlation(&self) -> f64 {
        self.pair_correlation
    }
}

impl Default for EnergyWeights {
    fn default() -> Self {
        Self {
            nearest_neighbor: DEFAULT_WEIGHTS.0,
            pair_correlation: DEFAULT_WEIGHTS.1,
        }
    }
}

/// Stopping and acceptance rules of one annealing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingSchedule {
    /// Iteration cap
    pub max_runs: usize,
    /// Stop once the accepted energy is at or below this value
    pub e_threshold: f64,
    /// Stop once this many consecutive rejections are exceeded (`None` disables)
    pub no_change: Option<usize>,
    /// Probability of accepting a proposal that does not lower the energy
    pub annealing: f64,
}

/// Full set of reconstruction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    /// Points per reconstructed pattern (observed count when `None`)
    pub n_points: Option<usize>,
    /// Reconstruction window (observed window when `None`)
    pub window: Option<Window>,
    /// Number of independent runs
    pub n_random: usize,
    /// Iteration cap per run
    pub max_runs: usize,
    /// Energy threshold for early stopping
    pub e_threshold: f64,
    /// Stagnation limit (`None` means unlimited)
    pub no_change: Option<usize>,
    /// Probability of accepting a non-improving proposal
    pub annealing: f64,
    /// Energy term weights
    pub weights: EnergyWeights,
    /// Number of distances in the grid
    pub r_length: usize,
    /// Largest distance in the grid (Ripley's rule when `None`)
    pub r_max: Option<f64>,
    /// Point count above which fast estimators are used
    pub comp_fast: usize,
    /// Keep the observed pattern in the result
    pub return_input: bool,
    /// Return a lone run unwrapped
    pub simplify: bool,
    /// Execute runs on the rayon thread pool
    pub parallel: bool,
    /// Master seed from which all run seeds are derived
    pub seed: u64,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            n_points: None,
            window: None,
            n_random: DEFAULT_N_RANDOM,
            max_runs: DEFAULT_MAX_RUNS,
            e_threshold: DEFAULT_E_THRESHOLD,
            no_change: None,
            annealing: DEFAULT_ANNEALING,
            weights: EnergyWeights::default(),
            r_length: DEFAULT_R_LENGTH,
            r_max: None,
            comp_fast: DEFAULT_COMP_FAST,
            return_input: true,
            simplify: false,
            parallel: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl ReconstructionConfig {
    /// Check every option that does not depend on the observed pattern
    ///
    /// Weights are validated on construction of [`EnergyWeights`] and
    /// re-checked here since the fields are deserializable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found
    pub fn validate(&self) -> Result<()> {
        if self.n_random < 1 {
            return Err(invalid_parameter(
                "n_random",
                &self.n_random,
                &"at least one run is required",
            ));
        }
        if self.max_runs < 1 {
            return Err(invalid_parameter(
                "max_runs",
                &self.max_runs,
                &"at least one iteration is required",
            ));
        }
        if self.n_points == Some(0) {
            return Err(invalid_parameter(
                "n_points",
                &0,
                &"point count must be positive",
            ));
        }
        if self.e_threshold.is_nan() {
            return Err(invalid_parameter(
                "e_threshold",
                &self.e_threshold,
                &"threshold must be a number",
            ));
        }
        if !(0.0..=1.0).contains(&self.annealing) {
            return Err(invalid_parameter(
                "annealing",
                &self.annealing,
                &"annealing probability must lie in [0, 1]",
            ));
        }
        if self.r_length < 2 {
            return Err(invalid_parameter(
                "r_length",
                &self.r_length,
                &"distance grid needs at least 2 points",
            ));
        }
        if let Some(r_max) = self.r_max {
            if !r_max.is_finite() || r_max <= 0.0 {
                return Err(invalid_parameter(
                    "r_max",
                    &r_max,
                    &"must be a positive finite distance",
                ));
            }
        }
        EnergyWeights::new(
            self.weights.nearest_neighbor(),
            self.weights.pair_correlation(),
        )?;
        Ok(())
    }

    /// Per-run stopping and acceptance rules
    pub const fn schedule(&self) -> AnnealingSchedule {
        AnnealingSchedule {
            max_runs: self.max_runs,
            e_threshold: self.e_threshold,
            no_change: self.no_change,
            annealing: self.annealing,
        }
    }
}

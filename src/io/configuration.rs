//! Reconstruction constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible reconstruction
pub const DEFAULT_SEED: u64 = 42;

/// Number of independent reconstruction runs
pub const DEFAULT_N_RANDOM: usize = 1;

/// Maximum annealing iterations per run
pub const DEFAULT_MAX_RUNS: usize = 1000;

/// Energy at or below which a run stops early
pub const DEFAULT_E_THRESHOLD: f64 = 0.01;

/// Probability of accepting a proposal that does not lower the energy
pub const DEFAULT_ANNEALING: f64 = 0.01;

/// Weights of the nearest-neighbour and pair-correlation energy terms
pub const DEFAULT_WEIGHTS: (f64, f64) = (0.5, 0.5);

/// Number of distances in the shared distance grid
pub const DEFAULT_R_LENGTH: usize = 250;

/// Point count above which the fast statistic estimators are used
pub const DEFAULT_COMP_FAST: usize = 1000;

// Summary statistic estimation
/// Stoyan's rule coefficient for the pair-correlation kernel half-width
pub const PCF_BANDWIDTH_COEFFICIENT: f64 = 0.15;

/// Expected neighbour count that bounds the default maximum distance
pub const RMAX_NEIGHBOUR_BUDGET: f64 = 1000.0;

// Tolerance for accumulated rounding in user-supplied weights
/// Slack allowed above 1 for the weight sum
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-12;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to per-run pattern files
pub const RUN_SUFFIX: &str = "_run";
/// Suffix added to the JSON report
pub const REPORT_SUFFIX: &str = "_report";

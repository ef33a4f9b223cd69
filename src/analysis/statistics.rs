//! Summary statistic curves and the provider interface used by the energy

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::analysis::nearest_neighbor::g_function;
use crate::analysis::pair_correlation::pair_correlation;
use crate::io::configuration::{PCF_BANDWIDTH_COEFFICIENT, RMAX_NEIGHBOUR_BUDGET};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::pattern::PointConfiguration;
use crate::spatial::window::Window;

/// Evenly spaced distances from 0 to a maximum radius
///
/// Computed once per reconstruction and shared read-only by every run.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGrid {
    distances: Array1<f64>,
}

impl DistanceGrid {
    /// Create a grid of `length` distances spanning `[0, r_max]`
    ///
    /// # Errors
    ///
    /// Returns an error if `r_max` is not a positive finite number or
    /// `length` is below 2
    pub fn new(r_max: f64, length: usize) -> Result<Self> {
        if !r_max.is_finite() || r_max <= 0.0 {
            return Err(invalid_parameter(
                "r_max",
                &r_max,
                &"must be a positive finite distance",
            ));
        }
        if length < 2 {
            return Err(invalid_parameter(
                "r_length",
                &length,
                &"distance grid needs at least 2 points",
            ));
        }
        Ok(Self {
            distances: Array1::linspace(0.0, r_max, length),
        })
    }

    /// Default maximum distance for a window and intensity
    ///
    /// Ripley's rule: a quarter of the shorter side, further capped so that a
    /// disc of that radius holds at most `RMAX_NEIGHBOUR_BUDGET` expected
    /// points.
    pub fn default_r_max(window: &Window, intensity: f64) -> f64 {
        let side_limit = window.short_side() / 4.0;
        if intensity > 0.0 && intensity.is_finite() {
            side_limit.min((RMAX_NEIGHBOUR_BUDGET / (std::f64::consts::PI * intensity)).sqrt())
        } else {
            side_limit
        }
    }

    /// Distances in increasing order
    pub const fn distances(&self) -> &Array1<f64> {
        &self.distances
    }

    /// Number of distances
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether the grid holds no distances
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Largest distance
    pub fn r_max(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Spacing between consecutive distances
    pub fn step(&self) -> f64 {
        self.r_max() / (self.len().saturating_sub(1).max(1)) as f64
    }
}

/// Which estimator family to request from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimatorMode {
    /// Edge-corrected estimators
    Exact,
    /// Uncorrected estimators on a cell index, for large point counts
    Fast,
}

impl EstimatorMode {
    /// Fast mode when the point count exceeds the threshold, exact otherwise
    pub const fn select(point_count: usize, comp_fast: usize) -> Self {
        if point_count > comp_fast {
            Self::Fast
        } else {
            Self::Exact
        }
    }
}

/// Nearest-neighbour distribution and pair correlation on a shared grid
///
/// NaN marks a distance where the estimator has no information.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCurvePair {
    /// Nearest-neighbour distance distribution function G(r)
    pub nearest_neighbor: Array1<f64>,
    /// Pair correlation function g(r)
    pub pair_correlation: Array1<f64>,
}

/// Computes summary statistic curves for a configuration
///
/// Implementations must be deterministic for identical inputs, since the
/// observed curves are computed once and compared against every proposal.
pub trait SummaryStatisticProvider: Sync {
    /// Evaluate both curves for `configuration` on `grid`
    fn evaluate(
        &self,
        configuration: &PointConfiguration,
        grid: &DistanceGrid,
        mode: EstimatorMode,
    ) -> SummaryCurvePair;
}

/// Default provider: Hanisch G(r) and kernel-smoothed g(r)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialStatistics {
    /// Stoyan's rule coefficient for the pair-correlation kernel
    pub bandwidth_coefficient: f64,
}

impl Default for SpatialStatistics {
    fn default() -> Self {
        Self {
            bandwidth_coefficient: PCF_BANDWIDTH_COEFFICIENT,
        }
    }
}

impl SummaryStatisticProvider for SpatialStatistics {
    fn evaluate(
        &self,
        configuration: &PointConfiguration,
        grid: &DistanceGrid,
        mode: EstimatorMode,
    ) -> SummaryCurvePair {
        SummaryCurvePair {
            nearest_neighbor: g_function(configuration, grid, mode),
            pair_correlation: pair_correlation(
                configuration,
                grid,
                mode,
                self.bandwidth_coefficient,
            ),
        }
    }
}

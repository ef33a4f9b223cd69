//! Summary statistics used to compare point patterns

/// Nearest-neighbour distance distribution G(r)
pub mod nearest_neighbor;
/// Pair correlation function g(r)
pub mod pair_correlation;
/// Distance grid, estimator selection and the statistic provider seam
pub mod statistics;

//! Nearest-neighbour distance distribution function G(r)

use ndarray::Array1;

use crate::analysis::statistics::{DistanceGrid, EstimatorMode};
use crate::spatial::index::CellIndex;
use crate::spatial::pattern::PointConfiguration;

/// Distance from each point to its nearest neighbour
///
/// Exact mode compares all pairs; fast mode searches a cell index. Both give
/// the same distances for points inside the window.
pub fn nearest_neighbor_distances(
    configuration: &PointConfiguration,
    mode: EstimatorMode,
) -> Vec<f64> {
    let points = configuration.points();
    match mode {
        EstimatorMode::Exact => points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &q)| p.distance(q))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect(),
        EstimatorMode::Fast => {
            let cell_size = CellIndex::default_cell_size(configuration.window(), points.len());
            let index = CellIndex::build(points, configuration.window(), cell_size);
            (0..points.len())
                .map(|i| index.nearest_neighbor_distance(points, i))
                .collect()
        }
    }
}

/// Estimate G(r) on the distance grid
///
/// Exact mode uses the Hanisch edge correction, fast mode the raw empirical
/// distribution. Fewer than two points gives an all-NaN curve.
pub fn g_function(
    configuration: &PointConfiguration,
    grid: &DistanceGrid,
    mode: EstimatorMode,
) -> Array1<f64> {
    if configuration.len() < 2 {
        return Array1::from_elem(grid.len(), f64::NAN);
    }
    let distances = nearest_neighbor_distances(configuration, mode);

    let weighted: Vec<(f64, f64)> = match mode {
        EstimatorMode::Exact => {
            let window = configuration.window();
            configuration
                .points()
                .iter()
                .zip(&distances)
                .filter_map(|(&p, &d)| {
                    // Censored: the true neighbour may lie outside the window
                    if d > window.boundary_distance(p) {
                        return None;
                    }
                    let eroded = window.eroded_area(d);
                    (eroded > 0.0).then_some((d, eroded.recip()))
                })
                .collect()
        }
        EstimatorMode::Fast => distances.iter().map(|&d| (d, 1.0)).collect(),
    };

    cumulative_fraction(weighted, grid)
}

/// Weighted fraction of distances at or below each grid value
fn cumulative_fraction(mut weighted: Vec<(f64, f64)>, grid: &DistanceGrid) -> Array1<f64> {
    // Sum in sorted order so the running total ends exactly at `total`
    weighted.sort_by(|a, b| a.0.total_cmp(&b.0));
    let total: f64 = weighted.iter().map(|&(_, w)| w).sum();
    if weighted.is_empty() || total <= 0.0 {
        return Array1::from_elem(grid.len(), f64::NAN);
    }

    let mut curve = Array1::zeros(grid.len());
    let mut cursor = 0;
    let mut accumulated = 0.0;
    for (value, &r) in curve.iter_mut().zip(grid.distances()) {
        while let Some(&(d, w)) = weighted.get(cursor) {
            if d > r {
                break;
            }
            accumulated += w;
            cursor += 1;
        }
        *value = (accumulated / total).min(1.0);
    }
    curve
}

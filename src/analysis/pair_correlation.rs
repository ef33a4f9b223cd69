//! Kernel estimate of the pair correlation function g(r)

use ndarray::Array1;

use crate::analysis::statistics::{DistanceGrid, EstimatorMode};
use crate::math::kernel::Epanechnikov;
use crate::spatial::index::CellIndex;
use crate::spatial::pattern::PointConfiguration;

/// Interpoint distance with its edge-correction weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPair {
    /// Distance between the two points
    pub distance: f64,
    /// Edge-correction weight applied to the pair
    pub weight: f64,
}

/// Unordered point pairs closer than `reach`
///
/// Exact mode scans all pairs and applies the translation correction
/// `|W| / |W ∩ (W + x_j - x_i)|`. Fast mode gathers pairs from a cell index
/// and leaves them unweighted.
pub fn close_pairs(
    configuration: &PointConfiguration,
    reach: f64,
    mode: EstimatorMode,
) -> Vec<WeightedPair> {
    let points = configuration.points();
    let window = configuration.window();
    let mut pairs = Vec::new();

    match mode {
        EstimatorMode::Exact => {
            let area = window.area();
            for (i, &p) in points.iter().enumerate() {
                for &q in points.iter().skip(i + 1) {
                    let distance = p.distance(q);
                    if distance >= reach {
                        continue;
                    }
                    let overlap = window.translated_overlap(q.x - p.x, q.y - p.y);
                    if overlap > 0.0 {
                        pairs.push(WeightedPair {
                            distance,
                            weight: area / overlap,
                        });
                    }
                }
            }
        }
        EstimatorMode::Fast => {
            let cell_size = CellIndex::default_cell_size(window, points.len()).max(reach);
            let index = CellIndex::build(points, window, cell_size);
            index.for_each_pair_within(points, reach, |_, _, distance| {
                pairs.push(WeightedPair {
                    distance,
                    weight: 1.0,
                });
            });
        }
    }
    pairs
}

/// Estimate g(r) on the distance grid
///
/// Uses an Epanechnikov kernel whose half-width follows Stoyan's rule
/// `bandwidth_coefficient / sqrt(intensity)`. The value at `r = 0` is NaN, as
/// is the whole curve for fewer than two points.
pub fn pair_correlation(
    configuration: &PointConfiguration,
    grid: &DistanceGrid,
    mode: EstimatorMode,
    bandwidth_coefficient: f64,
) -> Array1<f64> {
    let n = configuration.len();
    if n < 2 {
        return Array1::from_elem(grid.len(), f64::NAN);
    }

    let area = configuration.window().area();
    let kernel = Epanechnikov::stoyan(bandwidth_coefficient, configuration.intensity());
    let h = kernel.half_width();
    let step = grid.step();
    let last = grid.len() - 1;

    let mut sums = Array1::<f64>::zeros(grid.len());
    for pair in close_pairs(configuration, grid.r_max() + h, mode) {
        // Only grid distances inside the kernel support receive a contribution
        let lo = ((pair.distance - h) / step).ceil().max(0.0) as usize;
        let hi = (((pair.distance + h) / step).floor().max(0.0) as usize).min(last);
        for k in lo..=hi {
            if let (Some(sum), Some(&r)) = (sums.get_mut(k), grid.distances().get(k)) {
                // Each unordered pair stands for two ordered pairs
                *sum += 2.0 * kernel.density(r - pair.distance) * pair.weight;
            }
        }
    }

    let scale = area / (n as f64 * (n - 1) as f64);
    let mut curve = Array1::<f64>::zeros(grid.len());
    for ((value, &sum), &r) in curve.iter_mut().zip(&sums).zip(grid.distances()) {
        *value = if r > 0.0 {
            scale * sum / (2.0 * std::f64::consts::PI * r)
        } else {
            f64::NAN
        };
    }
    curve
}

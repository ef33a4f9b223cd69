//! Energy between two summary curve pairs

use ndarray::Array1;

use crate::algorithm::parameters::EnergyWeights;
use crate::analysis::statistics::SummaryCurvePair;

/// Mean absolute pointwise difference over entries defined on both curves
///
/// Returns `None` when no grid point has a finite value on both sides.
pub fn mean_absolute_difference(a: &Array1<f64>, b: &Array1<f64>) -> Option<f64> {
    let (sum, count) = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .fold((0.0, 0usize), |(sum, count), (x, y)| {
            (sum + (x - y).abs(), count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

/// Weighted energy between observed and candidate curves
///
/// A statistic with no comparable grid point contributes zero, so the energy
/// is always finite and non-negative.
pub fn energy(
    observed: &SummaryCurvePair,
    candidate: &SummaryCurvePair,
    weights: EnergyWeights,
) -> f64 {
    let nearest_neighbor =
        mean_absolute_difference(&observed.nearest_neighbor, &candidate.nearest_neighbor)
            .unwrap_or(0.0);
    let pair_correlation =
        mean_absolute_difference(&observed.pair_correlation, &candidate.pair_correlation)
            .unwrap_or(0.0);

    weights.nearest_neighbor().mul_add(
        nearest_neighbor,
        weights.pair_correlation() * pair_correlation,
    )
}

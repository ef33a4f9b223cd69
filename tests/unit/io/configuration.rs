//! Tests for reconstruction defaults and tuning constants

#[cfg(test)]
mod tests {
    use patternrecon::algorithm::parameters::EnergyWeights;
    use patternrecon::io::configuration::{
        DEFAULT_ANNEALING, DEFAULT_COMP_FAST, DEFAULT_E_THRESHOLD, DEFAULT_MAX_RUNS,
        DEFAULT_N_RANDOM, DEFAULT_R_LENGTH, DEFAULT_SEED, DEFAULT_WEIGHTS,
        MAX_INDIVIDUAL_PROGRESS_BARS, PCF_BANDWIDTH_COEFFICIENT, REPORT_SUFFIX,
        RMAX_NEIGHBOUR_BUDGET, RUN_SUFFIX, WEIGHT_SUM_TOLERANCE,
    };

    // Tests run count and iteration defaults
    // Verified by changing constant values
    #[test]
    fn test_run_defaults() {
        assert_eq!(DEFAULT_SEED, 42);
        assert_eq!(DEFAULT_N_RANDOM, 1);
        assert_eq!(DEFAULT_MAX_RUNS, 1000);
        assert_eq!(DEFAULT_R_LENGTH, 250);
        assert_eq!(DEFAULT_COMP_FAST, 1000);
    }

    // Tests stopping and acceptance defaults lie in their valid ranges
    // Verified by setting the annealing probability above one
    #[test]
    fn test_acceptance_defaults() {
        assert!((DEFAULT_E_THRESHOLD - 0.01).abs() < f64::EPSILON);
        assert!((DEFAULT_ANNEALING - 0.01).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&DEFAULT_ANNEALING));
    }

    // Tests the default weights form a valid pair
    // Verified by making the weights sum above one
    #[test]
    fn test_default_weights_valid() {
        let (nearest_neighbor, pair_correlation) = DEFAULT_WEIGHTS;

        assert!(EnergyWeights::new(nearest_neighbor, pair_correlation).is_ok());
        assert!((nearest_neighbor + pair_correlation - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    // Tests estimator constants
    // Verified by changing the bandwidth coefficient
    #[test]
    fn test_estimator_constants() {
        assert!((PCF_BANDWIDTH_COEFFICIENT - 0.15).abs() < f64::EPSILON);
        assert!((RMAX_NEIGHBOUR_BUDGET - 1000.0).abs() < f64::EPSILON);
        assert!(WEIGHT_SUM_TOLERANCE > 0.0 && WEIGHT_SUM_TOLERANCE < 1e-6);
    }

    // Tests output naming and display constants
    // Verified by changing suffix strings
    #[test]
    fn test_output_constants() {
        assert_eq!(RUN_SUFFIX, "_run");
        assert_eq!(REPORT_SUFFIX, "_report");
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }
}

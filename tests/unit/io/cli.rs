//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use patternrecon::ReconstructionError;
    use patternrecon::io::cli::{Cli, FileProcessor};
    use patternrecon::io::configuration::{DEFAULT_MAX_RUNS, DEFAULT_N_RANDOM, DEFAULT_SEED};
    use patternrecon::io::pattern_file::{read_pattern, write_pattern};
    use patternrecon::spatial::window::{CompleteSpatialRandomness, UniformSampler, Window};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_observed(path: &Path, count: usize) {
        let mut rng = StdRng::seed_from_u64(1);
        let pattern = CompleteSpatialRandomness.sample(count, &Window::unit(), &mut rng);
        write_pattern(path, &pattern).expect("write observed pattern");
    }

    fn quick_args<'a>(target: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
        let mut args = vec![
            "patternrecon",
            target,
            "--quiet",
            "--max-runs",
            "10",
            "--r-length",
            "10",
            "--window",
            "0",
            "1",
            "0",
            "1",
        ];
        args.extend_from_slice(extra);
        args
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["patternrecon", "points.csv"]);

        assert_eq!(cli.target, PathBuf::from("points.csv"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.n_random, DEFAULT_N_RANDOM);
        assert_eq!(cli.max_runs, DEFAULT_MAX_RUNS);
        assert_eq!(cli.no_change, None);
        assert!(cli.window.is_none());
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with every option set
    // Verified by swapping the weight flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "patternrecon",
            "points.csv",
            "--seed",
            "7",
            "--n-random",
            "3",
            "--max-runs",
            "500",
            "--e-threshold",
            "-1",
            "--no-change",
            "25",
            "--annealing",
            "0",
            "--weight-nnd",
            "0.3",
            "--weight-pcf",
            "0.6",
            "--n-points",
            "80",
            "--window",
            "-1",
            "1",
            "-2",
            "2",
            "--r-length",
            "100",
            "--r-max",
            "0.4",
            "--comp-fast",
            "50",
            "--parallel",
            "--discard-input",
            "--quiet",
            "--no-skip",
            "--output",
            "out",
        ]);

        let config = cli.reconstruction_config().expect("valid options");

        assert_eq!(config.seed, 7);
        assert_eq!(config.n_random, 3);
        assert_eq!(config.max_runs, 500);
        assert!((config.e_threshold + 1.0).abs() < f64::EPSILON);
        assert_eq!(config.no_change, Some(25));
        assert!(config.annealing.abs() < f64::EPSILON);
        assert!((config.weights.nearest_neighbor() - 0.3).abs() < f64::EPSILON);
        assert!((config.weights.pair_correlation() - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.n_points, Some(80));
        assert_eq!(
            config.window,
            Some(Window::new(-1.0, 1.0, -2.0, 2.0).expect("valid window"))
        );
        assert_eq!(config.r_length, 100);
        assert!(config.r_max.is_some_and(|r| (r - 0.4).abs() < f64::EPSILON));
        assert_eq!(config.comp_fast, 50);
        assert!(config.parallel);
        assert!(!config.return_input);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert_eq!(cli.output, Some(PathBuf::from("out")));
    }

    // Tests invalid option combinations are reported before any work
    // Verified by deferring validation to the reconstruction
    #[test]
    fn test_invalid_options() {
        let heavy = Cli::parse_from([
            "patternrecon",
            "p.csv",
            "--weight-nnd",
            "0.9",
            "--weight-pcf",
            "0.9",
        ]);
        assert!(matches!(
            heavy.reconstruction_config(),
            Err(ReconstructionError::InvalidParameter {
                parameter: "weights",
                ..
            })
        ));

        let flat = Cli::parse_from(["patternrecon", "p.csv", "--window", "0", "0", "0", "1"]);
        assert!(flat.window().is_err());

        let unlikely = Cli::parse_from(["patternrecon", "p.csv", "--annealing", "1.5"]);
        assert!(unlikely.reconstruction_config().is_err());
    }

    // Tests a single file produces per-run patterns and a report
    // Verified by numbering runs from zero
    #[test]
    fn test_process_single_file() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("forest.csv");
        write_observed(&input, 25);
        let target = input.to_string_lossy().to_string();

        let cli = Cli::parse_from(quick_args(&target, &["--n-random", "2"]));
        FileProcessor::new(cli).process().expect("process file");

        for k in 1..=2 {
            let run_path = dir.path().join(format!("forest_run{k}.csv"));
            let run = read_pattern(&run_path, Some(Window::unit())).expect("run output");
            assert_eq!(run.len(), 25);
        }
        assert!(!dir.path().join("forest_run3.csv").exists());

        let report = fs::read_to_string(dir.path().join("forest_report.json")).expect("report");
        let value: serde_json::Value = serde_json::from_str(&report).expect("valid json");
        assert!(
            value
                .get("runs")
                .and_then(serde_json::Value::as_array)
                .is_some_and(|runs| runs.len() == 2)
        );
    }

    // Tests existing reports cause files to be skipped unless overridden
    // Verified by always reprocessing
    #[test]
    fn test_skip_existing() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("cells.csv");
        write_observed(&input, 15);
        let report = dir.path().join("cells_report.json");
        fs::write(&report, "{}").expect("placeholder report");
        let target = input.to_string_lossy().to_string();

        FileProcessor::new(Cli::parse_from(quick_args(&target, &[])))
            .process()
            .expect("skipped");
        assert_eq!(fs::read_to_string(&report).expect("report"), "{}");
        assert!(!dir.path().join("cells_run1.csv").exists());

        FileProcessor::new(Cli::parse_from(quick_args(&target, &["--no-skip"])))
            .process()
            .expect("reprocessed");
        assert_ne!(fs::read_to_string(&report).expect("report"), "{}");
    }

    // Tests directory mode ignores earlier run outputs and honours the output directory
    // Verified by reconstructing run outputs as inputs
    #[test]
    fn test_process_directory() {
        let dir = TempDir::new().expect("temp dir");
        let out = dir.path().join("out");
        write_observed(&dir.path().join("a.csv"), 12);
        write_observed(&dir.path().join("b.csv"), 12);
        write_observed(&dir.path().join("a_run1.csv"), 12);
        fs::write(dir.path().join("notes.txt"), "not a pattern").expect("write notes");
        let target = dir.path().to_string_lossy().to_string();
        let out_arg = out.to_string_lossy().to_string();

        let cli = Cli::parse_from(quick_args(&target, &["--output", &out_arg]));
        FileProcessor::new(cli).process().expect("process directory");

        assert!(out.join("a_report.json").exists());
        assert!(out.join("b_report.json").exists());
        assert!(out.join("a_run1.csv").exists());
        assert!(!out.join("a_run1_report.json").exists());
    }

    // Tests unusable targets are rejected
    // Verified by silently doing nothing for missing paths
    #[test]
    fn test_invalid_targets() {
        let dir = TempDir::new().expect("temp dir");
        let text = dir.path().join("points.txt");
        fs::write(&text, "x,y\n").expect("write text");

        let missing = dir.path().join("missing.csv").to_string_lossy().to_string();
        let outcome = FileProcessor::new(Cli::parse_from(quick_args(&missing, &[]))).process();
        assert!(matches!(
            outcome,
            Err(ReconstructionError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));

        let text_target = text.to_string_lossy().to_string();
        let wrong_type =
            FileProcessor::new(Cli::parse_from(quick_args(&text_target, &[]))).process();
        assert!(wrong_type.is_err());
    }
}

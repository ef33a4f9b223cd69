//! Command-line interface for batch reconstruction of CSV point patterns

use crate::algorithm::annealing::IterationObserver;
use crate::algorithm::orchestrator::Reconstruction;
use crate::algorithm::parameters::{EnergyWeights, ReconstructionConfig};
use crate::io::configuration::{
    DEFAULT_ANNEALING, DEFAULT_COMP_FAST, DEFAULT_E_THRESHOLD, DEFAULT_MAX_RUNS, DEFAULT_N_RANDOM,
    DEFAULT_R_LENGTH, DEFAULT_SEED, DEFAULT_WEIGHTS, REPORT_SUFFIX, RUN_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::pattern_file::{read_pattern, write_pattern};
use crate::io::progress::ProgressManager;
use crate::io::report::ReconstructionReport;
use crate::spatial::window::Window;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patternrecon")]
#[command(
    author,
    version,
    about = "Reconstruct homogeneous point patterns by simulated annealing"
)]
/// Command-line arguments for the reconstruction tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input CSV file (header `x,y`) or directory of CSV files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible reconstruction
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of independent reconstructions
    #[arg(short = 'n', long, default_value_t = DEFAULT_N_RANDOM)]
    pub n_random: usize,

    /// Maximum iterations per reconstruction
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_RUNS)]
    pub max_runs: usize,

    /// Stop once the energy is at or below this value
    #[arg(short, long, default_value_t = DEFAULT_E_THRESHOLD, allow_negative_numbers = true)]
    pub e_threshold: f64,

    /// Stop after this many consecutive rejected proposals (unlimited if omitted)
    #[arg(long)]
    pub no_change: Option<usize>,

    /// Probability of accepting a proposal that does not lower the energy
    #[arg(short, long, default_value_t = DEFAULT_ANNEALING)]
    pub annealing: f64,

    /// Weight of the nearest-neighbour distance term
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.0)]
    pub weight_nnd: f64,

    /// Weight of the pair correlation term
    #[arg(long, default_value_t = DEFAULT_WEIGHTS.1)]
    pub weight_pcf: f64,

    /// Points per reconstructed pattern (defaults to the observed count)
    #[arg(long)]
    pub n_points: Option<usize>,

    /// Observation window (defaults to the bounding box of the points)
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["X_MIN", "X_MAX", "Y_MIN", "Y_MAX"],
        allow_negative_numbers = true
    )]
    pub window: Option<Vec<f64>>,

    /// Number of distances in the summary statistic grid
    #[arg(long, default_value_t = DEFAULT_R_LENGTH)]
    pub r_length: usize,

    /// Largest distance in the summary statistic grid
    #[arg(long)]
    pub r_max: Option<f64>,

    /// Point count above which fast estimators are used
    #[arg(long, default_value_t = DEFAULT_COMP_FAST)]
    pub comp_fast: usize,

    /// Run reconstructions on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Leave the observed pattern out of the report
    #[arg(short, long)]
    pub discard_input: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if a report exists
    #[arg(long)]
    pub no_skip: bool,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Window given on the command line, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds do not describe a rectangle with
    /// positive area
    pub fn window(&self) -> Result<Option<Window>> {
        match self.window.as_deref() {
            None => Ok(None),
            Some(&[x_min, x_max, y_min, y_max]) => Window::new(x_min, x_max, y_min, y_max).map(Some),
            Some(other) => Err(invalid_parameter(
                "window",
                &format!("{other:?}"),
                &"expected X_MIN X_MAX Y_MIN Y_MAX",
            )),
        }
    }

    /// Build the reconstruction options from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the window or weights are invalid, or any other
    /// option fails validation
    pub fn reconstruction_config(&self) -> Result<ReconstructionConfig> {
        let config = ReconstructionConfig {
            n_points: self.n_points,
            window: self.window()?,
            n_random: self.n_random,
            max_runs: self.max_runs,
            e_threshold: self.e_threshold,
            no_change: self.no_change,
            annealing: self.annealing,
            weights: EnergyWeights::new(self.weight_nnd, self.weight_pcf)?,
            r_length: self.r_length,
            r_max: self.r_max,
            comp_fast: self.comp_fast,
            return_input: !self.discard_input,
            simplify: false,
            parallel: self.parallel,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Orchestrates batch reconstruction of CSV files
pub struct FileProcessor {
    cli: Cli,
    reconstruction: Reconstruction,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            reconstruction: Reconstruction::default(),
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the target cannot be
    /// read, or any reconstruction or export fails
    pub fn process(&self) -> Result<()> {
        let config = self.cli.reconstruction_config()?;
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file, &config)?;
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_csv(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a CSV file",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_csv(&path) && !is_run_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a CSV file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let report_path = self.report_path(input_path);
        if report_path.exists() {
            info!("Skipping: {} (report exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&self, input_path: &Path, config: &ReconstructionConfig) -> Result<()> {
        info!("Reconstructing {}", input_path.display());
        let observed = read_pattern(input_path, config.window)?;

        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(config.n_random, config.max_runs));
        let monitor = progress
            .as_ref()
            .map(|pm| pm as &dyn IterationObserver);

        let result = self.reconstruction.run(&observed, config, monitor);

        if let Some(ref pm) = progress {
            pm.finish();
        }
        let result = result?;

        for run in &result.runs {
            write_pattern(&self.run_path(input_path, run.run_index), &run.configuration)?;
        }
        ReconstructionReport::from_result(&result).write(&self.report_path(input_path))?;

        Ok(())
    }

    fn output_dir(&self, input_path: &Path) -> PathBuf {
        self.cli.output.clone().unwrap_or_else(|| {
            input_path
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf)
        })
    }

    fn run_path(&self, input_path: &Path, run_index: usize) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{RUN_SUFFIX}{}.csv", stem.to_string_lossy(), run_index + 1);
        self.output_dir(input_path).join(name)
    }

    fn report_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{REPORT_SUFFIX}.json", stem.to_string_lossy());
        self.output_dir(input_path).join(name)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("csv")
}

/// Whether a file looks like a per-run output (`<stem>_run<k>.csv`)
fn is_run_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.rsplit_once(RUN_SUFFIX))
        .is_some_and(|(_, tail)| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()))
}

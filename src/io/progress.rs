//! Multi-run progress tracking with automatic batching for many runs

use crate::algorithm::annealing::IterationObserver;
use crate::algorithm::result::RunResult;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Runs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for a reconstruction
///
/// Shows one bar per run for small reconstructions and a single batch bar
/// counting finished runs otherwise. Bars are thread-safe, so the manager
/// can observe runs executing in parallel.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bars: Vec<ProgressBar>,
}

impl ProgressManager {
    /// Create progress bars for `run_count` runs of up to `max_iterations` each
    pub fn new(run_count: usize, max_iterations: usize) -> Self {
        let multi_progress = MultiProgress::new();
        let mut batch_bar = None;
        let mut run_bars = Vec::new();

        // Switch to batch mode for many runs to avoid terminal spam
        if run_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let bar = ProgressBar::new(run_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            batch_bar = Some(multi_progress.add(bar));
        } else {
            for run_index in 0..run_count {
                let bar = ProgressBar::new(max_iterations as u64);
                bar.set_style(PROGRESS_STYLE.clone());
                bar.set_prefix(format!("run {}", run_index + 1));
                run_bars.push(multi_progress.add(bar));
            }
        }

        Self {
            multi_progress,
            batch_bar,
            run_bars,
        }
    }

    /// Number of per-run bars being displayed
    pub const fn run_bar_count(&self) -> usize {
        self.run_bars.len()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All runs finished");
        }
        let _ = self.multi_progress.clear();
    }
}

impl IterationObserver for ProgressManager {
    fn on_iteration(&self, run_index: usize, iteration: usize, energy: f64) {
        if let Some(bar) = self.run_bars.get(run_index) {
            bar.set_position(iteration as u64);
            bar.set_message(format!("energy {energy:.6}"));
        }
    }

    fn on_run_complete(&self, result: &RunResult) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(bar) = self.run_bars.get(result.run_index) {
            bar.set_length(result.iterations as u64);
            bar.finish_with_message(format!(
                "✓ energy {:.6} ({})",
                result.final_energy(),
                result.stop_reason.as_str()
            ));
        }
    }
}

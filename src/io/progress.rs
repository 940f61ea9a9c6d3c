//! Per-figure progress tracking for batch rendering

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ITERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for a batch of figures
///
/// One bar per figure; search figures tick once per Monte Carlo iteration,
/// direct renders tick once on completion.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
    labels: Vec<String>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Create one progress bar per figure
    pub fn initialize(&mut self, figure_count: usize) {
        for _ in 0..figure_count {
            let bar = ProgressBar::new(0);
            bar.set_style(ITERATION_STYLE.clone());
            self.bars.push(self.multi_progress.add(bar));
        }
        self.labels = vec![String::new(); figure_count];
    }

    /// Configure the bar for a figure about to be rendered
    pub fn start_figure(&mut self, index: usize, label: &str, iterations: usize) {
        if let Some(state) = self.labels.get_mut(index) {
            *state = label.to_string();
        }
        if let Some(bar) = self.bars.get(index) {
            bar.set_length(iterations as u64);
            bar.set_position(0);
            bar.set_prefix(label.to_string());
            bar.set_message(format!("0/{iterations}"));
        }
    }

    /// Report the current Monte Carlo iteration for a figure
    pub fn update_iteration(&self, index: usize, iteration: usize) {
        if let Some(bar) = self.bars.get(index) {
            bar.set_position(iteration as u64);
            let total = bar.length().unwrap_or(0);
            bar.set_message(format!("{iteration}/{total}"));
        }
    }

    /// Mark a figure as completed
    pub fn complete_figure(&self, index: usize) {
        if let Some(bar) = self.bars.get(index) {
            let total = bar.length().unwrap_or(0);
            bar.set_position(total);
            let label = self.labels.get(index).map_or("", String::as_str);
            bar.set_prefix(format!("✓ {label}"));
            bar.set_message(format!("{total}/{total}"));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}

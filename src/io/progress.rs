//! Progress display for generating several maps in a row

use crate::algorithm::executor::{SolverState, StepReport};
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Per-map progress shown as resolved cells over total cells
///
/// Keeps a rolling window of the last few maps on screen and adds a batch bar
/// once more maps are requested than the window holds.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    map_bars: Vec<ProgressBar>,
    /// Stores (`label`, `resolved`, `total`, `attempt`) for rolling window display
    map_states: Vec<(String, usize, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            map_bars: Vec::new(),
            map_states: Vec::new(),
        }
    }

    /// Create bars for a batch of maps
    pub fn initialize(&mut self, map_count: usize) {
        if map_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(map_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..map_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.map_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a map about to be generated
    pub fn start_map(&mut self, index: usize, label: String, total_cells: usize) {
        if index >= self.map_states.len() {
            self.map_states.resize(index + 1, (String::new(), 0, 0, 0));
        }
        if let Some(state) = self.map_states.get_mut(index) {
            *state = (label, 0, total_cells, 1);
        }
        self.update_bars();
    }

    /// Report a solver step for a map
    pub fn update_step(&mut self, index: usize, report: &StepReport) {
        if let Some(state) = self.map_states.get_mut(index) {
            // A contradiction throws the grid away; show the restart from zero
            state.1 = if report.state == SolverState::Contradiction {
                0
            } else {
                report.resolved
            };
            state.2 = report.total;
            state.3 = report.attempt;
        }
        self.update_bars();
    }

    /// Mark a map as completed and update batch progress
    pub fn complete_map(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.map_states.get_mut(index) {
            state.0 = format!("✓ {} ({:.1?})", state.0, elapsed);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All maps generated");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N registered maps
    fn update_bars(&self) {
        let active: Vec<_> = self
            .map_states
            .iter()
            .filter(|(label, ..)| !label.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, resolved, total, attempt)) in visible.iter().enumerate() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*resolved as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{resolved:>width$}/{total} cells, attempt {attempt}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar_idx in visible.len()..self.map_bars.len() {
            if let Some(bar) = self.map_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}

//! Configuration for the replay viewer.

use std::time::Duration;

/// Default number of samples kept on screen.
pub const DEFAULT_CAPACITY: usize = 50;

/// Default delay between two replayed samples.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(300);

// ─────────────────────────────────────────────────────────────────────────────
// ChartLabels
// ─────────────────────────────────────────────────────────────────────────────

/// Text shown around the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartLabels {
    /// X axis caption.
    pub x_axis: String,
    /// Y axis caption.
    pub y_axis: String,
    /// Legend entry of the signal line.
    pub trace: String,
    /// Shown instead of the chart while the display window is empty.
    pub loading: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            x_axis: "Time (HH:MM)".to_string(),
            y_axis: "EEG Value".to_string(),
            trace: "EEG Signal".to_string(),
            loading: "Loading data...".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ReplayConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for a replay session.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `capacity`       | Display window size in samples |
/// | `tick_period`    | Replay cadence |
/// | `labels`         | Axis, legend and placeholder text |
/// | `native_options` | eframe window options |
#[derive(Clone)]
pub struct ReplayConfig {
    // ── Replay ───────────────────────────────────────────────────────────────
    /// Maximum number of samples in the display window.
    pub capacity: usize,
    /// Time between two consumed samples.
    pub tick_period: Duration,

    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Heading rendered above the controls.
    pub headline: Option<String>,
    /// Chart captions.
    pub labels: ChartLabels,
    /// Show the plot legend.
    pub show_legend: bool,
    /// Show the plot grid.
    pub show_grid: bool,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            tick_period: DEFAULT_TICK_PERIOD,

            title: "EEG Data Visualization".to_string(),
            headline: Some("EEG Visualizer".to_string()),
            labels: ChartLabels::default(),
            show_legend: true,
            show_grid: true,
            native_options: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ReplayConfig::default();
        assert_eq!(cfg.capacity, 50);
        assert_eq!(cfg.tick_period, Duration::from_millis(300));
        assert_eq!(cfg.labels.x_axis, "Time (HH:MM)");
    }
}

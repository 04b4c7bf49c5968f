//! Chart and control widgets for the replay viewer.

use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot};

use crate::config::ReplayConfig;
use crate::data::replay::{DisplayWindow, Replay};

const SIGNAL_COLOR: Color32 = Color32::from_rgb(0x88, 0x84, 0xd8);
const PAUSE_COLOR: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36);
const RESUME_COLOR: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

/// Red "Pause" while running, green "Resume" while paused.
pub(crate) fn pause_button(ui: &mut egui::Ui, paused: bool) -> egui::Response {
    let (text, fill) = if paused {
        (
            format!("{} Resume", egui_phosphor::regular::PLAY),
            RESUME_COLOR,
        )
    } else {
        (
            format!("{} Pause", egui_phosphor::regular::PAUSE),
            PAUSE_COLOR,
        )
    };
    ui.add(
        egui::Button::new(RichText::new(text).size(16.0).color(Color32::WHITE))
            .fill(fill)
            .corner_radius(8.0),
    )
    .on_hover_text("Toggle replay [Space]")
}

/// Plot the display window as a single line.
///
/// X is the sample's position in the full sequence so the line scrolls as
/// samples are consumed; tick labels show the samples' time labels.
pub(crate) fn show_chart(ui: &mut egui::Ui, replay: &Replay, cfg: &ReplayConfig) {
    let start = replay.window_start();
    let window = replay.window();
    let points = window_points(window, start);

    let mut plot = Plot::new("replay_chart")
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .show_grid(cfg.show_grid)
        .x_axis_label(cfg.labels.x_axis.clone())
        .y_axis_label(cfg.labels.y_axis.clone())
        .x_axis_formatter(|x, _range| tick_label(window, start, x.value));
    if cfg.show_legend {
        plot = plot.legend(Legend::default());
    }

    let line = Line::new(cfg.labels.trace.clone(), points)
        .color(SIGNAL_COLOR)
        .width(1.5);
    plot.show(ui, |plot_ui| {
        plot_ui.line(line);
    });
}

/// `[x, y]` pairs for the window, X counted from `start`.
pub(crate) fn window_points(window: &DisplayWindow, start: usize) -> Vec<[f64; 2]> {
    window
        .iter()
        .enumerate()
        .map(|(i, s)| [(start + i) as f64, s.value])
        .collect()
}

/// Label for the grid mark at `x`, empty between samples or outside the window.
pub(crate) fn tick_label(window: &DisplayWindow, start: usize, x: f64) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < start as f64 {
        return String::new();
    }
    window
        .get(nearest as usize - start)
        .map(|s| s.time_label.clone())
        .unwrap_or_default()
}

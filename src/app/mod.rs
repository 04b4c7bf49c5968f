//! Replay viewer application.
//!
//! | Sub-module | Responsibility |
//! | ---------- | -------------- |
//! | [`chart`]  | Line chart of the display window and the pause/resume button |
//! | [`run`]    | Top-level [`run_replay()`] entry point |

mod chart;
mod run;

pub use run::run_replay;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::ReplayConfig;
use crate::data::loader::LoadHandle;
use crate::data::replay::{ReplayDriver, ReplayState};
use crate::data::sample::Sample;

/// Repaint interval while waiting for the loader or between ticks.
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// Standalone replay viewer implementing [`eframe::App`].
///
/// Owns the [`ReplayDriver`] for one session; dropping the app cancels the
/// replay timer. The sample file is loaded in the background and handed to
/// the driver on the first frame after it arrives.
pub struct ReplayApp {
    driver: ReplayDriver,
    loader: Option<LoadHandle>,
    cfg: ReplayConfig,
}

impl ReplayApp {
    pub fn new(cfg: ReplayConfig) -> Self {
        Self {
            driver: ReplayDriver::from_config(&cfg),
            loader: None,
            cfg,
        }
    }

    /// Replay whatever `loader` delivers once it completes.
    pub fn with_loader(mut self, loader: LoadHandle) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Repaint `ctx` on every replay tick.
    pub fn with_repaint_context(mut self, ctx: egui::Context) -> Self {
        self.driver.set_waker(Arc::new(move || ctx.request_repaint()));
        self
    }

    /// Replace the current sequence and restart the replay.
    pub fn load(&mut self, samples: Vec<Sample>) {
        self.loader = None;
        self.driver.load(samples);
    }

    /// Pick up a finished background load and apply pending ticks.
    pub fn poll(&mut self) {
        if let Some(samples) = self.loader.as_ref().and_then(LoadHandle::try_take) {
            self.loader = None;
            self.driver.load(samples);
        }
        self.driver.poll();
    }

    pub fn toggle_pause(&mut self) {
        self.driver.toggle_pause();
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    pub fn driver(&self) -> &ReplayDriver {
        &self.driver
    }
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_pause();
        }

        egui::TopBottomPanel::top("replay_controls").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(h) = &self.cfg.headline {
                    ui.heading(h);
                }
                if chart::pause_button(ui, self.driver.is_paused()).clicked() {
                    self.toggle_pause();
                }
                if self.driver.state() == ReplayState::Finished {
                    ui.weak("End of recording");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.driver.window().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(format!(
                        "{} {}",
                        egui_phosphor::regular::WARNING,
                        self.cfg.labels.loading
                    ));
                });
            } else {
                chart::show_chart(ui, self.driver.replay(), &self.cfg);
            }
        });

        // Ticks wake the UI themselves; this only covers loading and pause.
        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

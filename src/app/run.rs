//! Top-level entry point for running the replay viewer as a native window.

use std::path::PathBuf;

use eframe::egui;

use crate::config::ReplayConfig;
use crate::data::loader::spawn_load;

use super::ReplayApp;

/// Load `path` in the background and replay it in a native window.
///
/// The call blocks until the window is closed. A file that cannot be read is
/// logged and leaves the window showing its loading placeholder.
pub fn run_replay(path: impl Into<PathBuf>, mut cfg: ReplayConfig) -> eframe::Result<()> {
    let path = path.into();
    tracing::info!(path = %path.display(), "loading samples");
    let loader = spawn_load(path);

    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();

    // Set a default window size if one is not provided by config.
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1000.0, 560.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            let app = ReplayApp::new(cfg)
                .with_loader(loader)
                .with_repaint_context(cc.egui_ctx.clone());
            Ok(Box::new(app))
        }),
    )
}

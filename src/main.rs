use anyhow::{anyhow, Result};
use doodle_pad::background::DEFAULT_ASSET_PATH;
use doodle_pad::gui::DoodleApp;
use eframe::egui;
use std::path::PathBuf;

fn main() -> Result<()> {
    doodle_pad::logging::init();

    let asset_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_PATH));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([340.0, 760.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Doodle Pad",
        native_options,
        Box::new(move |_cc| Box::new(DoodleApp::new(asset_path))),
    )
    .map_err(|err| anyhow!("run native window: {err}"))
}

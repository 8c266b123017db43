mod app;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::HexplotApp;
use eframe::egui;
use hexplot::config::ViewerConfig;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_args()?;
    log::debug!("Viewer config: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "hexplot – Trace Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(HexplotApp::new(AppState::new(config))))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running viewer")
}

mod analysis;
mod app;
mod color;
mod data;
mod error;
mod export;
mod state;
mod ui;

use anyhow::Context;
use app::TrackscopeApp;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional dataset path on the command line. A path that cannot be
    // loaded is fatal here, before any UI comes up; with no argument the
    // app starts empty and the File → Open dialog takes over.
    let mut state = AppState::default();
    if let Some(arg) = std::env::args().nth(1) {
        let path = std::path::PathBuf::from(&arg);
        let table = data::loader::load_file(&path)
            .with_context(|| format!("loading dataset '{}'", path.display()))?;
        log::info!(
            "Loaded {} tracks with columns {:?}",
            table.len(),
            table.columns
        );
        state.set_dataset(table);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trackscope – Music Cluster Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(TrackscopeApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

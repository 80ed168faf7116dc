mod app;
mod color;
mod data;
mod format;
mod state;
mod ui;

use std::path::PathBuf;

use app::ScorecardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional path argument: loaded before the window opens so a broken
    // file fails fast on the command line.
    let initial = std::env::args().nth(1).map(PathBuf::from).map(|path| {
        match data::loader::load_file(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                std::process::exit(1);
            }
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scorecard – Business Performance Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = ScorecardApp::default();
            if let Some(dataset) = initial {
                app.state.set_dataset(dataset);
            }
            Ok(Box::new(app))
        }),
    )
}

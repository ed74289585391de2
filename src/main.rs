mod app;
mod ui;

use std::path::PathBuf;

use app::VariantPanelApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional: a variant file to open at start-up.
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Variant Panel",
        options,
        Box::new(move |_cc| {
            let mut app = VariantPanelApp::default();
            if let Some(path) = initial_file {
                app.state.open_path(&path);
            }
            Ok(Box::new(app))
        }),
    )
}

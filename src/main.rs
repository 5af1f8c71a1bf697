mod analysis;
mod app;
mod color;
mod data;
mod error;
mod pipeline;
mod settings;
mod state;
mod ui;

use app::InsightHiveApp;
use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size(settings.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Insight Hive – Self-Service Analytics",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can decode the png/jpeg logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(InsightHiveApp::new(settings)))
        }),
    )
}

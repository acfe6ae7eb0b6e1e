mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CatalogExplorerApp;
use crate::config::Settings;
use eframe::egui;

fn main() -> eframe::Result {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration, using defaults: {e}");
            Settings::default()
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log.level.as_str()),
    )
    .init();

    let settings = match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            log::error!("Invalid configuration ({e}), using defaults");
            Settings::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(CatalogExplorerApp::new(settings)))),
    )
}

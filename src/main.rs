mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::WeatherDashboardApp;
use eframe::egui;
use weather_dashboard::settings::{APP_TITLE, DATA_DIR_NAME, MIN_WINDOW_SIZE, WINDOW_SIZE};

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(WeatherDashboardApp::new(PathBuf::from(DATA_DIR_NAME))))),
    )
}

#![allow(dead_code)]

mod app;
mod config;
mod data;
mod error;
mod gui;
mod plot;

use app::PlotterApp;
use config::ViewerConfig;
use error::AppError;

fn main() -> Result<(), AppError> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting MESA Data Plotter v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::default();

    // Blocking load; no window is created if it fails
    let run = data::loader::load_run(&config.base_dir).map_err(|e| {
        log::error!("{}", e);
        e
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("MESA Data Plotter"),
        ..Default::default()
    };

    eframe::run_native(
        "MESA Data Plotter",
        options,
        Box::new(move |cc| Ok(Box::new(PlotterApp::new(cc, run, &config)))),
    )?;
    Ok(())
}

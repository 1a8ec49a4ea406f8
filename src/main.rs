#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::Path;

use pixel_paint::{EditorConfig, PixelPaintApp};

/// Optional config file in the working directory
const CONFIG_PATH: &str = "pixel_paint.json";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A config file overrides the settings eframe restored from the last run.
    let config = Path::new(CONFIG_PATH)
        .exists()
        .then(|| EditorConfig::load_or_default(CONFIG_PATH));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Pixel Paint"),
        ..Default::default()
    };

    eframe::run_native(
        "Pixel Paint",
        native_options,
        Box::new(|cc| Ok(Box::new(PixelPaintApp::new(cc, config)?))),
    )
}

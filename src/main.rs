#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use strata_paint::StrataApp;

fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Strata Paint")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "strata_paint",
        native_options,
        Box::new(|cc| Ok(Box::new(StrataApp::new(cc)))),
    )
}

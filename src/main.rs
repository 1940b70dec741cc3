// Career Track Application
// Main entry point

use career_track::ui_egui::CareerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Career Track");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Career Track"),
        ..Default::default()
    };

    eframe::run_native(
        "Career Track",
        options,
        Box::new(|cc| Ok(Box::new(CareerApp::new(cc)))),
    )
}

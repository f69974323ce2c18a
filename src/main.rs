mod app;
mod modules;
mod style;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([480.0, 420.0])
            .with_drag_and_drop(true)
            .with_title("HEIC to JPG Converter"),
        ..Default::default()
    };

    eframe::run_native(
        "HEIC to JPG Converter",
        options,
        Box::new(|cc| Ok(Box::new(app::HeicConverterApp::new(cc)))),
    )
}

mod domain;
mod infrastructure;
mod presentation;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 620.0])
            .with_title("Carrito Remote"),
        ..Default::default()
    };

    eframe::run_native(
        "Carrito Remote",
        options,
        Box::new(|cc| Ok(Box::new(presentation::app::CarritoApp::new(cc)))),
    )
}

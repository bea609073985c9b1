use crate::domain::commands::{Command, SpeedLevel};
use crate::presentation::app::CarritoApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Drive");
    ui.add_space(20.0);

    let connected = app.is_connected();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            if let Some(direction) = app.joystick.show(ui, connected) {
                app.send_action(Command::from(direction));
            }

            ui.add_space(30.0);
            let stop = egui::Button::new(
                egui::RichText::new("STOP").size(20.0).strong(),
            )
            .fill(egui::Color32::from_rgb(220, 50, 50))
            .min_size(egui::vec2(100.0, 100.0));
            if ui.add_enabled(connected, stop).clicked() {
                app.send_action(Command::Stop);
            }
        });

        ui.add_space(60.0);
        ui_speed_slider(app, ui, connected);
    });
}

/// Vertical three-step selector; a speed command goes out only when the
/// discrete level changed at the end of a drag.
fn ui_speed_slider(app: &mut CarritoApp, ui: &mut egui::Ui, connected: bool) {
    ui.vertical(|ui| {
        ui.label("High");
        let response = ui.add_enabled(
            connected,
            egui::Slider::new(&mut app.speed_slider, 0.0..=2.0)
                .vertical()
                .step_by(1.0)
                .show_value(false),
        );
        ui.label("Low");

        if response.drag_stopped() {
            let level = SpeedLevel::from_slider(app.speed_slider);
            if level != app.last_speed_level {
                app.send_action(level.command());
                app.last_speed_level = level;
            }
        }

        ui.add_space(6.0);
        ui.label(format!("Speed: {}", app.last_speed_level.label()));
    });
}

use crate::domain::commands::Command;
use crate::presentation::app::CarritoApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Programming Controls");
    ui.add_space(20.0);

    let connected = app.is_connected();

    ui.label(egui::RichText::new("Main Movement").strong().size(18.0));
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        command_button(app, ui, "⬆", Command::Up, connected, false);
        ui.horizontal(|ui| {
            command_button(app, ui, "⬅", Command::Left, connected, false);
            command_button(app, ui, "■", Command::Stop, connected, true);
            command_button(app, ui, "➡", Command::Right, connected, false);
        });
        command_button(app, ui, "⬇", Command::Down, connected, false);
    });

    ui.add_space(25.0);

    ui.label(egui::RichText::new("Speed Control").strong().size(18.0));
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        for (label, command) in [
            ("Low (J)", Command::SpeedLow),
            ("Mid (K)", Command::SpeedMid),
            ("High (L)", Command::SpeedHigh),
        ] {
            if ui
                .add_enabled(connected, egui::Button::new(label))
                .clicked()
            {
                app.send_action(command);
            }
        }
    });

    ui.add_space(25.0);

    ui.label(egui::RichText::new("Diagonal Movement").strong().size(18.0));
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            command_button(app, ui, "↖", Command::UpLeft, connected, false);
            ui.add_space(96.0);
            command_button(app, ui, "↗", Command::UpRight, connected, false);
        });
        ui.horizontal(|ui| {
            command_button(app, ui, "↙", Command::DownLeft, connected, false);
            ui.add_space(96.0);
            command_button(app, ui, "↘", Command::DownRight, connected, false);
        });
    });
}

fn command_button(
    app: &CarritoApp,
    ui: &mut egui::Ui,
    icon: &str,
    command: Command,
    enabled: bool,
    is_stop: bool,
) {
    let text = format!("{icon}\n({})", command.code());
    let mut button =
        egui::Button::new(egui::RichText::new(text).size(18.0)).min_size(egui::vec2(96.0, 96.0));
    if is_stop {
        button = button.fill(egui::Color32::from_rgb(220, 50, 50));
    }
    if ui.add_enabled(enabled, button).clicked() {
        app.send_action(command);
    }
}

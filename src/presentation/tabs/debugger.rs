use crate::domain::models::{ConnectionState, LinkCommand};
use crate::presentation::app::CarritoApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Debugger");
    ui.add_space(20.0);

    ui_connection_panel(app, ui);
    ui.add_space(15.0);

    ui_raw_command_panel(app, ui);
    ui.add_space(15.0);

    ui_log_panel(app, ui);
}

fn ui_connection_panel(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::card(ui, "Connection", |ui| {
        Components::connection_banner(ui, app.connection_state);

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let can_connect = app.connection_state == ConnectionState::Disconnected;
            if ui
                .add_enabled(can_connect, egui::Button::new("Connect"))
                .clicked()
            {
                let _ = app.link_tx.send(LinkCommand::Connect);
            }
            if ui
                .add_enabled(!can_connect, egui::Button::new("Disconnect"))
                .clicked()
            {
                let _ = app.link_tx.send(LinkCommand::Disconnect);
            }
        });
    });
}

fn ui_raw_command_panel(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::card(ui, "Raw Command", |ui| {
        ui.horizontal(|ui| {
            ui.label("Message:");
            ui.text_edit_singleline(&mut app.debug_input);
        });
        ui.horizontal(|ui| {
            let can_send = app.is_connected() && !app.debug_input.trim().is_empty();
            if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                let text = std::mem::take(&mut app.debug_input);
                app.send_raw(text);
            }
            if ui.button("Clear Log").clicked() {
                app.log.clear();
            }
        });
    });
}

fn ui_log_panel(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::card(ui, "Log", |ui| {
        egui::ScrollArea::vertical()
            .id_salt("debug_log")
            .max_height(260.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in &app.log {
                    let color = Components::severity_color(ui, entry.severity);
                    ui.label(egui::RichText::new(&entry.message).color(color));
                }
            });
    });
}

use crate::domain::models::{MessageSeverity, StatusMessage};
use crate::presentation::app::CarritoApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut CarritoApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Settings");
    ui.add_space(20.0);

    let mut save_result = None;

    if let Ok(mut settings) = app.settings.lock() {
        let settings_mut = settings.get_mut();

        Components::card(ui, "Vehicle Link", |ui| {
            egui::Grid::new("link_settings")
                .spacing([10.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Device address:");
                    ui.text_edit_singleline(&mut settings_mut.device_address);
                    ui.end_row();
                    ui.label("UART service:");
                    ui.text_edit_singleline(&mut settings_mut.uart_service_uuid);
                    ui.end_row();
                    ui.label("UART characteristic:");
                    ui.text_edit_singleline(&mut settings_mut.uart_characteristic_uuid);
                    ui.end_row();
                });

            ui.label(
                egui::RichText::new("Changes take effect on the next connect.")
                    .italics()
                    .size(12.0),
            );
        });

        ui.add_space(10.0);

        Components::card(ui, "Logging", |ui| {
            ui.horizontal(|ui| {
                ui.label("Verbosity Level:");
                egui::ComboBox::from_id_salt("log_level")
                    .selected_text(&settings_mut.log_settings.level)
                    .show_ui(ui, |ui| {
                        for level in &["trace", "debug", "info", "warn", "error"] {
                            ui.selectable_value(
                                &mut settings_mut.log_settings.level,
                                level.to_string(),
                                *level,
                            );
                        }
                    });
            });

            ui.checkbox(
                &mut settings_mut.log_settings.console_logging_enabled,
                "Standard Console Logs",
            );
            ui.checkbox(
                &mut settings_mut.log_settings.file_logging_enabled,
                "Persistent File Logs",
            );

            if settings_mut.log_settings.file_logging_enabled {
                ui.indent("file_logs", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Save Path:");
                        ui.text_edit_singleline(&mut settings_mut.log_settings.log_dir);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Rotation:");
                        egui::ComboBox::from_id_salt("log_rot")
                            .selected_text(&settings_mut.log_settings.rotation)
                            .show_ui(ui, |ui| {
                                for rot in &["daily", "hourly", "never"] {
                                    ui.selectable_value(
                                        &mut settings_mut.log_settings.rotation,
                                        rot.to_string(),
                                        *rot,
                                    );
                                }
                            });
                    });
                });
                ui.label(
                    egui::RichText::new("Restart required for log changes.")
                        .italics()
                        .size(12.0),
                );
            }
        });

        ui.add_space(15.0);

        if ui.button("Save Settings").clicked() {
            save_result = Some(settings.save());
        }
    }

    if let Some(result) = save_result {
        let entry = match result {
            Ok(()) => StatusMessage::new("Settings saved.", MessageSeverity::Success),
            Err(e) => StatusMessage::new(
                format!("Failed to save settings: {e}."),
                MessageSeverity::Error,
            ),
        };
        app.log.push(entry);
    }
}

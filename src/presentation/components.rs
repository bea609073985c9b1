//! Small widgets shared by the tabs, all aware of the app's domain
//! types so the tabs never hand-pick status colors themselves.

use crate::domain::models::{ConnectionState, MessageSeverity};
use eframe::egui;

pub struct Components;

impl Components {
    pub fn heading(ui: &mut egui::Ui, text: &str) {
        ui.label(egui::RichText::new(text).heading().strong());
    }

    /// Bordered section with a title row separated from its body.
    pub fn card<R>(
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        let stroke = ui.style().visuals.widgets.noninteractive.bg_stroke;
        let fill = ui.style().visuals.panel_fill;

        egui::Frame::none()
            .inner_margin(egui::Margin::symmetric(16.0, 12.0))
            .stroke(stroke)
            .fill(fill)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new(title).strong().size(17.0));
                ui.separator();
                add_contents(ui)
            })
            .inner
    }

    /// Full-width banner reflecting the link state: green when the car
    /// is reachable, amber while a session is being brought up, gray
    /// otherwise.
    pub fn connection_banner(ui: &mut egui::Ui, state: ConnectionState) {
        let (bg, fg) = match state {
            ConnectionState::Connected => {
                (egui::Color32::from_rgb(0, 200, 0), egui::Color32::BLACK)
            }
            ConnectionState::Connecting | ConnectionState::Discovering => {
                (egui::Color32::from_rgb(255, 200, 0), egui::Color32::BLACK)
            }
            ConnectionState::Disconnected => (egui::Color32::from_gray(100), egui::Color32::WHITE),
        };

        ui.add_sized(
            [ui.available_width(), 35.0],
            egui::Label::new(
                egui::RichText::new(state.label())
                    .color(fg)
                    .background_color(bg)
                    .size(16.0)
                    .strong(),
            )
            .wrap_mode(egui::TextWrapMode::Extend),
        );
    }

    /// Text color for a log line of the given severity.
    pub fn severity_color(ui: &egui::Ui, severity: MessageSeverity) -> egui::Color32 {
        match severity {
            MessageSeverity::Info => ui.style().visuals.text_color(),
            MessageSeverity::Success => egui::Color32::from_rgb(0, 150, 0),
            MessageSeverity::Warning => egui::Color32::from_rgb(200, 150, 0),
            MessageSeverity::Error => egui::Color32::RED,
        }
    }
}

//! On-screen joystick pad.
//!
//! A large circle with a draggable knob. The knob offset is clamped to
//! the travel radius and fed through [`DirectionTracker`], so the widget
//! reports a direction only on transitions and `Stopped` once on release.

use crate::domain::joystick::{DirectionTracker, JoystickDirection};
use eframe::egui::{self, Color32, Sense, Stroke, Vec2};

const PAD_RADIUS: f32 = 120.0;
const KNOB_RADIUS: f32 = 40.0;

pub struct JoystickPad {
    offset: Vec2,
    tracker: DirectionTracker,
}

impl Default for JoystickPad {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickPad {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            tracker: DirectionTracker::new(),
        }
    }

    /// Render the pad; returns a direction when the bucketed drag
    /// position changed this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, enabled: bool) -> Option<JoystickDirection> {
        let sense = if enabled { Sense::drag() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(PAD_RADIUS * 2.0), sense);
        let travel = PAD_RADIUS - KNOB_RADIUS;

        let mut emitted = None;
        if enabled {
            if response.dragged() {
                self.offset += response.drag_delta();
                let distance = self.offset.length();
                if distance > travel {
                    self.offset *= travel / distance;
                }
                emitted = self.tracker.update((self.offset.x, self.offset.y), travel);
            }
            if response.drag_stopped() {
                self.offset = Vec2::ZERO;
                emitted = self.tracker.release();
            }
        } else if self.offset != Vec2::ZERO {
            // Connection dropped mid-drag: recentre without emitting.
            self.offset = Vec2::ZERO;
            self.tracker.release();
        }

        let color = if enabled {
            ui.style().visuals.selection.bg_fill
        } else {
            Color32::GRAY
        };

        let painter = ui.painter();
        let center = rect.center();
        painter.circle_stroke(center, PAD_RADIUS, Stroke::new(4.0, color));
        painter.circle_filled(center + self.offset, KNOB_RADIUS, color);

        emitted
    }
}

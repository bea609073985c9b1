//! Joystick geometry: turning a drag offset into a discrete direction.
//!
//! The offset uses screen coordinates (y grows downwards), so "up" is a
//! negative angle. The circle is partitioned into the sector ranges the
//! vehicle firmware was tuned against; boundary angles are inclusive and
//! resolve to the earlier-declared sector.

/// Fraction of the travel radius below which input keeps the previous
/// direction instead of producing jitter.
pub const DEAD_ZONE_RATIO: f32 = 0.1;

/// The nine discrete joystick positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Stopped,
}

/// Bucket a clamped drag offset into a direction.
///
/// Returns `previous` when the offset sits inside the dead zone or the
/// angle falls in a gap between sectors.
pub fn direction_for(
    offset: (f32, f32),
    max_radius: f32,
    previous: JoystickDirection,
) -> JoystickDirection {
    let (x, y) = offset;
    let magnitude = (x * x + y * y).sqrt();
    if magnitude < max_radius * DEAD_ZONE_RATIO {
        return previous;
    }

    direction_for_degrees(y.atan2(x).to_degrees(), previous)
}

/// Bucket an angle in degrees (screen coordinates, `-180.0..=180.0`)
/// into a sector. Ranges are inclusive and tested in declaration order,
/// so an exact boundary angle resolves to the earlier-declared sector.
pub fn direction_for_degrees(degrees: f32, previous: JoystickDirection) -> JoystickDirection {
    match degrees {
        d if (-120.0..=-60.0).contains(&d) => JoystickDirection::Up,
        d if (60.0..=120.0).contains(&d) => JoystickDirection::Down,
        d if (-30.0..=30.0).contains(&d) => JoystickDirection::Right,
        d if (150.0..=180.0).contains(&d) || (-180.0..=-150.0).contains(&d) => {
            JoystickDirection::Left
        }
        d if (-60.0..=-30.0).contains(&d) => JoystickDirection::UpRight,
        d if (-150.0..=-120.0).contains(&d) => JoystickDirection::UpLeft,
        d if (120.0..=150.0).contains(&d) => JoystickDirection::DownLeft,
        d if (30.0..=60.0).contains(&d) => JoystickDirection::DownRight,
        _ => previous,
    }
}

/// Edge-triggered direction reporter for a drag gesture.
///
/// [`update`](Self::update) is fed every pointer move and yields a
/// direction only when it differs from the last reported one;
/// [`release`](Self::release) yields `Stopped` exactly once per drag.
#[derive(Debug)]
pub struct DirectionTracker {
    last: JoystickDirection,
}

impl Default for DirectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionTracker {
    pub fn new() -> Self {
        Self {
            last: JoystickDirection::Stopped,
        }
    }

    /// Feed the current clamped offset; returns the new direction on a
    /// transition, `None` otherwise.
    pub fn update(&mut self, offset: (f32, f32), max_radius: f32) -> Option<JoystickDirection> {
        let direction = direction_for(offset, max_radius, self.last);
        if direction != self.last {
            self.last = direction;
            Some(direction)
        } else {
            None
        }
    }

    /// End of drag: report `Stopped` once unless already stopped.
    pub fn release(&mut self) -> Option<JoystickDirection> {
        if self.last != JoystickDirection::Stopped {
            self.last = JoystickDirection::Stopped;
            Some(JoystickDirection::Stopped)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 100.0;

    /// Offset at `degrees` (screen coordinates) with the given magnitude.
    fn offset_at(degrees: f32, magnitude: f32) -> (f32, f32) {
        let radians = degrees.to_radians();
        (magnitude * radians.cos(), magnitude * radians.sin())
    }

    #[test]
    fn eight_sector_centers() {
        let cases = [
            (-90.0, JoystickDirection::Up),
            (90.0, JoystickDirection::Down),
            (0.0, JoystickDirection::Right),
            (180.0, JoystickDirection::Left),
            (-165.0, JoystickDirection::Left),
            (-45.0, JoystickDirection::UpRight),
            (-135.0, JoystickDirection::UpLeft),
            (135.0, JoystickDirection::DownLeft),
            (45.0, JoystickDirection::DownRight),
        ];
        for (degrees, expected) in cases {
            let got = direction_for(offset_at(degrees, 80.0), RADIUS, JoystickDirection::Stopped);
            assert_eq!(got, expected, "angle {degrees}");
        }
    }

    // Boundary angles are fed in as exact literals: reconstructing them
    // from cos/sin and going back through atan2 lands a fraction of a
    // degree off the boundary.
    #[test]
    fn boundaries_resolve_to_earlier_declared_sector() {
        let cases = [
            (-60.0, JoystickDirection::Up),       // Up before UpRight
            (-120.0, JoystickDirection::Up),      // Up before UpLeft
            (60.0, JoystickDirection::Down),      // Down before DownRight
            (120.0, JoystickDirection::Down),     // Down before DownLeft
            (-30.0, JoystickDirection::Right),    // Right before UpRight
            (30.0, JoystickDirection::Right),     // Right before DownRight
            (150.0, JoystickDirection::Left),     // Left before DownLeft
            (-150.0, JoystickDirection::Left),    // Left before UpLeft
            (180.0, JoystickDirection::Left),
            (-180.0, JoystickDirection::Left),
        ];
        for (degrees, expected) in cases {
            let got = direction_for_degrees(degrees, JoystickDirection::Stopped);
            assert_eq!(got, expected, "boundary {degrees}");
        }
    }

    #[test]
    fn dead_zone_keeps_previous_direction() {
        let inside = offset_at(0.0, RADIUS * DEAD_ZONE_RATIO * 0.5);
        assert_eq!(
            direction_for(inside, RADIUS, JoystickDirection::Down),
            JoystickDirection::Down
        );
        assert_eq!(
            direction_for((0.0, 0.0), RADIUS, JoystickDirection::Stopped),
            JoystickDirection::Stopped
        );
    }

    #[test]
    fn changes_are_edge_triggered() {
        let mut tracker = DirectionTracker::new();
        let up = offset_at(-90.0, 80.0);

        assert_eq!(tracker.update(up, RADIUS), Some(JoystickDirection::Up));
        assert_eq!(tracker.update(up, RADIUS), None);
        assert_eq!(tracker.update(up, RADIUS), None);

        let right = offset_at(0.0, 80.0);
        assert_eq!(tracker.update(right, RADIUS), Some(JoystickDirection::Right));
        assert_eq!(tracker.update(right, RADIUS), None);
    }

    #[test]
    fn release_reports_stopped_exactly_once() {
        let mut tracker = DirectionTracker::new();
        tracker.update(offset_at(-90.0, 80.0), RADIUS);

        assert_eq!(tracker.release(), Some(JoystickDirection::Stopped));
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn release_without_movement_reports_nothing() {
        let mut tracker = DirectionTracker::new();
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn dead_zone_drag_then_release_reports_nothing() {
        let mut tracker = DirectionTracker::new();
        assert_eq!(tracker.update(offset_at(45.0, 2.0), RADIUS), None);
        assert_eq!(tracker.release(), None);
    }
}

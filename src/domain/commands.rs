//! Command table for the carrito.
//!
//! The vehicle firmware understands single ASCII bytes. There is no
//! acknowledgement at any level, so every discrete action is written
//! [`COMMAND_REPEAT`] times as the only reliability mechanism.

use crate::domain::joystick::JoystickDirection;

/// Number of identical writes per discrete action.
pub const COMMAND_REPEAT: usize = 4;

/// Discrete actions understood by the vehicle, one ASCII byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Stop,
    Right,
    Left,
    UpRight,
    UpLeft,
    DownLeft,
    DownRight,
    SpeedLow,
    SpeedMid,
    SpeedHigh,
}

impl Command {
    /// Wire code for this action.
    pub const fn code(self) -> char {
        match self {
            Command::Up => 'A',
            Command::Down => 'B',
            Command::Stop => 'C',
            Command::Right => 'D',
            Command::Left => 'E',
            Command::UpRight => 'F',
            Command::UpLeft => 'G',
            Command::DownLeft => 'H',
            Command::DownRight => 'I',
            Command::SpeedLow => 'J',
            Command::SpeedMid => 'K',
            Command::SpeedHigh => 'L',
        }
    }

    pub const fn byte(self) -> u8 {
        self.code() as u8
    }
}

impl From<JoystickDirection> for Command {
    fn from(direction: JoystickDirection) -> Self {
        match direction {
            JoystickDirection::Up => Command::Up,
            JoystickDirection::Down => Command::Down,
            JoystickDirection::Stopped => Command::Stop,
            JoystickDirection::Right => Command::Right,
            JoystickDirection::Left => Command::Left,
            JoystickDirection::UpRight => Command::UpRight,
            JoystickDirection::UpLeft => Command::UpLeft,
            JoystickDirection::DownLeft => Command::DownLeft,
            JoystickDirection::DownRight => Command::DownRight,
        }
    }
}

/// Three-step speed selector exposed by the drive tab slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedLevel {
    Low,
    Mid,
    High,
}

impl SpeedLevel {
    /// Discretize a slider position in `0.0..=2.0`.
    pub fn from_slider(position: f32) -> Self {
        match position.round() as i32 {
            2 => SpeedLevel::High,
            1 => SpeedLevel::Mid,
            _ => SpeedLevel::Low,
        }
    }

    pub const fn command(self) -> Command {
        match self {
            SpeedLevel::Low => Command::SpeedLow,
            SpeedLevel::Mid => Command::SpeedMid,
            SpeedLevel::High => Command::SpeedHigh,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpeedLevel::Low => "Low",
            SpeedLevel::Mid => "Mid",
            SpeedLevel::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_table_matches_firmware() {
        let table = [
            (Command::Up, 'A'),
            (Command::Down, 'B'),
            (Command::Stop, 'C'),
            (Command::Right, 'D'),
            (Command::Left, 'E'),
            (Command::UpRight, 'F'),
            (Command::UpLeft, 'G'),
            (Command::DownLeft, 'H'),
            (Command::DownRight, 'I'),
            (Command::SpeedLow, 'J'),
            (Command::SpeedMid, 'K'),
            (Command::SpeedHigh, 'L'),
        ];
        for (command, code) in table {
            assert_eq!(command.code(), code);
            assert_eq!(command.byte(), code as u8);
        }
    }

    #[test]
    fn every_direction_maps_to_a_command() {
        assert_eq!(Command::from(JoystickDirection::Up), Command::Up);
        assert_eq!(Command::from(JoystickDirection::Stopped), Command::Stop);
        assert_eq!(
            Command::from(JoystickDirection::DownRight),
            Command::DownRight
        );
    }

    #[test]
    fn slider_positions_discretize() {
        assert_eq!(SpeedLevel::from_slider(0.0), SpeedLevel::Low);
        assert_eq!(SpeedLevel::from_slider(0.4), SpeedLevel::Low);
        assert_eq!(SpeedLevel::from_slider(1.0), SpeedLevel::Mid);
        assert_eq!(SpeedLevel::from_slider(1.6), SpeedLevel::High);
        assert_eq!(SpeedLevel::from_slider(2.0), SpeedLevel::High);
        assert_eq!(SpeedLevel::High.command(), Command::SpeedHigh);
    }
}

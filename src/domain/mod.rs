pub mod commands;
pub mod joystick;
pub mod models;
pub mod settings;

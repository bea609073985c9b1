pub mod debugger;
pub mod drive;
pub mod programming;
pub mod settings;

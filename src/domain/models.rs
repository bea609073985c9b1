use crate::domain::commands::Command;

/// Lifecycle of the single BLE link, mutated only by the Bluetooth worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    /// Link is up, UART service/characteristic lookup in progress.
    Discovering,
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::Connecting => "CONNECTING...",
            ConnectionState::Discovering => "DISCOVERING...",
            ConnectionState::Connected => "CONNECTED",
        }
    }
}

/// Payload of a single transmit request issued by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRequest {
    /// A discrete action from the command table, repeated on the wire.
    Action(Command),
    /// Free text from the debugger, sent verbatim exactly once.
    Raw(String),
}

/// Commands the UI sends to the Bluetooth worker thread.
#[derive(Debug, Clone)]
pub enum LinkCommand {
    Connect,
    Disconnect,
    Send(SendRequest),
}

/// Events the Bluetooth worker reports back to the UI.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConnectionState(ConnectionState),
    Log(StatusMessage),
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Drive,
    Programming,
    Debugger,
    Settings,
}

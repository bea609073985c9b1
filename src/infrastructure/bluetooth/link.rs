//! Connection manager for the vehicle's UART link.
//!
//! [`UartLink`] owns the connection state machine
//! `Disconnected -> Connecting -> Discovering -> Connected` and is the
//! only place that mutates it. Every outcome, good or bad, is surfaced
//! to the UI as a log line; nothing is retried and nothing is fatal.

use crate::domain::commands::{Command, COMMAND_REPEAT};
use crate::domain::models::{AppEvent, ConnectionState, MessageSeverity, SendRequest, StatusMessage};
use crate::domain::settings::Settings;
use crate::infrastructure::bluetooth::client::{ClientError, GattClient};
use crate::infrastructure::bluetooth::uart;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything the link needs to know about the peer.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub address: String,
    pub service_uuid: Uuid,
    pub characteristic_uuid: Uuid,
}

impl LinkConfig {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            address: settings.device_address.clone(),
            service_uuid: uart::parse_uuid(&settings.uart_service_uuid)?,
            characteristic_uuid: uart::parse_uuid(&settings.uart_characteristic_uuid)?,
        })
    }
}

pub struct UartLink<C> {
    client: C,
    config: LinkConfig,
    state: ConnectionState,
    /// True once the writable characteristic has been resolved. A link
    /// can be Connected yet unusable when discovery failed.
    uart_ready: bool,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl<C: GattClient> UartLink<C> {
    pub fn new(client: C, config: LinkConfig, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            client,
            config,
            state: ConnectionState::Disconnected,
            uart_ready: false,
            events,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Swap the peer configuration. Ignored while a session is active.
    pub fn set_config(&mut self, config: LinkConfig) {
        if self.state == ConnectionState::Disconnected {
            self.config = config;
        }
    }

    /// Bring the link up and resolve the UART characteristic.
    ///
    /// Service or characteristic lookup failure leaves the connection
    /// open but unusable for writes; no automatic retry.
    pub async fn connect(&mut self) {
        if self.state != ConnectionState::Disconnected {
            return;
        }

        self.set_state(ConnectionState::Connecting);
        self.log("Connecting...", MessageSeverity::Info);

        if let Err(e) = self.client.connect(&self.config.address).await {
            warn!("Connect failed: {e}");
            self.log(format!("Error: {e}."), MessageSeverity::Error);
            self.set_state(ConnectionState::Disconnected);
            return;
        }

        self.set_state(ConnectionState::Discovering);
        self.log("Connected. Discovering services...", MessageSeverity::Info);

        match self
            .client
            .resolve_uart(self.config.service_uuid, self.config.characteristic_uuid)
            .await
        {
            Ok(()) => {
                self.uart_ready = true;
                self.log(
                    "UART characteristic found. Ready.",
                    MessageSeverity::Success,
                );
            }
            Err(e) => {
                warn!("Discovery failed: {e}");
                self.log(format!("Error: {e}."), MessageSeverity::Error);
            }
        }

        // The link is up either way; writes stay gated on uart_ready.
        self.set_state(ConnectionState::Connected);
    }

    /// Transmit a request. Rejected locally with a single log line when
    /// the link is not Connected or the characteristic is unresolved.
    pub async fn send(&mut self, request: &SendRequest) {
        if self.state != ConnectionState::Connected || !self.uart_ready {
            self.log("Cannot send: no connection.", MessageSeverity::Warning);
            return;
        }

        match request {
            SendRequest::Action(command) => {
                let payload = [command.byte()];
                for _ in 0..COMMAND_REPEAT {
                    if let Err(e) = self.client.write(&payload).await {
                        warn!("Write failed: {e}");
                        self.log(format!("Error: write failed: {e}."), MessageSeverity::Error);
                        return;
                    }
                }
                self.log(
                    format!("Sent: {} (x{COMMAND_REPEAT})", command.code()),
                    MessageSeverity::Info,
                );
            }
            SendRequest::Raw(text) => {
                if let Err(e) = self.client.write(text.as_bytes()).await {
                    warn!("Write failed: {e}");
                    self.log(format!("Error: write failed: {e}."), MessageSeverity::Error);
                    return;
                }
                self.log(format!("Sent: {text}"), MessageSeverity::Info);
            }
        }
    }

    /// Request teardown. The state changes only once the platform
    /// confirms, via the resolved call or [`Self::on_link_down`].
    pub async fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        match self.client.disconnect().await {
            // The platform holding no link is as confirmed as it gets.
            Ok(()) | Err(ClientError::NotConnected) => self.on_link_down(),
            Err(e) => {
                warn!("Disconnect failed: {e}");
                self.log(format!("Error: disconnect failed: {e}."), MessageSeverity::Error);
            }
        }
    }

    /// Platform reported the link down, solicited or not. Idempotent;
    /// logs exactly one line per actual transition.
    pub fn on_link_down(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        info!("Link down");
        self.uart_ready = false;
        self.set_state(ConnectionState::Disconnected);
        self.log("Disconnected.", MessageSeverity::Info);
    }

    fn set_state(&mut self, state: ConnectionState) {
        self.state = state;
        let _ = self.events.send(AppEvent::ConnectionState(state));
    }

    fn log(&self, message: impl Into<String>, severity: MessageSeverity) {
        let _ = self
            .events
            .send(AppEvent::Log(StatusMessage::new(message, severity)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::client::ClientError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every write; failures are injected per call site.
    #[derive(Default)]
    struct MockGatt {
        writes: Arc<Mutex<Vec<Vec<u8>>>>,
        connect_error: Option<ClientError>,
        resolve_error: Option<ClientError>,
        disconnect_error: Option<ClientError>,
        connected: bool,
    }

    impl MockGatt {
        fn recording(writes: Arc<Mutex<Vec<Vec<u8>>>>) -> Self {
            Self {
                writes,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl GattClient for MockGatt {
        async fn connect(&mut self, _address: &str) -> Result<(), ClientError> {
            match self.connect_error.take() {
                Some(e) => Err(e),
                None => {
                    self.connected = true;
                    Ok(())
                }
            }
        }

        async fn resolve_uart(
            &mut self,
            _service: Uuid,
            _characteristic: Uuid,
        ) -> Result<(), ClientError> {
            match self.resolve_error.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn write(&mut self, payload: &[u8]) -> Result<(), ClientError> {
            if !self.connected {
                return Err(ClientError::NotConnected);
            }
            self.writes.lock().unwrap().push(payload.to_vec());
            Ok(())
        }

        async fn disconnect(&mut self) -> Result<(), ClientError> {
            match self.disconnect_error.take() {
                Some(e) => Err(e),
                None => {
                    self.connected = false;
                    Ok(())
                }
            }
        }

        fn watch_link_down(&mut self, _notify: mpsc::UnboundedSender<()>) {}
    }

    fn test_config() -> LinkConfig {
        LinkConfig::from_settings(&Settings::default()).unwrap()
    }

    fn new_link(
        client: MockGatt,
    ) -> (UartLink<MockGatt>, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (UartLink::new(client, test_config(), tx), rx)
    }

    fn drain_logs(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<String> {
        let mut logs = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Log(msg) = event {
                logs.push(msg.message);
            }
        }
        logs
    }

    #[tokio::test]
    async fn connect_resolves_characteristic_then_sends_four_writes() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let (mut link, mut rx) = new_link(MockGatt::recording(writes.clone()));

        link.connect().await;
        assert_eq!(link.state(), ConnectionState::Connected);
        let logs = drain_logs(&mut rx);
        assert!(logs.last().unwrap().contains("characteristic found"));

        link.send(&SendRequest::Action(Command::Up)).await;
        let recorded = writes.lock().unwrap();
        assert_eq!(recorded.len(), COMMAND_REPEAT);
        assert!(recorded.iter().all(|w| w == &vec![0x41]));
    }

    #[tokio::test]
    async fn send_while_disconnected_never_reaches_transport() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let (mut link, mut rx) = new_link(MockGatt::recording(writes.clone()));

        link.send(&SendRequest::Action(Command::Stop)).await;

        assert!(writes.lock().unwrap().is_empty());
        let logs = drain_logs(&mut rx);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Cannot send"));
    }

    #[tokio::test]
    async fn free_text_is_sent_once_verbatim() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let (mut link, mut rx) = new_link(MockGatt::recording(writes.clone()));

        link.connect().await;
        drain_logs(&mut rx);
        link.send(&SendRequest::Raw("hola carrito".to_string())).await;

        let recorded = writes.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], b"hola carrito".to_vec());
    }

    #[tokio::test]
    async fn missing_characteristic_leaves_link_open_but_unusable() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let mut client = MockGatt::recording(writes.clone());
        client.resolve_error = Some(ClientError::CharacteristicNotFound);
        let (mut link, mut rx) = new_link(client);

        link.connect().await;
        assert_eq!(link.state(), ConnectionState::Connected);
        assert!(drain_logs(&mut rx)
            .iter()
            .any(|l| l.contains("characteristic not found")));

        link.send(&SendRequest::Action(Command::Up)).await;
        assert!(writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn adapter_unavailable_aborts_and_returns_to_disconnected() {
        let mut client = MockGatt::default();
        client.connect_error = Some(ClientError::AdapterUnavailable);
        let (mut link, mut rx) = new_link(client);

        link.connect().await;

        assert_eq!(link.state(), ConnectionState::Disconnected);
        assert!(drain_logs(&mut rx).iter().any(|l| l.contains("adapter")));
    }

    #[tokio::test]
    async fn disconnect_logs_exactly_once_and_is_idempotent() {
        let (mut link, mut rx) = new_link(MockGatt::default());

        link.connect().await;
        drain_logs(&mut rx);
        assert_eq!(link.state(), ConnectionState::Connected);

        link.disconnect().await;
        assert_eq!(link.state(), ConnectionState::Disconnected);
        let logs = drain_logs(&mut rx);
        assert_eq!(
            logs.iter().filter(|l| l.as_str() == "Disconnected.").count(),
            1
        );

        // Late platform event for the same teardown adds nothing.
        link.on_link_down();
        assert!(drain_logs(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn failed_teardown_keeps_link_usable_for_a_retry() {
        let mut client = MockGatt::default();
        client.disconnect_error = Some(ClientError::Backend("adapter busy".to_string()));
        let (mut link, mut rx) = new_link(client);

        link.connect().await;
        drain_logs(&mut rx);

        // First attempt fails: no confirmation, so no state change.
        link.disconnect().await;
        assert_eq!(link.state(), ConnectionState::Connected);
        assert!(drain_logs(&mut rx)
            .iter()
            .any(|l| l.contains("disconnect failed")));

        // The transport handle survived, so a retry can complete.
        link.disconnect().await;
        assert_eq!(link.state(), ConnectionState::Disconnected);
        let logs = drain_logs(&mut rx);
        assert_eq!(
            logs.iter().filter(|l| l.as_str() == "Disconnected.").count(),
            1
        );
    }

    #[tokio::test]
    async fn teardown_without_a_platform_link_counts_as_confirmed() {
        let mut client = MockGatt::default();
        client.disconnect_error = Some(ClientError::NotConnected);
        let (mut link, mut rx) = new_link(client);

        link.connect().await;
        drain_logs(&mut rx);

        link.disconnect().await;
        assert_eq!(link.state(), ConnectionState::Disconnected);
        let logs = drain_logs(&mut rx);
        assert_eq!(logs, vec!["Disconnected.".to_string()]);
    }

    #[tokio::test]
    async fn connect_is_a_no_op_unless_disconnected() {
        let (mut link, mut rx) = new_link(MockGatt::default());

        link.connect().await;
        drain_logs(&mut rx);

        link.connect().await;
        assert!(drain_logs(&mut rx).is_empty());
    }
}

//! GATT client seam.
//!
//! [`GattClient`] is the narrow surface the connection manager drives:
//! connect to one peer, resolve the UART characteristic, write bytes,
//! tear down. [`BleUartClient`] implements it on top of btleplug; tests
//! substitute a mock.

use async_trait::async_trait;
use btleplug::api::{
    BDAddr, Central, CentralEvent, Characteristic, Manager as _, Peripheral as _, ScanFilter,
    WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral, PeripheralId};
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long to wait for the peer to show up after a connect request.
const DISCOVERY_WINDOW_MS: u64 = 500;
const DISCOVERY_ATTEMPTS: u32 = 20;

/// Local error taxonomy for BLE operations. Every variant ends up as a
/// log line, never as a process failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Bluetooth adapter unavailable or disabled")]
    AdapterUnavailable,
    #[error("Bluetooth permission denied")]
    PermissionDenied,
    #[error("device not found")]
    DeviceNotFound,
    #[error("UART service not found")]
    ServiceNotFound,
    #[error("UART characteristic not found")]
    CharacteristicNotFound,
    #[error("not connected")]
    NotConnected,
    #[error("invalid device address: {0}")]
    InvalidAddress(String),
    #[error("bluetooth error: {0}")]
    Backend(String),
}

impl From<btleplug::Error> for ClientError {
    fn from(err: btleplug::Error) -> Self {
        match err {
            btleplug::Error::PermissionDenied => ClientError::PermissionDenied,
            btleplug::Error::DeviceNotFound => ClientError::DeviceNotFound,
            btleplug::Error::NotConnected => ClientError::NotConnected,
            other => ClientError::Backend(other.to_string()),
        }
    }
}

/// Platform GATT surface used by the connection manager.
#[async_trait]
pub trait GattClient {
    /// Reach the peer at `address` and bring the link up.
    async fn connect(&mut self, address: &str) -> Result<(), ClientError>;

    /// Discover services and resolve the writable UART characteristic.
    async fn resolve_uart(
        &mut self,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<(), ClientError>;

    /// Fire-and-forget write of `payload` to the resolved characteristic.
    async fn write(&mut self, payload: &[u8]) -> Result<(), ClientError>;

    /// Request link teardown; resolves on platform confirmation.
    async fn disconnect(&mut self) -> Result<(), ClientError>;

    /// Register a channel that is pinged when the platform reports the
    /// link down (solicited or not).
    fn watch_link_down(&mut self, notify: mpsc::UnboundedSender<()>);
}

/// btleplug-backed client. One adapter, one peripheral, one characteristic.
#[derive(Default)]
pub struct BleUartClient {
    adapter: Option<Adapter>,
    peripheral: Option<Peripheral>,
    uart: Option<Characteristic>,
    link_down_tx: Option<mpsc::UnboundedSender<()>>,
}

impl BleUartClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the peer among scanned peripherals, polling until the
    /// discovery window closes.
    async fn find_peripheral(
        adapter: &Adapter,
        target: BDAddr,
    ) -> Result<Peripheral, ClientError> {
        for attempt in 0..DISCOVERY_ATTEMPTS {
            for peripheral in adapter.peripherals().await? {
                if peripheral.address() == target {
                    debug!("Peer located after {} poll(s)", attempt + 1);
                    return Ok(peripheral);
                }
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(DISCOVERY_WINDOW_MS)).await;
        }
        Err(ClientError::DeviceNotFound)
    }

    fn spawn_link_down_watcher(
        adapter: Adapter,
        peer: PeripheralId,
        notify: mpsc::UnboundedSender<()>,
    ) {
        tokio::spawn(async move {
            let mut events = match adapter.events().await {
                Ok(events) => events,
                Err(e) => {
                    warn!("Could not subscribe to adapter events: {e}");
                    return;
                }
            };
            // One watcher per session: forward the drop once, then exit
            // so reconnect cycles do not stack listeners.
            while let Some(event) = events.next().await {
                if let CentralEvent::DeviceDisconnected(id) = event {
                    if id == peer {
                        let _ = notify.send(());
                        break;
                    }
                }
            }
        });
    }
}

#[async_trait]
impl GattClient for BleUartClient {
    async fn connect(&mut self, address: &str) -> Result<(), ClientError> {
        let target: BDAddr = address
            .parse()
            .map_err(|_| ClientError::InvalidAddress(address.to_string()))?;

        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::AdapterUnavailable)?;

        // No scanning UI exists; the scan only makes the known peer
        // visible to the platform so it can be connected directly.
        adapter.start_scan(ScanFilter::default()).await?;
        let found = Self::find_peripheral(&adapter, target).await;
        let _ = adapter.stop_scan().await;
        let peripheral = found?;

        info!("Connecting to {target}");
        peripheral.connect().await?;

        if let Some(notify) = self.link_down_tx.clone() {
            Self::spawn_link_down_watcher(adapter.clone(), peripheral.id(), notify);
        }

        self.adapter = Some(adapter);
        self.peripheral = Some(peripheral);
        Ok(())
    }

    async fn resolve_uart(
        &mut self,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<(), ClientError> {
        let peripheral = self.peripheral.as_ref().ok_or(ClientError::NotConnected)?;

        peripheral.discover_services().await?;

        let uart_service = peripheral
            .services()
            .into_iter()
            .find(|s| s.uuid == service)
            .ok_or(ClientError::ServiceNotFound)?;

        let uart = uart_service
            .characteristics
            .into_iter()
            .find(|c| c.uuid == characteristic)
            .ok_or(ClientError::CharacteristicNotFound)?;

        info!("Resolved UART characteristic {characteristic}");
        self.uart = Some(uart);
        Ok(())
    }

    async fn write(&mut self, payload: &[u8]) -> Result<(), ClientError> {
        let peripheral = self.peripheral.as_ref().ok_or(ClientError::NotConnected)?;
        let uart = self.uart.as_ref().ok_or(ClientError::NotConnected)?;

        peripheral
            .write(uart, payload, WriteType::WithoutResponse)
            .await?;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ClientError> {
        // The handle is kept on failure so teardown can be retried.
        let peripheral = self.peripheral.as_ref().ok_or(ClientError::NotConnected)?;
        peripheral.disconnect().await?;
        self.peripheral = None;
        self.uart = None;
        Ok(())
    }

    fn watch_link_down(&mut self, notify: mpsc::UnboundedSender<()>) {
        self.link_down_tx = Some(notify);
    }
}

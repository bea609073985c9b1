//! UART-over-BLE contract of the carrito.
//!
//! The vehicle exposes a single vendor GATT service with one writable
//! characteristic, accepting ASCII byte writes without response. One
//! well-known peer, no discovery UI.

use anyhow::{Context, Result};
use uuid::Uuid;

/// Vendor UART service (HM-10 style module on the vehicle).
pub const UART_SERVICE_UUID: &str = "0000ffe0-0000-1000-8000-00805f9b34fb";

/// Writable UART characteristic inside [`UART_SERVICE_UUID`].
pub const UART_CHARACTERISTIC_UUID: &str = "0000ffe1-0000-1000-8000-00805f9b34fb";

/// The one peer the app talks to.
pub const DEFAULT_DEVICE_ADDRESS: &str = "F4:45:F4:1D:B4:88";

/// Parse a UUID string from settings.
pub fn parse_uuid(uuid_str: &str) -> Result<Uuid> {
    Uuid::parse_str(uuid_str).with_context(|| format!("Invalid UUID: {uuid_str}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_uuids_parse() {
        let service = parse_uuid(UART_SERVICE_UUID).unwrap();
        let characteristic = parse_uuid(UART_CHARACTERISTIC_UUID).unwrap();
        assert_eq!(service.as_fields().0, 0x0000ffe0);
        assert_eq!(characteristic.as_fields().0, 0x0000ffe1);
    }

    #[test]
    fn junk_uuid_is_rejected() {
        assert!(parse_uuid("not-a-uuid").is_err());
    }
}

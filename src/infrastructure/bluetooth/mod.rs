//! Bluetooth module
//!
//! BLE communication with the carrito over its UART characteristic.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                    UartLink                     │
//! │   (connection state machine + write dispatch)   │
//! └──────────────────────┬─────────────────────────┘
//!                        │ GattClient trait
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!     ┌────────────┐          ┌────────────┐
//!     │ BleUartClient│        │ mock (tests)│
//!     │  (btleplug) │         └────────────┘
//!     └────────────┘
//! ```
//!
//! - [`uart`] - peripheral contract: UUIDs and peer address
//! - [`client`] - the platform GATT seam and its btleplug implementation
//! - [`link`] - the connection manager driven by the worker thread

pub mod client;
pub mod link;
pub mod uart;

pub use client::BleUartClient;
pub use link::{LinkConfig, UartLink};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "never"
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            console_logging_enabled: default_true(),
            file_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            rotation: default_rotation(),
            ansi_colors: default_true(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "carrito_remote".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Peer address of the vehicle, colon-separated hex.
    #[serde(default = "default_device_address")]
    pub device_address: String,

    // UART contract of the peripheral
    #[serde(default = "default_service_uuid")]
    pub uart_service_uuid: String,
    #[serde(default = "default_characteristic_uuid")]
    pub uart_characteristic_uuid: String,

    #[serde(default)]
    pub log_settings: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_address: default_device_address(),
            uart_service_uuid: default_service_uuid(),
            uart_characteristic_uuid: default_characteristic_uuid(),
            log_settings: LogSettings::default(),
        }
    }
}

fn default_device_address() -> String {
    crate::infrastructure::bluetooth::uart::DEFAULT_DEVICE_ADDRESS.to_string()
}
fn default_service_uuid() -> String {
    crate::infrastructure::bluetooth::uart::UART_SERVICE_UUID.to_string()
}
fn default_characteristic_uuid() -> String {
    crate::infrastructure::bluetooth::uart::UART_CHARACTERISTIC_UUID.to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();

        Ok(Self {
            settings,
            settings_path,
        })
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("CarritoRemote");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &PathBuf) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_peripheral_contract() {
        let settings = Settings::default();
        assert_eq!(settings.device_address, "F4:45:F4:1D:B4:88");
        assert!(settings.uart_service_uuid.starts_with("0000ffe0"));
        assert!(settings.uart_characteristic_uuid.starts_with("0000ffe1"));
    }

    #[test]
    fn settings_survive_a_json_round_trip() {
        let mut settings = Settings::default();
        settings.device_address = "AA:BB:CC:DD:EE:FF".to_string();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.device_address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(back.log_settings.level, "info");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(back.device_address, "F4:45:F4:1D:B4:88");
        assert!(back.log_settings.file_logging_enabled);
    }
}

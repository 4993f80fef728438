//! Root application configuration

use serde::{Deserialize, Serialize};

use super::{ServerConfig, StoreConfig};

/// Port used when the configuration does not set one
const DEFAULT_PORT: u16 = 5000;

/// Root configuration loaded once at startup and handed to the runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the service instance
    pub name: String,

    /// Server configuration (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Create a new configuration with the given name and default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: None,
            store: StoreConfig::default(),
        }
    }

    /// Replace the store configuration
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Override the configured port
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.get_or_insert_with(ServerConfig::default).port = Some(port.to_string());
        self
    }

    /// Get the bind host, defaulting to 0.0.0.0
    pub fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or("0.0.0.0")
    }

    /// Get the server port, defaulting to 5000
    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port.as_ref())
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// Get the log level, defaulting to 1 (INFO)
    pub fn log_level(&self) -> u8 {
        self.server
            .as_ref()
            .and_then(|s| s.log_level)
            .unwrap_or(1)
    }

    /// Directory of static client assets, if any
    pub fn static_dir(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.static_dir.as_deref())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new("todos")
    }
}

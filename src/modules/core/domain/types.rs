//! Server and store configuration types

use serde::{Deserialize, Serialize};
use todos_types::StoreBackend;

/// Collection holding todo documents
pub const TODOS_COLLECTION: &str = "todos";

/// Database used when the configuration does not name one
pub const DEFAULT_DATABASE: &str = "todos";

/// Connection pool configuration for the document store client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool (default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    /// Minimum number of connections to maintain (default: 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_connections: Option<u32>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: Some(10),
            min_connections: Some(1),
        }
    }
}

impl PoolConfig {
    /// Get max connections with default fallback
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(10)
    }

    /// Get min connections with default fallback
    pub fn min_connections(&self) -> u32 {
        self.min_connections.unwrap_or(1)
    }
}

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port to listen on (default: 5000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// Log level: 0=DEBUG, 1=INFO, 2=WARN, 3=ERROR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<u8>,

    /// Directory of browser client assets served under /static
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend holds the todos
    #[serde(default)]
    pub backend: StoreBackend,

    /// Connection URL (supports environment variable substitution)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Database name (default: "todos")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Connection pool configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolConfig>,
}

impl StoreConfig {
    /// In-process store, used for local runs and tests
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: None,
            database: None,
            pool: None,
        }
    }

    /// MongoDB store at `url`
    pub fn mongodb(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            url: Some(url.into()),
            database: None,
            pool: None,
        }
    }

    /// Database name with default fallback
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Pool configuration with default fallback
    pub fn pool(&self) -> PoolConfig {
        self.pool.clone().unwrap_or_default()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::mongodb("mongodb://localhost:27017")
    }
}

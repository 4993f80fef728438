//! YAML configuration parser

use serde::Deserialize;
use todos_core::{AppConfig, PoolConfig, ServerConfig, StoreConfig, TodoError};
use todos_types::StoreBackend;

use crate::env::EnvSubstitutor;

/// YAML parser for todos configuration files
pub struct YamlParser;

/// On-disk schema. Scalars are kept loose so values produced by
/// environment substitution (always strings) still deserialize.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    server: Option<RawServer>,

    #[serde(default)]
    store: Option<RawStore>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    #[serde(default)]
    host: Option<String>,

    #[serde(default)]
    port: Option<serde_yaml::Value>,

    #[serde(default)]
    log_level: Option<serde_yaml::Value>,

    #[serde(default)]
    static_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStore {
    #[serde(default)]
    backend: Option<String>,

    #[serde(default)]
    url: Option<String>,

    /// Alternate field name for `url`.
    #[serde(default)]
    connection_string: Option<String>,

    #[serde(default)]
    database: Option<String>,

    /// Alternate field name for `database`.
    #[serde(default)]
    db_name: Option<String>,

    #[serde(default)]
    pool: Option<RawPool>,
}

#[derive(Debug, Deserialize)]
struct RawPool {
    #[serde(default)]
    max_connections: Option<serde_yaml::Value>,

    #[serde(default)]
    min_connections: Option<serde_yaml::Value>,
}

impl YamlParser {
    /// Parse a YAML string into an AppConfig
    pub fn parse(content: &str) -> Result<AppConfig, TodoError> {
        Self::parse_with(content, &EnvSubstitutor::new())
    }

    /// Parse a YAML string, resolving placeholders with the given substitutor
    pub fn parse_with(content: &str, substitutor: &EnvSubstitutor) -> Result<AppConfig, TodoError> {
        let substituted = substitutor.substitute(content)?;
        Self::parse_raw(&substituted)
    }

    /// Parse a YAML string without environment variable substitution
    pub fn parse_raw(content: &str) -> Result<AppConfig, TodoError> {
        let raw = serde_yaml::from_str::<RawConfig>(content)
            .map_err(|e| TodoError::Config(format!("YAML parse error: {}", e)))?;
        raw_to_config(raw)
    }
}

fn raw_to_config(raw: RawConfig) -> Result<AppConfig, TodoError> {
    let mut config = AppConfig::new(raw.name.unwrap_or_else(|| "todos".to_string()));

    if let Some(server) = raw.server {
        let log_level = match server.log_level.and_then(yaml_scalar_to_string) {
            None => None,
            Some(level) => Some(level.parse::<u8>().map_err(|_| {
                TodoError::Config(format!("server.log_level must be 0-3, got '{}'", level))
            })?),
        };

        config.server = Some(ServerConfig {
            host: server.host,
            port: server.port.and_then(yaml_scalar_to_string),
            log_level,
            static_dir: server.static_dir,
        });
    }

    if let Some(store) = raw.store {
        let backend = match store.backend {
            None => StoreBackend::default(),
            Some(name) => name.parse::<StoreBackend>().map_err(TodoError::Config)?,
        };

        let pool = match store.pool {
            None => None,
            Some(pool) => Some(PoolConfig {
                max_connections: parse_count("store.pool.max_connections", pool.max_connections)?,
                min_connections: parse_count("store.pool.min_connections", pool.min_connections)?,
            }),
        };

        config.store = StoreConfig {
            backend,
            url: store.url.or(store.connection_string),
            database: store.database.or(store.db_name),
            pool,
        };
    }

    Ok(config)
}

fn parse_count(field: &str, value: Option<serde_yaml::Value>) -> Result<Option<u32>, TodoError> {
    match value.and_then(yaml_scalar_to_string) {
        None => Ok(None),
        Some(s) => s.parse::<u32>().map(Some).map_err(|_| {
            TodoError::Config(format!("{} must be a non-negative integer, got '{}'", field, s))
        }),
    }
}

fn yaml_scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.trim().to_string()),
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim().to_string()),
    }
}

//! Configuration validation

use once_cell::sync::Lazy;
use regex::Regex;
use todos_core::{AppConfig, StoreConfig, TodoError};

/// Regex pattern for valid names (lower-kebab-case or lower_snake_case)
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)*$").unwrap()
});

/// Characters MongoDB does not allow in database names
const FORBIDDEN_DB_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$'];

/// MongoDB caps database names at 64 bytes
const MAX_DB_NAME_LEN: usize = 64;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the entire configuration
    pub fn validate(&self, config: &AppConfig) -> Result<(), TodoError> {
        self.validate_name(&config.name)?;
        self.validate_server(config)?;
        self.validate_store(&config.store)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), TodoError> {
        if name.is_empty() {
            return Err(TodoError::Validation("Name cannot be empty".to_string()));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(TodoError::Validation(format!(
                "Invalid name '{}': must be lower-kebab-case or lower_snake_case",
                name
            )));
        }

        Ok(())
    }

    fn validate_server(&self, config: &AppConfig) -> Result<(), TodoError> {
        let Some(server) = &config.server else {
            return Ok(());
        };

        if let Some(port) = &server.port {
            match port.parse::<u16>() {
                Ok(p) if p > 0 => {}
                _ => {
                    return Err(TodoError::Validation(format!(
                        "Invalid port '{}': must be between 1 and 65535",
                        port
                    )))
                }
            }
        }

        if let Some(level) = server.log_level {
            if level > 3 {
                return Err(TodoError::Validation(format!(
                    "Invalid log_level {}: must be 0 (DEBUG) to 3 (ERROR)",
                    level
                )));
            }
        }

        if let Some(host) = &server.host {
            if host.trim().is_empty() {
                return Err(TodoError::Validation("Host cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    fn validate_store(&self, store: &StoreConfig) -> Result<(), TodoError> {
        if store.backend.requires_url() {
            let url = store.url.as_deref().unwrap_or("").trim();
            if url.is_empty() {
                return Err(TodoError::Validation(format!(
                    "Store backend '{}' requires a url",
                    store.backend
                )));
            }
            if !(url.starts_with("mongodb://") || url.starts_with("mongodb+srv://")) {
                return Err(TodoError::Validation(
                    "Store url must start with mongodb:// or mongodb+srv://".to_string(),
                ));
            }
        }

        let database = store.database();
        if database.is_empty() {
            return Err(TodoError::Validation(
                "Database name cannot be empty".to_string(),
            ));
        }
        if database.len() > MAX_DB_NAME_LEN {
            return Err(TodoError::Validation(format!(
                "Database name '{}' is longer than {} bytes",
                database, MAX_DB_NAME_LEN
            )));
        }
        if database.contains(FORBIDDEN_DB_CHARS) {
            return Err(TodoError::Validation(format!(
                "Database name '{}' contains a forbidden character",
                database
            )));
        }

        if let Some(pool) = &store.pool {
            if pool.min_connections() > pool.max_connections() {
                return Err(TodoError::Validation(format!(
                    "Pool min_connections ({}) exceeds max_connections ({})",
                    pool.min_connections(),
                    pool.max_connections()
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

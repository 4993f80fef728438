//! Configuration parsing for the todos service
//!
//! This crate handles parsing of YAML configuration files,
//! validation, and environment variable substitution.

pub mod env;
pub mod validator;
pub mod yaml;

pub use env::EnvSubstitutor;
pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use todos_core::{AppConfig, TodoError};

/// Parse a configuration file from a path
pub fn parse_file(path: &str) -> Result<AppConfig, TodoError> {
    parse_string(&read_file(path)?)
}

/// Load a configuration file without validating it.
///
/// Callers that adjust the config afterwards validate the final result
/// with [`ConfigValidator`].
pub fn load_file(path: &str, substitutor: &EnvSubstitutor) -> Result<AppConfig, TodoError> {
    YamlParser::parse_with(&read_file(path)?, substitutor)
}

fn read_file(path: &str) -> Result<String, TodoError> {
    std::fs::read_to_string(path)
        .map_err(|e| TodoError::Config(format!("Failed to read file '{}': {}", path, e)))
}

/// Parse a configuration from a string
pub fn parse_string(content: &str) -> Result<AppConfig, TodoError> {
    let config = YamlParser::parse(content)?;

    let validator = ConfigValidator::new();
    validator.validate(&config)?;

    Ok(config)
}

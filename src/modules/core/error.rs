//! Error types for the todos service

use thiserror::Error;

/// Main error type for todos operations
#[derive(Error, Debug)]
pub enum TodoError {
    /// Configuration file parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Path identifier is not in the store's identifier format
    #[error("Invalid todo id: {0}")]
    InvalidIdentifier(String),

    /// No todo exists for a well-formed identifier
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Document store error (connection, driver, command failure)
    #[error("Store error: {0}")]
    Store(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    /// Returns true if this error should be logged at error level
    pub fn is_error(&self) -> bool {
        matches!(self, TodoError::Store(_) | TodoError::Server(_))
    }

    /// Returns true if this error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TodoError::InvalidIdentifier(_) | TodoError::NotFound(_)
        )
    }

    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::InvalidIdentifier(_) => 400,
            TodoError::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Sanitize the error message to avoid leaking sensitive information
    pub fn sanitized_message(&self) -> String {
        match self {
            // Driver errors can carry connection strings
            TodoError::Store(_) => "Database error".to_string(),
            _ => self.to_string(),
        }
    }
}

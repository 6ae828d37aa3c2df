use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the log locator
#[derive(Debug, Error)]
pub enum VcclogError {
    // Discovery errors
    #[error("Cannot read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read metadata for {}: {source}", path.display())]
    StatFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for locator operations
pub type Result<T> = std::result::Result<T, VcclogError>;

//! Error types for expo-mcp.

use thiserror::Error;

use crate::cli::ArgsError;
use crate::config::ConfigError;
use crate::execution::CommandError;

/// Main error type for expo-mcp operations.
#[derive(Error, Debug)]
pub enum ExpoMcpError {
    /// A tool invocation failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command-line arguments were invalid.
    #[error("argument error: {0}")]
    Args(#[from] ArgsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for expo-mcp operations.
pub type Result<T> = std::result::Result<T, ExpoMcpError>;

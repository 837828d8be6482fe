//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Script file missing or unreadable
    ScriptNotFound(String),
    /// Malformed simulation script
    InvalidScript(String),
    /// Store file unreadable or corrupt
    StoreError(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ScriptNotFound(path) => write!(f, "Script not found: {path}"),
            CliError::InvalidScript(msg) => write!(f, "Invalid script: {msg}"),
            CliError::StoreError(msg) => write!(f, "Store error: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

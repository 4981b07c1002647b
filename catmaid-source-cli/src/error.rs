//! CLI error type.

use std::fmt;

use catmaid_source::config::ConfigError;
use catmaid_source::CatmaidError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is incomplete
    Config(String),
    /// Tokio runtime could not be started
    Runtime(std::io::Error),
    /// Output could not be serialized
    Serialize(String),
    /// Error from the CATMAID library
    Catmaid(CatmaidError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Serialize(msg) => write!(f, "Failed to serialize output: {}", msg),
            CliError::Catmaid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Catmaid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatmaidError> for CliError {
    fn from(e: CatmaidError) -> Self {
        CliError::Catmaid(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

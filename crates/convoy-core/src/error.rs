//! Error types for convoy.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convoy.
#[derive(Debug, Error)]
pub enum Error {
    /// Container not found in the registry.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// Compose file error.
    #[error("compose file error: {0}")]
    Compose(String),

    /// Container runtime error.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

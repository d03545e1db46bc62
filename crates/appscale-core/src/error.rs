//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Locations file not found: {path}")]
    ManifestNotFound { path: String },

    #[error("Failed to parse locations file: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("No node found with role: {role}")]
    RoleNotFound { role: String },

    #[error("Invalid App Engine configuration: {message}")]
    AppEngineConfig { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an App Engine configuration error
    pub fn app_engine(message: impl Into<String>) -> Self {
        Self::AppEngineConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

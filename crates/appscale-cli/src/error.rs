//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;
use appscale_core::CoreError;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Locations manifest missing, malformed, or role not present
    #[error("Manifest error: {message}")]
    #[diagnostic(code(appscale::cli::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Thread-safety declaration missing or invalid
    #[error("Descriptor error: {message}")]
    #[diagnostic(code(appscale::cli::descriptor))]
    Descriptor {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Credential prompt failed
    #[error("Credential error: {message}")]
    #[diagnostic(code(appscale::cli::credentials))]
    Credentials { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(appscale::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Manifest { .. } => exit_codes::MANIFEST_ERROR,
            CliError::Descriptor { .. } => exit_codes::DESCRIPTOR_ERROR,
            CliError::Credentials { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create a manifest error
    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
            help: None,
        }
    }

    /// Create a manifest error with help text
    pub fn manifest_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a descriptor error
    pub fn descriptor(message: impl Into<String>) -> Self {
        Self::Descriptor {
            message: message.into(),
            help: None,
        }
    }

    /// Create a credential error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ManifestNotFound { .. } => CliError::manifest_with_help(
                err.to_string(),
                "run this on the machine that started the deployment, or copy its ~/.appscale directory over",
            ),
            CoreError::ManifestParse(_) | CoreError::RoleNotFound { .. } => {
                CliError::manifest(err.to_string())
            }
            CoreError::AppEngineConfig { .. } => CliError::descriptor(err.to_string()),
            CoreError::Config { .. } => CliError::Io {
                message: err.to_string(),
            },
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            CliError::manifest("missing").exit_code(),
            exit_codes::MANIFEST_ERROR
        );
        assert_eq!(
            CliError::descriptor("bad").exit_code(),
            exit_codes::DESCRIPTOR_ERROR
        );
        assert_eq!(
            CliError::credentials("aborted").exit_code(),
            exit_codes::ERROR
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CliError = CoreError::RoleNotFound {
            role: "load_balancer".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Manifest { .. }));

        let err: CliError = CoreError::app_engine("no threadsafe").into();
        assert!(matches!(err, CliError::Descriptor { .. }));
    }
}

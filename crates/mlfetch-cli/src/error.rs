//! CLI-specific error types and mappings.
//!
//! Maps core service errors to the messages users see and to exit codes.

use mlfetch_core::{MaterializeError, RegistryPortError, ResolveError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The registry endpoint did not answer the connectivity check.
    #[error("please check your connection to mlflow server {url}")]
    Unreachable { url: String },

    /// Bad stage, unknown model, or nothing in the requested stage.
    #[error("{0}")]
    InvalidParameters(String),

    /// Any other registry failure during version resolution.
    #[error("{0}")]
    Registry(String),

    /// Artifact download failed.
    #[error("{0}")]
    Download(String),

    /// IO error (destination directory, marker file, log file).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Unreachable { .. } => 69, // EX_UNAVAILABLE
            Self::InvalidParameters(_) => 2,
            Self::Registry(_) | Self::Download(_) => 1,
            Self::Io(_) => 74, // EX_IOERR
        }
    }
}

impl From<RegistryPortError> for CliError {
    fn from(err: RegistryPortError) -> Self {
        match err {
            RegistryPortError::Unreachable { url, .. } => Self::Unreachable { url },
            other => Self::Registry(other.to_string()),
        }
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        if err.is_invalid_parameters() {
            return Self::InvalidParameters(err.to_string());
        }
        match err {
            ResolveError::Registry(port_err) => port_err.into(),
            other => Self::Registry(other.to_string()),
        }
    }
}

impl From<MaterializeError> for CliError {
    fn from(err: MaterializeError) -> Self {
        match err {
            MaterializeError::Download(_) => Self::Download(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

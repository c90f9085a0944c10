//! Error types for registry port operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from registry port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum RegistryPortError {
    /// The endpoint could not be reached at all.
    #[error("Registry at {url} is unreachable: {message}")]
    Unreachable {
        /// Endpoint that was probed
        url: String,
        /// Transport error description
        message: String,
    },

    /// The registered model does not exist.
    #[error("Registered model '{name}' not found in the registry")]
    ModelNotFound {
        /// Model name that was requested
        name: String,
    },

    /// The registry rejected a request parameter.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Message returned by the registry
        message: String,
    },

    /// Authentication required or rejected.
    #[error("Registry rejected the credentials (HTTP {status})")]
    AuthRequired {
        /// 401 or 403
        status: u16,
    },

    /// Any other unsuccessful API response.
    #[error("Registry API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error code and message from the registry
        message: String,
    },

    /// Network error after the connection was established.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The artifact store behind the model version is not one we can read.
    #[error("Unsupported artifact location: {uri}")]
    UnsupportedArtifactLocation {
        /// Artifact URI reported by the registry
        uri: String,
    },

    /// Local filesystem failure while materialising artifacts.
    #[error("I/O error at {}: {message}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// OS error description
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for registry port operations.
pub type RegistryPortResult<T> = Result<T, RegistryPortError>;

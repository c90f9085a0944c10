//! Internal error types for MLflow operations.
//!
//! These errors are internal to `mlfetch-registry` and are mapped to core port
//! errors at the boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for MLflow operations.
pub type MlflowResult<T> = Result<T, MlflowError>;

/// MLflow error code for unknown models and versions.
pub const RESOURCE_DOES_NOT_EXIST: &str = "RESOURCE_DOES_NOT_EXIST";
/// MLflow error code for rejected request parameters.
pub const INVALID_PARAMETER_VALUE: &str = "INVALID_PARAMETER_VALUE";

/// Errors related to MLflow REST operations.
#[derive(Debug, Error)]
pub enum MlflowError {
    /// The tracking server could not be reached.
    #[error("MLflow server {url} is unreachable: {message}")]
    Unreachable { url: String, message: String },

    /// API request failed with an HTTP error status.
    #[error("MLflow API request failed with status {status}: {url}{}", describe(.error_code.as_deref(), .message.as_deref()))]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// `error_code` from the response body, if any
        error_code: Option<String>,
        /// `message` from the response body, if any
        message: Option<String>,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from MLflow API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The model version's artifacts live in a store this client cannot read.
    #[error("Unsupported artifact location '{uri}'")]
    UnsupportedArtifactUri { uri: String },

    /// A listed artifact name would escape the destination directory.
    #[error("Refusing unsafe artifact path '{path}'")]
    UnsafeArtifactPath { path: String },

    /// Local filesystem error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn describe(code: Option<&str>, message: Option<&str>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" ({code}: {message})"),
        (Some(code), None) => format!(" ({code})"),
        (None, Some(message)) => format!(" ({message})"),
        (None, None) => String::new(),
    }
}

impl MlflowError {
    /// True when the registry says the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ApiRequestFailed {
                status, error_code, ..
            } => *status == 404 || error_code.as_deref() == Some(RESOURCE_DOES_NOT_EXIST),
            _ => false,
        }
    }

    /// True when the registry rejected a request parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::ApiRequestFailed { error_code: Some(code), .. } if code == INVALID_PARAMETER_VALUE
        )
    }
}

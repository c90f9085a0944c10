//! Port trait implementation for `MlflowClient`.
//!
//! Implements the core-owned `RegistryClientPort` for `MlflowClient`,
//! converting internal MLflow errors into core port errors.

use std::path::Path;

use async_trait::async_trait;
use mlfetch_core::{
    DownloadSummary, ModelStage, ModelUri, ModelVersion, RegistryClientPort, RegistryPortError,
    RegistryPortResult,
};

use crate::client::MlflowClient;
use crate::error::{INVALID_PARAMETER_VALUE, MlflowError};
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `MlflowError` to core `RegistryPortError`.
pub(crate) fn map_error(err: MlflowError) -> RegistryPortError {
    match err {
        MlflowError::ApiRequestFailed {
            error_code: Some(ref code),
            message,
            ..
        } if code == INVALID_PARAMETER_VALUE => RegistryPortError::InvalidParameter {
            message: message.unwrap_or_default(),
        },
        MlflowError::Unreachable { url, message } => RegistryPortError::Unreachable { url, message },
        MlflowError::ApiRequestFailed { status, .. } if status == 401 || status == 403 => {
            RegistryPortError::AuthRequired { status }
        }
        MlflowError::ApiRequestFailed {
            status,
            url,
            error_code,
            message,
        } => RegistryPortError::Api {
            status,
            message: match (error_code, message) {
                (Some(code), Some(message)) => format!("{code}: {message}"),
                (Some(text), None) | (None, Some(text)) => text,
                (None, None) => url,
            },
        },
        MlflowError::InvalidResponse { message } => RegistryPortError::InvalidResponse { message },
        MlflowError::UnsupportedArtifactUri { uri } => {
            RegistryPortError::UnsupportedArtifactLocation { uri }
        }
        MlflowError::UnsafeArtifactPath { path } => RegistryPortError::InvalidResponse {
            message: format!("unsafe artifact path '{path}'"),
        },
        MlflowError::Io { path, source } => RegistryPortError::Io {
            path,
            message: source.to_string(),
        },
        MlflowError::Network(e) => RegistryPortError::Network {
            message: e.to_string(),
        },
        MlflowError::InvalidUrl(e) => RegistryPortError::Configuration {
            message: e.to_string(),
        },
        MlflowError::JsonParse(e) => RegistryPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> RegistryClientPort for MlflowClient<B> {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn check_connection(&self) -> RegistryPortResult<()> {
        MlflowClient::check_connection(self).await.map_err(map_error)
    }

    async fn get_latest_versions(
        &self,
        name: &str,
        stage: ModelStage,
    ) -> RegistryPortResult<Vec<ModelVersion>> {
        MlflowClient::get_latest_versions(self, name, stage)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    RegistryPortError::ModelNotFound {
                        name: name.to_string(),
                    }
                } else {
                    map_error(err)
                }
            })
    }

    async fn download_artifacts(
        &self,
        uri: &ModelUri,
        dst: &Path,
    ) -> RegistryPortResult<DownloadSummary> {
        self.download_model_artifacts(uri, dst)
            .await
            .map_err(map_error)
    }
}

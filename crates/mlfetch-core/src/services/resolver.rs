//! Version resolution: requested stage → most recent model version.

use thiserror::Error;

use crate::domain::{ModelStage, ResolvedModel, StageParseError, select_latest};
use crate::ports::{RegistryClientPort, RegistryPortError};

/// Why a version could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The stage token is not one the registry recognises.
    #[error(transparent)]
    InvalidStage(#[from] StageParseError),

    /// The registered model does not exist.
    #[error("Registered model '{name}' not found in the registry")]
    ModelNotFound { name: String },

    /// The model exists but has nothing in the requested stage.
    #[error("No version of model '{name}' is in stage '{stage}'")]
    NoVersionsInStage { name: String, stage: ModelStage },

    /// Any other registry failure; reported as is.
    #[error("Failed to query the registry: {0}")]
    Registry(RegistryPortError),
}

impl ResolveError {
    /// True for the "bad invocation parameters" family of failures.
    pub const fn is_invalid_parameters(&self) -> bool {
        matches!(
            self,
            Self::InvalidStage(_) | Self::ModelNotFound { .. } | Self::NoVersionsInStage { .. }
        )
    }
}

/// Resolve the latest version of `model_name` in `requested_stage`.
///
/// The stage token is validated before any registry call is made.
pub async fn resolve_latest_version(
    client: &dyn RegistryClientPort,
    model_name: &str,
    requested_stage: &str,
) -> Result<ResolvedModel, ResolveError> {
    let stage: ModelStage = requested_stage.parse()?;

    let versions = client
        .get_latest_versions(model_name, stage)
        .await
        .map_err(|err| match err {
            RegistryPortError::InvalidParameter { message } => {
                tracing::debug!(%message, "registry rejected the stage");
                ResolveError::InvalidStage(StageParseError {
                    value: requested_stage.to_string(),
                })
            }
            RegistryPortError::ModelNotFound { .. } => ResolveError::ModelNotFound {
                name: model_name.to_string(),
            },
            other => ResolveError::Registry(other),
        })?;

    tracing::debug!(count = versions.len(), "registry returned versions");

    let latest = select_latest(&versions, stage).ok_or_else(|| ResolveError::NoVersionsInStage {
        name: model_name.to_string(),
        stage,
    })?;

    let resolved = ResolvedModel {
        name: model_name.to_string(),
        stage,
        version: latest.version.clone(),
    };

    tracing::info!(
        "Metadata was fetched successfully. Stage: {}, version: {}",
        resolved.stage,
        resolved.version
    );

    Ok(resolved)
}

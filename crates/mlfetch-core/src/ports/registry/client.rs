//! Registry client port trait.

use std::path::Path;

use async_trait::async_trait;

use super::error::RegistryPortResult;
use super::types::{DownloadSummary, ModelVersion};
use crate::domain::{ModelStage, ModelUri};

/// Port trait for model registry operations.
///
/// # Design
///
/// - Uses core-owned DTOs, not MLflow wire types
/// - Returns `RegistryPortError` for all failures
/// - Async methods for network operations
#[async_trait]
pub trait RegistryClientPort: Send + Sync {
    /// The endpoint this client targets, as configured.
    fn endpoint(&self) -> &str;

    /// Check that the endpoint answers at all.
    ///
    /// Any HTTP response counts as reachable; only transport failures
    /// (refused, DNS, timeout) are errors.
    async fn check_connection(&self) -> RegistryPortResult<()>;

    /// Latest versions of `name` currently in `stage`.
    ///
    /// The returned order is whatever the registry sends.
    async fn get_latest_versions(
        &self,
        name: &str,
        stage: ModelStage,
    ) -> RegistryPortResult<Vec<ModelVersion>>;

    /// Download every artifact file referenced by `uri` under `dst`.
    async fn download_artifacts(
        &self,
        uri: &ModelUri,
        dst: &Path,
    ) -> RegistryPortResult<DownloadSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn RegistryClientPort>) {}
}

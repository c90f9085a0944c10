//! Registered model version queries.

use mlfetch_core::{ModelStage, ModelVersion};

use crate::error::MlflowResult;
use crate::http::HttpBackend;
use crate::models::{DownloadUriResponse, LatestVersionsResponse};
use crate::url::{build_download_uri_url, build_latest_versions_url};

use super::MlflowClient;

impl<B: HttpBackend> MlflowClient<B> {
    /// Latest versions of `name` in `stage`, in the order MLflow returns them.
    pub(crate) async fn get_latest_versions(
        &self,
        name: &str,
        stage: ModelStage,
    ) -> MlflowResult<Vec<ModelVersion>> {
        let url = build_latest_versions_url(&self.config.base_url, name, stage);
        let response: LatestVersionsResponse = self.backend.get_json(&url).await?;
        Ok(response
            .model_versions
            .into_iter()
            .map(|v| v.into_model_version())
            .collect())
    }

    /// Where the artifacts of `name`/`version` are stored.
    pub(crate) async fn get_download_uri(&self, name: &str, version: &str) -> MlflowResult<String> {
        let url = build_download_uri_url(&self.config.base_url, name, version);
        let response: DownloadUriResponse = self.backend.get_json(&url).await?;
        Ok(response.artifact_uri)
    }
}

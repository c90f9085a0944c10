//! URL construction helpers for the MLflow REST API.
//!
//! Pure functions, so every endpoint is built the same way regardless of
//! whether the tracking URL carries a path prefix.

use mlfetch_core::ModelStage;
use url::Url;

use crate::models::ARTIFACTS_API_PATH;

const LATEST_VERSIONS_PATH: &str = "api/2.0/mlflow/registered-models/get-latest-versions";
const DOWNLOAD_URI_PATH: &str = "api/2.0/mlflow/model-versions/get-download-uri";

/// Append `suffix` to the base URL's path, keeping any prefix.
fn join_path(base: &Url, suffix: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{}", suffix.trim_start_matches('/')));
    url
}

/// Build the latest-versions query URL for one stage.
pub fn build_latest_versions_url(base: &Url, name: &str, stage: ModelStage) -> Url {
    let mut url = join_path(base, LATEST_VERSIONS_PATH);
    url.query_pairs_mut()
        .append_pair("name", name)
        .append_pair("stages", stage.as_str());
    url
}

/// Build the URL resolving a model version to its artifact location.
pub fn build_download_uri_url(base: &Url, name: &str, version: &str) -> Url {
    let mut url = join_path(base, DOWNLOAD_URI_PATH);
    url.query_pairs_mut()
        .append_pair("name", name)
        .append_pair("version", version);
    url
}

/// Build the artifact proxy listing URL for `path`.
pub fn build_list_artifacts_url(base: &Url, path: &str) -> Url {
    let mut url = join_path(base, ARTIFACTS_API_PATH);
    if !path.is_empty() {
        url.query_pairs_mut().append_pair("path", path);
    }
    url
}

/// Build the artifact proxy download URL for the file at `path`.
pub fn build_artifact_file_url(base: &Url, path: &str) -> Url {
    join_path(base, &format!("{ARTIFACTS_API_PATH}/{path}"))
}

/// Join two artifact path fragments with a single `/`.
pub fn join_artifact_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", parent.trim_end_matches('/'))
    }
}

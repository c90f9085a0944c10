//! Internal MLflow types: client config and REST wire formats.

use std::path::PathBuf;
use std::time::Duration;

use mlfetch_core::{ModelStage, ModelVersion};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use url::Url;

use crate::config::Credentials;
use crate::error::{MlflowError, MlflowResult};

/// Marker of the artifact proxy API inside an HTTP artifact URI.
pub const ARTIFACTS_API_PATH: &str = "api/2.0/mlflow-artifacts/artifacts";

// ============================================================================
// Internal Config
// ============================================================================

/// Parsed client configuration.
#[derive(Debug, Clone)]
pub struct MlflowConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub probe_timeout: Duration,
    pub request_timeout: Option<Duration>,
    pub credentials: Option<Credentials>,
}

#[cfg(test)]
impl Default for MlflowConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:5000").expect("static URL is valid"),
            user_agent: "mlfetch-test".to_string(),
            probe_timeout: Duration::from_secs(30),
            request_timeout: None,
            credentials: None,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Error body returned by MLflow on failed requests.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

/// Response of `registered-models/get-latest-versions`.
#[derive(Debug, Deserialize)]
pub struct LatestVersionsResponse {
    #[serde(default)]
    pub model_versions: Vec<ModelVersionJson>,
}

/// One `ModelVersion` entity as serialised by MLflow.
#[derive(Debug, Deserialize)]
pub struct ModelVersionJson {
    pub name: String,
    pub version: String,
    pub current_stage: Option<String>,
    pub source: Option<String>,
    pub run_id: Option<String>,
    pub status: Option<String>,
}

impl ModelVersionJson {
    /// Convert to the core DTO. Unknown stage labels become `None`.
    pub fn into_model_version(self) -> ModelVersion {
        ModelVersion {
            current_stage: self
                .current_stage
                .as_deref()
                .and_then(|s| s.parse::<ModelStage>().ok()),
            name: self.name,
            version: self.version,
            source: self.source.filter(|s| !s.is_empty()),
            run_id: self.run_id.filter(|s| !s.is_empty()),
            status: self.status,
        }
    }
}

/// Response of `model-versions/get-download-uri`.
#[derive(Debug, Deserialize)]
pub struct DownloadUriResponse {
    pub artifact_uri: String,
}

/// Response of the artifact proxy listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListArtifactsResponse {
    #[serde(default)]
    pub files: Vec<FileInfoJson>,
}

/// One listing entry. `path` is the entry's name relative to the listed
/// directory.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfoJson {
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
    pub file_size: Option<u64>,
}

// ============================================================================
// Artifact Locations
// ============================================================================

/// Where a model version's artifacts can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    /// Served by a tracking server's artifact proxy.
    Proxied {
        /// Server root the API paths are appended to
        base: Url,
        /// Artifact path relative to the proxy's root, no leading slash
        path: String,
    },
    /// A directory (or file) on the local filesystem.
    Local(PathBuf),
}

impl ArtifactLocation {
    /// Interpret an `artifact_uri` returned by `get-download-uri`.
    ///
    /// `tracking` is used for `mlflow-artifacts:` URIs that carry no host.
    pub fn parse(artifact_uri: &str, tracking: &Url) -> MlflowResult<Self> {
        let unsupported = || MlflowError::UnsupportedArtifactUri {
            uri: artifact_uri.to_string(),
        };

        let url = match Url::parse(artifact_uri) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) if artifact_uri.starts_with('/') => {
                return Ok(Self::Local(PathBuf::from(artifact_uri)));
            }
            Err(_) => return Err(unsupported()),
        };

        match url.scheme() {
            "mlflow-artifacts" => {
                let mut base = tracking.clone();
                if let Some(host) = url.host_str() {
                    base.set_host(Some(host))?;
                    base.set_port(url.port()).map_err(|()| unsupported())?;
                }
                Ok(Self::Proxied {
                    base,
                    path: decode_artifact_path(url.path()),
                })
            }
            "http" | "https" => {
                let full = url.path().trim_start_matches('/');
                let (prefix, rest) = full.split_once(ARTIFACTS_API_PATH).ok_or_else(unsupported)?;
                let mut base = url.clone();
                base.set_query(None);
                base.set_path(prefix);
                Ok(Self::Proxied {
                    base,
                    path: decode_artifact_path(rest),
                })
            }
            "file" => url.to_file_path().map(Self::Local).map_err(|()| unsupported()),
            _ => Err(unsupported()),
        }
    }
}

/// Artifact path as the proxy names it: percent-decoded, no outer slashes.
///
/// URL builders encode it again when it goes on the wire.
fn decode_artifact_path(encoded: &str) -> String {
    percent_decode_str(encoded.trim_matches('/'))
        .decode_utf8_lossy()
        .into_owned()
}

/// Check that a listing entry name is a single, plain path component.
pub fn validate_entry_name(name: &str) -> MlflowResult<&str> {
    let name = name.trim_end_matches('/');
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\');
    if plain {
        Ok(name)
    } else {
        Err(MlflowError::UnsafeArtifactPath {
            path: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tracking() -> Url {
        Url::parse("http://mlflow.internal:5000").unwrap()
    }

    #[test]
    fn test_latest_versions_response_parsing() {
        let response: LatestVersionsResponse = serde_json::from_value(json!({
            "model_versions": [{
                "name": "Test",
                "version": "3",
                "current_stage": "Staging",
                "source": "mlflow-artifacts:/1/abc/artifacts/model",
                "run_id": "abc",
                "status": "READY",
                "creation_timestamp": 1_700_000_000_000_u64
            }]
        }))
        .unwrap();

        let version = response
            .model_versions
            .into_iter()
            .next()
            .unwrap()
            .into_model_version();
        assert_eq!(version.version, "3");
        assert_eq!(version.current_stage, Some(ModelStage::Staging));
        assert_eq!(version.run_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_latest_versions_response_empty_object() {
        let response: LatestVersionsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.model_versions.is_empty());
    }

    #[test]
    fn test_unknown_stage_label() {
        let version = ModelVersionJson {
            name: "Test".to_string(),
            version: "1".to_string(),
            current_stage: Some("Canary".to_string()),
            source: Some(String::new()),
            run_id: None,
            status: None,
        }
        .into_model_version();
        assert_eq!(version.current_stage, None);
        assert_eq!(version.source, None);
    }

    #[test]
    fn test_list_artifacts_missing_files() {
        let response: ListArtifactsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.files.is_empty());
    }

    #[test]
    fn test_location_mlflow_artifacts_without_host() {
        let location =
            ArtifactLocation::parse("mlflow-artifacts:/1/abc/artifacts/model", &tracking())
                .unwrap();
        assert_eq!(
            location,
            ArtifactLocation::Proxied {
                base: tracking(),
                path: "1/abc/artifacts/model".to_string(),
            }
        );
    }

    #[test]
    fn test_location_mlflow_artifacts_with_host() {
        let location =
            ArtifactLocation::parse("mlflow-artifacts://other:8080/1/abc/model", &tracking())
                .unwrap();
        let ArtifactLocation::Proxied { base, path } = location else {
            panic!("expected proxied location");
        };
        assert_eq!(base.as_str(), "http://other:8080/");
        assert_eq!(path, "1/abc/model");
    }

    #[test]
    fn test_location_http_proxy_uri() {
        let location = ArtifactLocation::parse(
            "http://proxy:5000/mlflow/api/2.0/mlflow-artifacts/artifacts/1/abc/model",
            &tracking(),
        )
        .unwrap();
        let ArtifactLocation::Proxied { base, path } = location else {
            panic!("expected proxied location");
        };
        assert_eq!(base.as_str(), "http://proxy:5000/mlflow/");
        assert_eq!(path, "1/abc/model");
    }

    #[test]
    fn test_location_path_is_decoded() {
        let location =
            ArtifactLocation::parse("mlflow-artifacts:/1/abc/artifacts/my model", &tracking())
                .unwrap();
        let ArtifactLocation::Proxied { path, .. } = location else {
            panic!("expected proxied location");
        };
        assert_eq!(path, "1/abc/artifacts/my model");

        let location = ArtifactLocation::parse(
            "http://proxy:5000/api/2.0/mlflow-artifacts/artifacts/1/abc/caf%C3%A9%20model",
            &tracking(),
        )
        .unwrap();
        let ArtifactLocation::Proxied { path, .. } = location else {
            panic!("expected proxied location");
        };
        assert_eq!(path, "1/abc/café model");
    }

    #[test]
    fn test_location_local() {
        assert_eq!(
            ArtifactLocation::parse("file:///srv/mlruns/1/abc/artifacts/model", &tracking())
                .unwrap(),
            ArtifactLocation::Local(PathBuf::from("/srv/mlruns/1/abc/artifacts/model"))
        );
        assert_eq!(
            ArtifactLocation::parse("/srv/mlruns/1/abc", &tracking()).unwrap(),
            ArtifactLocation::Local(PathBuf::from("/srv/mlruns/1/abc"))
        );
    }

    #[test]
    fn test_location_unsupported() {
        for uri in ["s3://bucket/1/abc", "gs://bucket/model", "relative/path"] {
            let err = ArtifactLocation::parse(uri, &tracking()).unwrap_err();
            assert!(matches!(err, MlflowError::UnsupportedArtifactUri { .. }), "{uri}");
        }
    }

    #[test]
    fn test_validate_entry_name() {
        assert_eq!(validate_entry_name("MLmodel").unwrap(), "MLmodel");
        assert_eq!(validate_entry_name("data/").unwrap(), "data");
        for bad in ["", ".", "..", "a/b", "..\\x"] {
            assert!(validate_entry_name(bad).is_err(), "{bad}");
        }
    }
}

//! In-memory registry for tests.
//!
//! Available to this crate's unit tests and, with the `test-utils` feature,
//! to downstream test suites.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ModelStage, ModelUri};
use crate::ports::{
    DownloadSummary, ModelVersion, RegistryClientPort, RegistryPortError, RegistryPortResult,
};

/// A call observed by [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    CheckConnection,
    GetLatestVersions { name: String, stage: ModelStage },
    DownloadArtifacts { uri: String, dst: PathBuf },
}

/// Fake registry holding models, versions and artifact files in memory.
pub struct FakeRegistry {
    endpoint: String,
    reachable: bool,
    models: HashMap<String, Vec<ModelVersion>>,
    artifacts: Vec<(String, Vec<u8>)>,
    query_error: Mutex<Option<RegistryPortError>>,
    download_error: Mutex<Option<RegistryPortError>>,
    calls: Mutex<Vec<RegistryCall>>,
}

impl FakeRegistry {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            reachable: true,
            models: HashMap::new(),
            artifacts: Vec::new(),
            query_error: Mutex::new(None),
            download_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every connection check fail.
    #[must_use]
    pub const fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Register `name` with the given `(version, stage)` pairs, in the
    /// order the registry should return them.
    #[must_use]
    pub fn with_model(mut self, name: &str, versions: &[(&str, ModelStage)]) -> Self {
        let versions = versions
            .iter()
            .map(|(version, stage)| ModelVersion {
                name: name.to_string(),
                version: (*version).to_string(),
                current_stage: Some(*stage),
                source: None,
                run_id: None,
                status: Some("READY".to_string()),
            })
            .collect();
        self.models.insert(name.to_string(), versions);
        self
    }

    /// Add an artifact file (path relative to the model root).
    #[must_use]
    pub fn with_artifact(mut self, path: &str, contents: &[u8]) -> Self {
        self.artifacts.push((path.to_string(), contents.to_vec()));
        self
    }

    /// Fail the next version query with `err`.
    #[must_use]
    pub fn failing_query(self, err: RegistryPortError) -> Self {
        *self.query_error.lock().unwrap() = Some(err);
        self
    }

    /// Fail the next download with `err`.
    #[must_use]
    pub fn failing_download(self, err: RegistryPortError) -> Self {
        *self.download_error.lock().unwrap() = Some(err);
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// True if any download was attempted.
    pub fn downloaded(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, RegistryCall::DownloadArtifacts { .. }))
    }

    /// True if any version query was attempted.
    pub fn queried(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, RegistryCall::GetLatestVersions { .. }))
    }

    fn record(&self, call: RegistryCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RegistryClientPort for FakeRegistry {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn check_connection(&self) -> RegistryPortResult<()> {
        self.record(RegistryCall::CheckConnection);
        if self.reachable {
            Ok(())
        } else {
            Err(RegistryPortError::Unreachable {
                url: self.endpoint.clone(),
                message: "connection refused".to_string(),
            })
        }
    }

    async fn get_latest_versions(
        &self,
        name: &str,
        stage: ModelStage,
    ) -> RegistryPortResult<Vec<ModelVersion>> {
        self.record(RegistryCall::GetLatestVersions {
            name: name.to_string(),
            stage,
        });
        if let Some(err) = self.query_error.lock().unwrap().take() {
            return Err(err);
        }
        let versions = self
            .models
            .get(name)
            .ok_or_else(|| RegistryPortError::ModelNotFound {
                name: name.to_string(),
            })?;
        Ok(versions
            .iter()
            .filter(|v| v.current_stage == Some(stage))
            .cloned()
            .collect())
    }

    async fn download_artifacts(
        &self,
        uri: &ModelUri,
        dst: &Path,
    ) -> RegistryPortResult<DownloadSummary> {
        self.record(RegistryCall::DownloadArtifacts {
            uri: uri.to_string(),
            dst: dst.to_path_buf(),
        });
        if let Some(err) = self.download_error.lock().unwrap().take() {
            return Err(err);
        }

        let mut summary = DownloadSummary::default();
        for (rel, contents) in &self.artifacts {
            let path = dst.join(rel);
            let io_err = |e: std::io::Error| RegistryPortError::Io {
                path: path.clone(),
                message: e.to_string(),
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
            fs::write(&path, contents).map_err(io_err)?;
            summary.record(contents.len() as u64);
        }
        Ok(summary)
    }
}

//! Core-owned DTOs for registry operations.
//!
//! These types cross the boundary between `mlfetch-registry` and consumers.

use serde::{Deserialize, Serialize};

use crate::domain::ModelStage;

/// One version of a registered model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVersion {
    /// Registered model name
    pub name: String,
    /// Version token assigned by the registry (usually an integer)
    pub version: String,
    /// Stage the version is currently in, when the registry reports one
    pub current_stage: Option<ModelStage>,
    /// Source artifact location the version was registered from
    pub source: Option<String>,
    /// Run that produced the version
    pub run_id: Option<String>,
    /// Registration status (e.g. `READY`)
    pub status: Option<String>,
}

/// What an artifact download wrote to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSummary {
    /// Number of files written
    pub files: usize,
    /// Total bytes written
    pub bytes: u64,
}

impl DownloadSummary {
    /// Account for one more file of `bytes` length.
    pub const fn record(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

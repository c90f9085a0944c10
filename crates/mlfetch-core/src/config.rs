//! Invocation configuration and its defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default output directory for metadata and artifacts.
pub const DEFAULT_DESTINATION_DIR: &str = "./llm-model";

/// Default registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "http://1.1.1.1:1234";

/// Default registered model name.
pub const DEFAULT_MODEL_NAME: &str = "Test model";

/// Default requested stage.
pub const DEFAULT_STAGE: &str = "Production";

/// Default log file, truncated on every run.
pub const DEFAULT_LOG_FILE: &str = "/tmp/model-artifacts-download-log.txt";

/// Name of the marker file written inside the destination directory.
pub const MARKER_FILE_NAME: &str = "model-version.txt";

/// Upper bound for the connectivity probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything one invocation needs, fixed after argument parsing.
///
/// The stage is kept as typed so that validation and its diagnostic happen
/// during version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub registry_url: String,
    pub model_name: String,
    pub destination_dir: PathBuf,
    pub required_stage: String,
    pub log_file: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            destination_dir: PathBuf::from(DEFAULT_DESTINATION_DIR),
            required_stage: DEFAULT_STAGE.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl FetchConfig {
    /// Path of the marker file for this invocation.
    pub fn marker_path(&self) -> PathBuf {
        self.destination_dir.join(MARKER_FILE_NAME)
    }
}

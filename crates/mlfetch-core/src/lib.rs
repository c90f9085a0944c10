#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_DESTINATION_DIR, DEFAULT_LOG_FILE, DEFAULT_MODEL_NAME, DEFAULT_REGISTRY_URL,
    DEFAULT_STAGE, FetchConfig, MARKER_FILE_NAME, PROBE_TIMEOUT,
};
pub use domain::{ModelStage, ModelUri, ModelUriError, ResolvedModel, StageParseError};
pub use ports::{
    DownloadSummary, ModelVersion, RegistryClientPort, RegistryPortError, RegistryPortResult,
};
pub use services::{
    DirectoryStatus, MaterializeError, ResolveError, materialize, resolve_latest_version,
};

//! Port definitions for external collaborators.
//!
//! The core only talks to the model registry through these traits;
//! implementations live in adapter crates (`mlfetch-registry`).

pub mod registry;

pub use registry::{
    DownloadSummary, ModelVersion, RegistryClientPort, RegistryPortError, RegistryPortResult,
};

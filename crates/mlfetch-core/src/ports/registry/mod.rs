//! Model registry client port definitions.
//!
//! This module defines the port trait and DTOs for registry interaction.
//! The MLflow implementation lives in `mlfetch-registry`.

mod client;
mod error;
mod types;

pub use client::RegistryClientPort;
pub use error::{RegistryPortError, RegistryPortResult};
pub use types::{DownloadSummary, ModelVersion};

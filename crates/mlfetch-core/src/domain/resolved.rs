//! The outcome of version resolution and the "latest" selection rule.

use std::cmp::Ordering;

use super::stage::ModelStage;
use super::uri::ModelUri;
use crate::ports::ModelVersion;

/// A model version chosen for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub name: String,
    pub stage: ModelStage,
    pub version: String,
}

impl ResolvedModel {
    /// The `models:/` reference for this version's artifacts.
    pub fn model_uri(&self) -> ModelUri {
        ModelUri::new(&self.name, &self.version)
    }
}

/// Order two version tokens, numerically when both are integers.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Pick the most recent version in `stage`.
///
/// Entries reporting another stage are ignored. The registry's ordering is
/// not relied on: the highest version number wins.
pub fn select_latest(versions: &[ModelVersion], stage: ModelStage) -> Option<&ModelVersion> {
    versions
        .iter()
        .filter(|v| v.current_stage.is_none_or(|s| s == stage))
        .max_by(|a, b| compare_versions(&a.version, &b.version))
}

//! Registry domain types.

mod resolved;
mod stage;
mod uri;

pub use resolved::{ResolvedModel, compare_versions, select_latest};
pub use stage::{ModelStage, StageParseError};
pub use uri::{ModelUri, ModelUriError};

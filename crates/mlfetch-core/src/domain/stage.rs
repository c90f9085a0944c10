//! Model version lifecycle stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle stage a registered model version is assigned to.
///
/// The registry accepts stage tokens case-insensitively; the canonical
/// (capitalised) form is what gets displayed and written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelStage {
    None,
    Staging,
    Production,
    Archived,
}

impl ModelStage {
    /// All stages in registry order.
    pub const ALL: [Self; 4] = [Self::None, Self::Staging, Self::Production, Self::Archived];

    /// Canonical token used by the registry API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Staging => "Staging",
            Self::Production => "Production",
            Self::Archived => "Archived",
        }
    }

    /// Comma separated list of valid tokens, for diagnostics.
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage token outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Model Version stage: {value}. Value must be one of {}.", ModelStage::valid_values())]
pub struct StageParseError {
    /// The token as supplied.
    pub value: String,
}

impl FromStr for ModelStage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| StageParseError {
                value: s.to_string(),
            })
    }
}

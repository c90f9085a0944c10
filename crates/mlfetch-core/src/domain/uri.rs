//! `models:/` artifact references.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const SCHEME: &str = "models:/";

/// Reference to the artifacts of one registered model version,
/// in the form `models:/<name>/<version>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelUri {
    pub name: String,
    pub version: String,
}

impl ModelUri {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.name, self.version)
    }
}

/// Error parsing a `models:/` URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid model URI '{0}': expected models:/<name>/<version>")]
pub struct ModelUriError(pub String);

impl FromStr for ModelUri {
    type Err = ModelUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| ModelUriError(s.to_string()))?;

        // Model names may contain '/', the version is always the last segment.
        let (name, version) = rest
            .rsplit_once('/')
            .ok_or_else(|| ModelUriError(s.to_string()))?;

        if name.is_empty() || version.is_empty() {
            return Err(ModelUriError(s.to_string()));
        }

        Ok(Self::new(name, version))
    }
}

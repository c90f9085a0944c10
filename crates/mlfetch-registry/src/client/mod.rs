//! MLflow client for version queries and artifact downloads.

mod artifacts;
mod versions;

use mlfetch_core::RegistryPortResult;
use url::Url;

use crate::config::RegistryClientConfig;
use crate::error::MlflowResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::MlflowConfig;
use crate::port::map_error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default MLflow client using the reqwest HTTP backend.
pub type DefaultMlflowClient = MlflowClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the MLflow tracking server's registry and artifact APIs.
///
/// Generic over the HTTP backend so tests can inject a fake. External code
/// uses `DefaultMlflowClient` through `RegistryClientPort`.
pub struct MlflowClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: MlflowConfig,
    /// Endpoint exactly as configured, for diagnostics.
    pub(crate) endpoint: String,
}

impl DefaultMlflowClient {
    /// Create a client targeting `config`'s tracking URL.
    ///
    /// Fails only on an unparseable URL or an HTTP client that cannot be
    /// built; no request is sent.
    pub fn new(config: &RegistryClientConfig) -> RegistryPortResult<Self> {
        Self::build(config).map_err(map_error)
    }

    fn build(config: &RegistryClientConfig) -> MlflowResult<Self> {
        let internal = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal)?;
        Ok(Self {
            backend,
            config: internal,
            endpoint: config.base_url.clone(),
        })
    }

    fn to_internal_config(config: &RegistryClientConfig) -> MlflowResult<MlflowConfig> {
        Ok(MlflowConfig {
            base_url: Url::parse(config.base_url.trim())?,
            user_agent: config.user_agent.clone(),
            probe_timeout: config.probe_timeout,
            request_timeout: config.request_timeout,
            credentials: config.credentials.clone(),
        })
    }
}

impl<B: HttpBackend> MlflowClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: MlflowConfig, backend: B) -> Self {
        let endpoint = config.base_url.to_string();
        Self {
            backend,
            config,
            endpoint,
        }
    }

    /// Probe the tracking URL; any HTTP answer means reachable.
    pub(crate) async fn check_connection(&self) -> MlflowResult<()> {
        let status = self.backend.probe(&self.config.base_url).await?;
        tracing::debug!(status, url = %self.config.base_url, "registry answered probe");
        Ok(())
    }
}

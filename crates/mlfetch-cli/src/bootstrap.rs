//! CLI bootstrap - the composition root.
//!
//! The only place where the MLflow adapter is instantiated. Handlers receive
//! it as a `RegistryClientPort`.

use mlfetch_core::{FetchConfig, PROBE_TIMEOUT};
use mlfetch_registry::{DefaultMlflowClient, RegistryClientConfig};

use crate::error::CliError;

/// User agent sent with every registry request.
pub const USER_AGENT: &str = concat!("mlfetch/", env!("CARGO_PKG_VERSION"));

/// Registry client settings for this invocation.
///
/// Credentials come from the MLflow environment variables.
pub fn registry_config(config: &FetchConfig) -> RegistryClientConfig {
    RegistryClientConfig::from_env(config.registry_url.clone())
        .with_user_agent(USER_AGENT)
        .with_probe_timeout(PROBE_TIMEOUT)
}

/// Build the MLflow client targeting `config.registry_url`.
///
/// An endpoint that cannot even be turned into a client is reported the same
/// way as one that does not answer.
pub fn build_registry_client(config: &FetchConfig) -> Result<DefaultMlflowClient, CliError> {
    DefaultMlflowClient::new(&registry_config(config)).map_err(|err| {
        tracing::debug!(error = %err, "failed to build registry client");
        CliError::Unreachable {
            url: config.registry_url.clone(),
        }
    })
}

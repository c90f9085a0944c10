//! Public configuration for the MLflow client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal config is derived from this.

use std::time::Duration;

use mlfetch_core::{DEFAULT_REGISTRY_URL, PROBE_TIMEOUT};

/// Environment variable holding a bearer token.
pub const ENV_TRACKING_TOKEN: &str = "MLFLOW_TRACKING_TOKEN";
/// Environment variable holding the basic-auth user name.
pub const ENV_TRACKING_USERNAME: &str = "MLFLOW_TRACKING_USERNAME";
/// Environment variable holding the basic-auth password.
pub const ENV_TRACKING_PASSWORD: &str = "MLFLOW_TRACKING_PASSWORD";

/// Credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic {
        username: String,
        password: Option<String>,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::Basic { username, .. } => write!(f, "Basic({username}, ***)"),
        }
    }
}

/// Configuration for the MLflow client.
///
/// # Example
///
/// ```
/// use mlfetch_registry::RegistryClientConfig;
/// use std::time::Duration;
///
/// let config = RegistryClientConfig::new()
///     .with_base_url("http://mlflow.internal:5000")
///     .with_probe_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryClientConfig {
    /// Tracking server URL
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Upper bound for the connectivity check
    pub(crate) probe_timeout: Duration,
    /// Optional per-request timeout for API calls and downloads
    pub(crate) request_timeout: Option<Duration>,
    /// Optional credentials
    pub(crate) credentials: Option<Credentials>,
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            user_agent: concat!("mlfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            probe_timeout: PROBE_TIMEOUT,
            request_timeout: None,
            credentials: None,
        }
    }
}

impl RegistryClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read credentials the way the MLflow client does, using `lookup`
    /// to resolve environment variables.
    ///
    /// A token wins over a user name.
    #[must_use]
    pub fn with_env_credentials<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = non_empty(ENV_TRACKING_TOKEN) {
            self.credentials = Some(Credentials::Bearer(token));
        } else if let Some(username) = non_empty(ENV_TRACKING_USERNAME) {
            self.credentials = Some(Credentials::Basic {
                username,
                password: non_empty(ENV_TRACKING_PASSWORD),
            });
        }
        self
    }

    /// Configuration targeting `base_url` with credentials from the process
    /// environment.
    #[must_use]
    pub fn from_env(base_url: impl Into<String>) -> Self {
        Self::new()
            .with_base_url(base_url)
            .with_env_credentials(|key| std::env::var(key).ok())
    }

    /// Set the tracking server URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connectivity check timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Bound every API call and download by `timeout`.
    ///
    /// Unbounded by default: artifact downloads can take arbitrarily long.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set explicit credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RegistryClientConfig::new();
        assert_eq!(config.base_url, "http://1.1.1.1:1234");
        assert!(config.user_agent.starts_with("mlfetch/"));
        assert_eq!(config.probe_timeout, Duration::from_secs(30));
        assert!(config.request_timeout.is_none());
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RegistryClientConfig::new()
            .with_base_url("http://mlflow:5000")
            .with_user_agent("test-agent")
            .with_probe_timeout(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(600))
            .with_credentials(Credentials::Bearer("secret".to_string()));

        assert_eq!(config.base_url, "http://mlflow:5000");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(600)));
        assert_eq!(
            config.credentials,
            Some(Credentials::Bearer("secret".to_string()))
        );
    }

    #[test]
    fn test_env_token_wins() {
        let config = RegistryClientConfig::new().with_env_credentials(env(&[
            (ENV_TRACKING_TOKEN, "tok"),
            (ENV_TRACKING_USERNAME, "alice"),
        ]));
        assert_eq!(config.credentials, Some(Credentials::Bearer("tok".to_string())));
    }

    #[test]
    fn test_env_basic_auth() {
        let config = RegistryClientConfig::new().with_env_credentials(env(&[
            (ENV_TRACKING_USERNAME, "alice"),
            (ENV_TRACKING_PASSWORD, "pw"),
        ]));
        assert_eq!(
            config.credentials,
            Some(Credentials::Basic {
                username: "alice".to_string(),
                password: Some("pw".to_string()),
            })
        );
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let config = RegistryClientConfig::new()
            .with_env_credentials(env(&[(ENV_TRACKING_TOKEN, ""), (ENV_TRACKING_USERNAME, "")]));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let creds = Credentials::Basic {
            username: "alice".to_string(),
            password: Some("hunter2".to_string()),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("alice"));
        assert!(!shown.contains("hunter2"));
    }
}

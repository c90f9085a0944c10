//! The fetch pipeline: connectivity check, version resolution, download.
//!
//! Each stage only runs after the previous one succeeded.

use mlfetch_core::{
    DownloadSummary, FetchConfig, RegistryClientPort, materialize, resolve_latest_version,
};

use crate::error::CliError;

/// Make sure the registry endpoint answers before anything else is attempted.
pub async fn check_connection(client: &dyn RegistryClientPort) -> Result<(), CliError> {
    if let Err(err) = client.check_connection().await {
        tracing::debug!(error = %err, "connectivity check failed");
        return Err(CliError::Unreachable {
            url: client.endpoint().to_string(),
        });
    }
    tracing::info!("connection to mlflow server was established");
    Ok(())
}

/// Run the whole pipeline for one invocation.
pub async fn execute(
    config: &FetchConfig,
    client: &dyn RegistryClientPort,
) -> Result<DownloadSummary, CliError> {
    tracing::info!(
        url = %config.registry_url,
        model = %config.model_name,
        stage = %config.required_stage,
        destination = %config.destination_dir.display(),
        "fetching model artifacts"
    );

    check_connection(client).await?;

    let resolved =
        resolve_latest_version(client, &config.model_name, &config.required_stage).await?;

    let summary = materialize(client, &resolved, &config.destination_dir).await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlfetch_core::testing::{FakeRegistry, RegistryCall};
    use mlfetch_core::{ModelStage, RegistryPortError};
    use tempfile::tempdir;

    fn config(dir: &std::path::Path, stage: &str) -> FetchConfig {
        FetchConfig {
            registry_url: "http://mlflow:5000".to_string(),
            model_name: "Test".to_string(),
            destination_dir: dir.join("llm-model"),
            required_stage: stage.to_string(),
            log_file: dir.join("log.txt"),
        }
    }

    #[tokio::test]
    async fn test_check_connection_reports_endpoint() {
        let registry = FakeRegistry::new("http://1.1.1.1:1234").unreachable();
        let err = check_connection(&registry).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "please check your connection to mlflow server http://1.1.1.1:1234"
        );
    }

    #[tokio::test]
    async fn test_execute_runs_stages_in_order() {
        let tmp = tempdir().unwrap();
        let registry = FakeRegistry::new("http://mlflow:5000")
            .with_model("Test", &[("1", ModelStage::Production)])
            .with_artifact("MLmodel", b"flavors");

        execute(&config(tmp.path(), "production"), &registry)
            .await
            .unwrap();

        let calls = registry.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], RegistryCall::CheckConnection);
        assert!(matches!(calls[1], RegistryCall::GetLatestVersions { .. }));
        assert!(matches!(calls[2], RegistryCall::DownloadArtifacts { .. }));
    }

    #[tokio::test]
    async fn test_registry_failure_is_not_reported_as_invalid_stage() {
        let tmp = tempdir().unwrap();
        let registry = FakeRegistry::new("http://mlflow:5000").failing_query(
            RegistryPortError::Api {
                status: 503,
                message: "unavailable".to_string(),
            },
        );

        let err = execute(&config(tmp.path(), "Staging"), &registry)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Registry(_)));
        assert!(!registry.downloaded());
    }
}

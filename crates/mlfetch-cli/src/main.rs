//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, builds the MLflow client and runs the
//! fetch pipeline. Handled failures print their message, are logged and end
//! the process with their exit code; download failures propagate.

use clap::Parser;

use mlfetch_cli::{Cli, CliError, build_registry_client, handlers, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (MLFLOW_TRACKING_URI, credentials)
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.to_config();

    if let Err(e) = logging::init(&config.log_file, cli.verbose) {
        let err = CliError::from(e);
        eprintln!("Failed to open log file {}: {err}", config.log_file.display());
        std::process::exit(err.exit_code());
    }
    println!("Log file can be found in {}", config.log_file.display());

    let result = match build_registry_client(&config) {
        Ok(client) => handlers::fetch::execute(&config, &client).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                files = summary.files,
                bytes = summary.bytes,
                "download finished"
            );
            Ok(())
        }
        Err(err @ CliError::Download(_)) => {
            tracing::error!("{err}");
            Err(err.into())
        }
        Err(err) => {
            println!("{err}");
            tracing::error!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}

//! Command-line parser.
//!
//! Flag names keep the snake_case spelling existing deployment scripts use.

use std::path::PathBuf;

use clap::Parser;
use mlfetch_core::{
    DEFAULT_DESTINATION_DIR, DEFAULT_LOG_FILE, DEFAULT_MODEL_NAME, DEFAULT_REGISTRY_URL,
    DEFAULT_STAGE, FetchConfig,
};

/// Download the latest version of a registered MLflow model in a given stage.
///
/// Every option has a default, so the tool can run with no arguments.
#[derive(Debug, Parser)]
#[command(name = "mlfetch")]
#[command(version)]
#[command(about = "Download the latest MLflow model version in a stage")]
pub struct Cli {
    /// Folder the model artifacts are saved to
    #[arg(long = "destination_dir", default_value = DEFAULT_DESTINATION_DIR)]
    pub destination_dir: PathBuf,

    /// MLflow tracking server URL, e.g. http://x.x.x.x:yyyy
    #[arg(
        long = "mlflow_url",
        env = "MLFLOW_TRACKING_URI",
        default_value = DEFAULT_REGISTRY_URL
    )]
    pub mlflow_url: String,

    /// Registered model to download artifacts from
    #[arg(long = "model_name", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// Model stage: None, Staging, Production or Archived
    #[arg(long = "required_model_state", default_value = DEFAULT_STAGE)]
    pub required_model_state: String,

    /// Log file, overwritten on every run
    #[arg(long = "log_file", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Mirror debug logs to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Freeze the parsed arguments into the invocation configuration.
    ///
    /// The stage is passed through as typed; it is validated during
    /// version resolution.
    pub fn to_config(&self) -> FetchConfig {
        FetchConfig {
            registry_url: self.mlflow_url.clone(),
            model_name: self.model_name.clone(),
            destination_dir: self.destination_dir.clone(),
            required_stage: self.required_model_state.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

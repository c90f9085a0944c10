//! Artifact materialization: destination directory, marker file, download.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::MARKER_FILE_NAME;
use crate::domain::ResolvedModel;
use crate::ports::{DownloadSummary, RegistryClientPort, RegistryPortError};

/// Whether the destination directory had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Created,
    AlreadyPresent,
}

/// Failures while materializing a resolved version locally.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The destination path exists but is a file.
    #[error("Destination {} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Creating the destination directory failed.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the marker file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact download failed.
    #[error("Artifact download failed: {0}")]
    Download(#[source] RegistryPortError),
}

/// Make sure `path` exists as a directory, creating it and its parents.
pub fn ensure_destination(path: &Path) -> Result<DirectoryStatus, MaterializeError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(MaterializeError::NotADirectory(path.to_path_buf()));
        }
        return Ok(DirectoryStatus::AlreadyPresent);
    }

    fs::create_dir_all(path).map_err(|source| MaterializeError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DirectoryStatus::Created)
}

/// Marker file body: the stage line and the version line.
pub fn marker_contents(resolved: &ResolvedModel) -> String {
    format!(
        "Model stage is: {}\nModel version is: {}\n",
        resolved.stage, resolved.version
    )
}

/// Write (or overwrite) the marker file inside `dir`.
pub fn write_marker(dir: &Path, resolved: &ResolvedModel) -> Result<PathBuf, MaterializeError> {
    let path = dir.join(MARKER_FILE_NAME);
    fs::write(&path, marker_contents(resolved)).map_err(|source| MaterializeError::Marker {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Run the full materialization for a resolved version.
///
/// Progress lines go to stdout, records to the log. A download failure is
/// returned untouched to the caller.
pub async fn materialize(
    client: &dyn RegistryClientPort,
    resolved: &ResolvedModel,
    dir: &Path,
) -> Result<DownloadSummary, MaterializeError> {
    match ensure_destination(dir)? {
        DirectoryStatus::Created => {
            println!("Directory {} created successfully.", dir.display());
            tracing::info!("Create {} folder for artifacts download", dir.display());
        }
        DirectoryStatus::AlreadyPresent => {
            println!("Directory {} already exists.", dir.display());
            tracing::info!("folder {} already exists", dir.display());
        }
    }

    println!(
        "starting to download the model artifacts from {} state, version {}. This will take a while",
        resolved.stage, resolved.version
    );

    write_marker(dir, resolved)?;

    let uri = resolved.model_uri();
    tracing::info!(%uri, "downloading model artifacts");
    let summary = client
        .download_artifacts(&uri, dir)
        .await
        .map_err(MaterializeError::Download)?;

    tracing::info!(
        files = summary.files,
        bytes = summary.bytes,
        "Model metadata details can be found in {MARKER_FILE_NAME} file under folder {}",
        dir.display()
    );
    tracing::info!(
        "Model artifact files can be found under folder {}",
        dir.display()
    );

    Ok(summary)
}

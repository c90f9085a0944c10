//! Artifact download for `models:/` references.
//!
//! Downloads are strictly sequential. A file whose transfer fails is removed
//! before the error is returned; files already written stay in place.

use std::fs;
use std::path::{Path, PathBuf};

use mlfetch_core::{DownloadSummary, ModelUri};
use url::Url;

use crate::error::{MlflowError, MlflowResult};
use crate::http::HttpBackend;
use crate::models::{ArtifactLocation, FileInfoJson, ListArtifactsResponse, validate_entry_name};
use crate::url::{build_artifact_file_url, build_list_artifacts_url, join_artifact_path};

use super::MlflowClient;

fn create_dir(path: &Path) -> MlflowResult<()> {
    fs::create_dir_all(path).map_err(|source| MlflowError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Name of a listing entry relative to the listed directory.
///
/// The proxy returns bare names; full paths under `parent` are accepted too.
fn entry_name<'a>(parent: &str, entry: &'a FileInfoJson) -> MlflowResult<&'a str> {
    let path = entry.path.trim_end_matches('/');
    let relative = path
        .strip_prefix(parent.trim_end_matches('/'))
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|_| !parent.is_empty())
        .unwrap_or(path);
    validate_entry_name(relative)
}

impl<B: HttpBackend> MlflowClient<B> {
    /// Download every artifact of `uri` under `dst`.
    pub(crate) async fn download_model_artifacts(
        &self,
        uri: &ModelUri,
        dst: &Path,
    ) -> MlflowResult<DownloadSummary> {
        let artifact_uri = self.get_download_uri(&uri.name, &uri.version).await?;
        tracing::debug!(%uri, %artifact_uri, "resolved artifact location");

        match ArtifactLocation::parse(&artifact_uri, &self.config.base_url)? {
            ArtifactLocation::Proxied { base, path } => {
                self.download_proxied(&base, &path, dst).await
            }
            ArtifactLocation::Local(root) => copy_local(&root, dst),
        }
    }

    async fn list_artifacts(&self, base: &Url, path: &str) -> MlflowResult<Vec<FileInfoJson>> {
        let url = build_list_artifacts_url(base, path);
        let response: ListArtifactsResponse = self.backend.get_json(&url).await?;
        Ok(response.files)
    }

    /// Mirror the proxied artifact tree rooted at `root` into `dst`.
    ///
    /// An empty listing means `root` is itself a file.
    async fn download_proxied(
        &self,
        base: &Url,
        root: &str,
        dst: &Path,
    ) -> MlflowResult<DownloadSummary> {
        let mut summary = DownloadSummary::default();

        let top = self.list_artifacts(base, root).await?;
        if top.is_empty() {
            let name = validate_entry_name(root.rsplit('/').next().unwrap_or(root))?;
            let bytes = self.download_file(base, root, &dst.join(name)).await?;
            summary.record(bytes);
            return Ok(summary);
        }

        let mut pending: Vec<(String, PathBuf, Vec<FileInfoJson>)> =
            vec![(root.to_string(), dst.to_path_buf(), top)];

        while let Some((remote_dir, local_dir, entries)) = pending.pop() {
            for entry in &entries {
                let name = entry_name(&remote_dir, entry)?;
                let remote = join_artifact_path(&remote_dir, name);
                let local = local_dir.join(name);

                if entry.is_dir {
                    create_dir(&local)?;
                    let children = self.list_artifacts(base, &remote).await?;
                    pending.push((remote, local, children));
                } else {
                    let bytes = self.download_file(base, &remote, &local).await?;
                    if let Some(expected) = entry.file_size.filter(|&size| size != bytes) {
                        tracing::warn!(path = %remote, expected, actual = bytes, "artifact size differs from listing");
                    }
                    summary.record(bytes);
                }
            }
        }

        Ok(summary)
    }

    async fn download_file(&self, base: &Url, remote: &str, local: &Path) -> MlflowResult<u64> {
        let url = build_artifact_file_url(base, remote);
        tracing::debug!(%url, dest = %local.display(), "downloading artifact");

        if let Some(parent) = local.parent() {
            create_dir(parent)?;
        }

        match self.backend.download_to_file(&url, local).await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                if local.exists() {
                    if let Err(e) = fs::remove_file(local) {
                        tracing::warn!(path = %local.display(), error = %e, "failed to remove partial download");
                    }
                }
                Err(err)
            }
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> MlflowError {
    let path = path.to_path_buf();
    move |source| MlflowError::Io { path, source }
}

/// Copy one file, removing whatever was written to `target` on failure.
fn copy_file(src: &Path, target: &Path) -> MlflowResult<u64> {
    fs::copy(src, target).map_err(|err| {
        if fs::symlink_metadata(target).is_ok() {
            if let Err(e) = fs::remove_file(target) {
                tracing::warn!(path = %target.display(), error = %e, "failed to remove partial copy");
            }
        }
        io_err(src)(err)
    })
}

/// Copy a local artifact tree (or single file) into `dst`.
///
/// Symlinked directories are skipped so a link cycle cannot recurse forever.
fn copy_local(root: &Path, dst: &Path) -> MlflowResult<DownloadSummary> {
    let mut summary = DownloadSummary::default();
    let metadata = fs::metadata(root).map_err(io_err(root))?;

    if metadata.is_file() {
        create_dir(dst)?;
        let name = root
            .file_name()
            .ok_or_else(|| MlflowError::UnsafeArtifactPath {
                path: root.display().to_string(),
            })?;
        summary.record(copy_file(root, &dst.join(name))?);
        return Ok(summary);
    }

    let mut pending = vec![(root.to_path_buf(), dst.to_path_buf())];
    while let Some((src_dir, dst_dir)) = pending.pop() {
        create_dir(&dst_dir)?;
        for entry in fs::read_dir(&src_dir).map_err(io_err(&src_dir))? {
            let entry = entry.map_err(io_err(&src_dir))?;
            let src = entry.path();
            let target = dst_dir.join(entry.file_name());
            let file_type = entry.file_type().map_err(io_err(&src))?;

            if file_type.is_dir() {
                pending.push((src, target));
            } else if file_type.is_symlink() && src.is_dir() {
                tracing::warn!(path = %src.display(), "skipping symlinked artifact directory");
            } else {
                summary.record(copy_file(&src, &target)?);
            }
        }
    }

    Ok(summary)
}

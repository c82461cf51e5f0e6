//! File system backed sources

use super::{ManifestSource, TransformScriptSource, TransformedManifestSource};
use crate::domain::{PackageId, PackageManifest};
use crate::error::ManifestError;
use crate::manifest::PackageJsonParser;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read a package.json file, mapping a missing file to `None`
async fn read_package_json(path: &Path) -> Result<Option<PackageManifest>, ManifestError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ManifestError::read_error(path, e)),
    };

    PackageJsonParser.parse(&content, path).map(Some)
}

/// Reads `<workspace>/<package>/package.json`
#[derive(Debug, Clone)]
pub struct FsManifestSource {
    workspace: PathBuf,
}

impl FsManifestSource {
    /// Create a source rooted at the workspace directory
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl ManifestSource for FsManifestSource {
    async fn fetch_raw_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError> {
        read_package_json(&package.manifest_path(&self.workspace)).await
    }
}

/// Reads `<snapshots>/<package>/package.json`
///
/// The snapshot directory mirrors the workspace layout and holds each
/// package.json as the pnpmfile hook returned it. Something else has to run
/// the hook and write these files; this source only reads them.
#[derive(Debug, Clone)]
pub struct FsTransformedManifestSource {
    snapshots: PathBuf,
}

impl FsTransformedManifestSource {
    /// Create a source rooted at the snapshot directory
    pub fn new(snapshots: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: snapshots.into(),
        }
    }
}

#[async_trait]
impl TransformedManifestSource for FsTransformedManifestSource {
    async fn fetch_transformed_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError> {
        read_package_json(&package.manifest_path(&self.snapshots)).await
    }
}

/// Reads the pnpmfile text from a fixed path
#[derive(Debug, Clone)]
pub struct FsScriptSource {
    path: PathBuf,
}

impl FsScriptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the pnpmfile
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransformScriptSource for FsScriptSource {
    async fn fetch_script_text(&self) -> Result<Option<String>, ManifestError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ManifestError::script_read_error(&self.path, e)),
        }
    }
}

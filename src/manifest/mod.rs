//! Manifest file reading and workspace configuration
//!
//! This module provides functionality to:
//! - Parse package.json into a [`PackageManifest`]
//! - Locate the pnpmfile through pnpm settings
//! - Detect packages of a pnpm workspace

mod detector;
mod package_json;
mod pnpm_settings;

pub use detector::discover_workspace_packages;
pub use package_json::PackageJsonParser;
pub use pnpm_settings::{has_pnpm_workspace, PnpmSettings, DEFAULT_PNPMFILE};

use crate::domain::PackageManifest;
use crate::error::ManifestError;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a package.json file
///
/// A missing file is not an error: it means there is nothing to inspect.
pub fn read_manifest(path: &Path) -> Result<Option<PackageManifest>, ManifestError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ManifestError::read_error(path, e)),
    };

    PackageJsonParser.parse(&content, path).map(Some)
}

//! Sources the inspector reads manifests and the pnpmfile from
//!
//! This module provides:
//! - Traits for the raw manifest, the hook-transformed manifest and the
//!   pnpmfile text
//! - File system sources for a workspace and a snapshot directory
//! - An in-memory source for embedding and tests
//!
//! A source returning `Ok(None)` means there is nothing at that location,
//! which callers report as "no data" rather than as a failure.

mod fs;
mod memory;

pub use fs::{FsManifestSource, FsScriptSource, FsTransformedManifestSource};
pub use memory::MemorySource;

use crate::domain::{PackageId, PackageManifest};
use crate::error::ManifestError;
use async_trait::async_trait;

/// Supplies package.json as declared by the package author
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch the raw manifest of `package`
    async fn fetch_raw_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError>;
}

/// Supplies package.json after the pnpmfile `readPackage` hook rewrote it
#[async_trait]
pub trait TransformedManifestSource: Send + Sync {
    /// Fetch the transformed manifest of `package`
    async fn fetch_transformed_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError>;
}

/// Supplies the pnpmfile source text, for display only
#[async_trait]
pub trait TransformScriptSource: Send + Sync {
    /// Fetch the pnpmfile text, `None` when the workspace has no pnpmfile
    async fn fetch_script_text(&self) -> Result<Option<String>, ManifestError>;
}

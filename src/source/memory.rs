//! In-memory source

use super::{ManifestSource, TransformScriptSource, TransformedManifestSource};
use crate::domain::{PackageId, PackageManifest};
use crate::error::ManifestError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Serves manifests and pnpmfile text held in memory
///
/// Implements all three source traits, so one value can back an inspector.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    raw: HashMap<PackageId, PackageManifest>,
    transformed: HashMap<PackageId, PackageManifest>,
    script: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw manifest of `package` (builder pattern)
    pub fn with_raw(mut self, package: PackageId, manifest: PackageManifest) -> Self {
        self.raw.insert(package, manifest);
        self
    }

    /// Register the transformed manifest of `package` (builder pattern)
    pub fn with_transformed(mut self, package: PackageId, manifest: PackageManifest) -> Self {
        self.transformed.insert(package, manifest);
        self
    }

    /// Set the pnpmfile text (builder pattern)
    pub fn with_script(mut self, text: impl Into<String>) -> Self {
        self.script = Some(text.into());
        self
    }
}

#[async_trait]
impl ManifestSource for MemorySource {
    async fn fetch_raw_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError> {
        Ok(self.raw.get(package).cloned())
    }
}

#[async_trait]
impl TransformedManifestSource for MemorySource {
    async fn fetch_transformed_manifest(
        &self,
        package: &PackageId,
    ) -> Result<Option<PackageManifest>, ManifestError> {
        Ok(self.transformed.get(package).cloned())
    }
}

#[async_trait]
impl TransformScriptSource for MemorySource {
    async fn fetch_script_text(&self) -> Result<Option<String>, ManifestError> {
        Ok(self.script.clone())
    }
}

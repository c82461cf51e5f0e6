//! Inspector coordinating manifest retrieval and comparison
//!
//! This module provides:
//! - Workflow coordination: fetch raw + transformed + pnpmfile → compare
//! - Concurrent retrieval; the comparison runs only once both manifests exist
//! - Multi-package inspection with a concurrency limit
//! - Error handling with partial continuation

use crate::compare::{compare_manifests, ComparePolicy};
use crate::domain::{GroupedSpecDiff, PackageId, PackageManifest};
use crate::error::AppError;
use crate::progress::Progress;
use crate::source::{ManifestSource, TransformScriptSource, TransformedManifestSource};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of packages inspected at once
const DEFAULT_CONCURRENCY: usize = 8;

/// Which manifest was unavailable for a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingManifest {
    /// No package.json in the workspace
    Raw,
    /// No hook output for the package
    Transformed,
    /// Neither exists
    Both,
}

/// Outcome of inspecting one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionStatus {
    /// Both manifests were available and compared
    Compared,
    /// Nothing to compare; shown as "no data available"
    NoData(MissingManifest),
}

/// Everything gathered for one package
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Package that was inspected
    pub package: PackageId,
    /// Manifest as declared by the author
    pub raw: Option<PackageManifest>,
    /// Manifest after the pnpmfile hook
    pub transformed: Option<PackageManifest>,
    /// pnpmfile text, if the workspace has one
    pub script: Option<String>,
    /// Why the pnpmfile could not be read; the diff is still produced
    pub script_error: Option<String>,
    /// Per-group changes; only present when both manifests exist
    pub diff: Option<GroupedSpecDiff>,
}

impl Inspection {
    /// Returns whether a comparison happened
    pub fn status(&self) -> InspectionStatus {
        match (&self.raw, &self.transformed) {
            (Some(_), Some(_)) => InspectionStatus::Compared,
            (None, Some(_)) => InspectionStatus::NoData(MissingManifest::Raw),
            (Some(_), None) => InspectionStatus::NoData(MissingManifest::Transformed),
            (None, None) => InspectionStatus::NoData(MissingManifest::Both),
        }
    }

    /// Returns true if the hook changed anything
    pub fn has_changes(&self) -> bool {
        self.diff.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// A package that could not be inspected
#[derive(Error, Debug)]
#[error("failed to inspect {package}: {source}")]
pub struct InspectorError {
    pub package: PackageId,
    #[source]
    pub source: AppError,
}

/// Result of inspecting several packages
#[derive(Debug, Default)]
pub struct InspectorResult {
    /// Successful inspections, in the order packages were requested
    pub inspections: Vec<Inspection>,
    /// Packages that failed, in the order packages were requested
    pub errors: Vec<InspectorError>,
}

impl InspectorResult {
    /// Number of packages where the hook changed something
    pub fn changed_packages(&self) -> usize {
        self.inspections.iter().filter(|i| i.has_changes()).count()
    }
}

/// Inspector for comparing manifests before and after the pnpmfile hook
#[derive(Clone)]
pub struct Inspector {
    raw: Arc<dyn ManifestSource>,
    transformed: Arc<dyn TransformedManifestSource>,
    script: Arc<dyn TransformScriptSource>,
    policy: ComparePolicy,
    semaphore: Arc<Semaphore>,
}

impl Inspector {
    /// Create an inspector over the three sources
    pub fn new(
        raw: Arc<dyn ManifestSource>,
        transformed: Arc<dyn TransformedManifestSource>,
        script: Arc<dyn TransformScriptSource>,
    ) -> Self {
        Self {
            raw,
            transformed,
            script,
            policy: ComparePolicy::default(),
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Use a different range equality policy (builder pattern)
    pub fn with_policy(mut self, policy: ComparePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Limit how many packages are inspected at once (builder pattern)
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    /// Inspect a single package
    ///
    /// A missing manifest on either side yields an inspection without a diff.
    pub async fn inspect(&self, package: &PackageId) -> Result<Inspection, AppError> {
        let (raw, transformed, script) = tokio::join!(
            self.raw.fetch_raw_manifest(package),
            self.transformed.fetch_transformed_manifest(package),
            self.script.fetch_script_text(),
        );
        let raw = raw?;
        let transformed = transformed?;
        let (script, script_error) = match script {
            Ok(text) => (text, None),
            Err(e) => (None, Some(e.to_string())),
        };

        let diff = match (&raw, &transformed) {
            (Some(before), Some(after)) => Some(compare_manifests(before, after, self.policy)),
            _ => None,
        };

        Ok(Inspection {
            package: package.clone(),
            raw,
            transformed,
            script,
            script_error,
            diff,
        })
    }

    /// Inspect several packages concurrently
    pub async fn inspect_all(&self, packages: &[PackageId]) -> InspectorResult {
        self.inspect_all_with_progress(packages, false).await
    }

    /// Inspect several packages concurrently with optional progress display
    pub async fn inspect_all_with_progress(
        &self,
        packages: &[PackageId],
        show_progress: bool,
    ) -> InspectorResult {
        let mut progress = Progress::new(show_progress);
        progress.start(packages.len() as u64, "Inspecting packages");

        let mut tasks = JoinSet::new();
        let mut pending = HashMap::with_capacity(packages.len());
        for (index, package) in packages.iter().enumerate() {
            let inspector = self.clone();
            let task_package = package.clone();
            let handle = tasks.spawn(async move {
                // Never closed, so a permit is always granted
                let _permit = inspector.semaphore.clone().acquire_owned().await.ok();
                inspector.inspect(&task_package).await
            });
            pending.insert(handle.id(), (index, package.clone()));
        }

        let mut outcomes = Vec::with_capacity(packages.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(e) => (e.id(), Err(AppError::task_failed(e.to_string()))),
            };
            if let Some((index, package)) = pending.remove(&id) {
                progress.set_message(&format!("Inspected {}", package));
                outcomes.push((index, package, outcome));
            }
            progress.inc();
        }
        progress.finish_and_clear();

        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut result = InspectorResult::default();
        for (_, package, outcome) in outcomes {
            match outcome {
                Ok(inspection) => result.inspections.push(inspection),
                Err(source) => result.errors.push(InspectorError { package, source }),
            }
        }
        result
    }
}

//! JSON output formatter for machine processing
//!
//! This module provides:
//! - Per-package diffs keyed by manifest group
//! - Annotated rows, the combined view, or the raw documents depending on the view

use crate::domain::{ChangeKind, DependencyGroup, GroupedSpecDiff, NameConflict, SpecDiff};
use crate::inspector::{Inspection, InspectionStatus, InspectorResult, MissingManifest};
use crate::output::{OutputConfig, OutputFormatter};
use crate::view::{combined_rows, group_rows, DependencyRow, ViewMode};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    config: OutputConfig,
}

impl JsonFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: JsonSummary,
    packages: Vec<JsonPackage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<JsonError>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    packages: usize,
    changed_packages: usize,
    without_data: usize,
    added: usize,
    changed: usize,
    removed: usize,
    failed: usize,
}

/// JSON representation of one inspected package
#[derive(Serialize)]
struct JsonPackage<'a> {
    /// Directory relative to the workspace root
    package: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    /// `compared` or `no_data`
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<MissingManifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<&'a GroupedSpecDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    combined: Option<SpecDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conflicts: Vec<NameConflict>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rows: Vec<DependencyRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_json: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pnpmfile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pnpmfile_error: Option<&'a str>,
}

/// JSON representation of a failed package
#[derive(Serialize)]
struct JsonError {
    package: String,
    message: String,
}

impl JsonFormatter {
    fn summary_to_json(result: &InspectorResult) -> JsonSummary {
        let diffs: Vec<&GroupedSpecDiff> = result
            .inspections
            .iter()
            .filter_map(|i| i.diff.as_ref())
            .collect();
        let count = |kind: ChangeKind| -> usize { diffs.iter().map(|d| d.count(kind)).sum() };

        JsonSummary {
            packages: result.inspections.len(),
            changed_packages: result.changed_packages(),
            without_data: result.inspections.len() - diffs.len(),
            added: count(ChangeKind::Added),
            changed: count(ChangeKind::Changed),
            removed: count(ChangeKind::Removed),
            failed: result.errors.len(),
        }
    }

    fn inspection_to_json<'a>(&self, inspection: &'a Inspection) -> JsonPackage<'a> {
        let (status, missing) = match inspection.status() {
            InspectionStatus::Compared => ("compared", None),
            InspectionStatus::NoData(missing) => ("no_data", Some(missing)),
        };

        let mut package = JsonPackage {
            package: inspection.package.as_str(),
            name: inspection
                .transformed
                .as_ref()
                .or(inspection.raw.as_ref())
                .and_then(|m| m.name.as_deref()),
            status,
            missing,
            changes: None,
            combined: None,
            conflicts: Vec::new(),
            rows: Vec::new(),
            package_json: None,
            pnpmfile: None,
            pnpmfile_error: None,
        };

        match self.config.view {
            ViewMode::Spec => {
                if let (Some(raw), Some(transformed), Some(diff)) =
                    (&inspection.raw, &inspection.transformed, &inspection.diff)
                {
                    package.changes = Some(diff);
                    match self.config.combined {
                        Some(precedence) => {
                            package.combined = Some(diff.flatten(precedence));
                            package.conflicts = diff.conflicts();
                            package.rows = combined_rows(raw, transformed, diff, precedence);
                        }
                        None => {
                            package.rows = DependencyGroup::all()
                                .iter()
                                .flat_map(|g| group_rows(raw, transformed, diff.group(*g), *g))
                                .collect();
                        }
                    }
                }
            }
            ViewMode::PackageJson => {
                package.package_json = inspection.raw.as_ref().map(|m| m.to_json());
            }
            ViewMode::Pnpmfile => {
                package.pnpmfile = inspection.script.as_deref();
                package.pnpmfile_error = inspection.script_error.as_deref();
            }
        }

        package
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &InspectorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: Self::summary_to_json(result),
            packages: result
                .inspections
                .iter()
                .map(|i| self.inspection_to_json(i))
                .collect(),
            errors: result
                .errors
                .iter()
                .map(|e| JsonError {
                    package: e.package.to_string(),
                    message: e.source.to_string(),
                })
                .collect(),
        };

        Self::write_json(&output, writer)
    }

    fn format_summary(
        &self,
        result: &InspectorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(&Self::summary_to_json(result), writer)
    }

    fn format_inspection(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(&self.inspection_to_json(inspection), writer)
    }
}

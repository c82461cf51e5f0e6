//! Annotated dependency rows for display
//!
//! Rows follow the transformed manifest, since that is what pnpm installs.
//! Names the hook deleted no longer appear there, so they are appended with
//! the range they had before the hook ran.

use crate::domain::{
    ChangeKind, ChangeRecord, DependencyGroup, GroupedSpecDiff, MergePrecedence, PackageManifest,
    SpecDiff,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What to show for an inspected package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Dependency groups annotated with hook changes
    #[default]
    Spec,
    /// The package.json as written by the author
    PackageJson,
    /// Source of the pnpmfile
    Pnpmfile,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(ViewMode::Spec),
            "package-json" | "package.json" => Ok(ViewMode::PackageJson),
            "pnpmfile" => Ok(ViewMode::Pnpmfile),
            other => Err(format!(
                "unknown view '{}' (expected spec, package-json or pnpmfile)",
                other
            )),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Spec => "spec",
            ViewMode::PackageJson => "package-json",
            ViewMode::Pnpmfile => "pnpmfile",
        };
        write!(f, "{}", name)
    }
}

/// One dependency line of the annotated view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRow {
    pub name: String,
    /// Range after the hook, or before it for deleted entries
    pub version_range: String,
    pub group: DependencyGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeRecord>,
}

impl DependencyRow {
    /// Text shown next to a changed row, naming the hook file
    pub fn annotation(&self, hook: &str) -> Option<String> {
        let change = self.change.as_ref()?;
        let text = match change.kind() {
            ChangeKind::Added => format!("Added by {}", hook),
            ChangeKind::Changed => {
                format!("Changed from {}", change.previous_value().unwrap_or_default())
            }
            ChangeKind::Removed => format!("Deleted by {}", hook),
        };
        Some(text)
    }
}

/// Rows for one group of a compared package
///
/// Declared entries keep the order of the transformed manifest; deleted
/// entries follow in the order of the raw manifest.
pub fn group_rows(
    raw: &PackageManifest,
    transformed: &PackageManifest,
    diff: &SpecDiff,
    group: DependencyGroup,
) -> Vec<DependencyRow> {
    let mut rows: Vec<DependencyRow> = transformed
        .group(group)
        .into_iter()
        .flat_map(|spec| spec.iter())
        .map(|(name, range)| DependencyRow {
            name: name.to_string(),
            version_range: range.to_string(),
            group,
            change: diff.get(name).cloned(),
        })
        .collect();

    let removed = diff
        .iter()
        .filter(|(_, record)| record.kind() == ChangeKind::Removed)
        .map(|(name, record)| DependencyRow {
            name: name.to_string(),
            version_range: raw_range(raw, group, name),
            group,
            change: Some(record.clone()),
        });
    rows.extend(removed);

    rows
}

/// Changed entries of every group merged by name
///
/// A name recorded in several groups appears once, carrying the record and
/// the range of the group chosen by `precedence`.
pub fn combined_rows(
    raw: &PackageManifest,
    transformed: &PackageManifest,
    diff: &GroupedSpecDiff,
    precedence: MergePrecedence,
) -> Vec<DependencyRow> {
    diff.flatten(precedence)
        .iter()
        .filter_map(|(name, record)| {
            let group = winning_group(diff, name, precedence)?;
            let version_range = match record.kind() {
                ChangeKind::Removed => raw_range(raw, group, name),
                _ => transformed
                    .group(group)
                    .and_then(|spec| spec.get(name))
                    .unwrap_or_default()
                    .to_string(),
            };
            Some(DependencyRow {
                name: name.to_string(),
                version_range,
                group,
                change: Some(record.clone()),
            })
        })
        .collect()
}

fn winning_group(
    diff: &GroupedSpecDiff,
    name: &str,
    precedence: MergePrecedence,
) -> Option<DependencyGroup> {
    let mut groups = diff
        .iter()
        .filter(|(_, d)| d.contains(name))
        .map(|(group, _)| group);
    match precedence {
        MergePrecedence::FirstWins => groups.next(),
        MergePrecedence::LastWins => groups.last(),
    }
}

fn raw_range(raw: &PackageManifest, group: DependencyGroup, name: &str) -> String {
    raw.group(group)
        .and_then(|spec| spec.get(name))
        .unwrap_or_default()
        .to_string()
}

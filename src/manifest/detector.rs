//! Workspace package detection
//!
//! Features:
//! - Detects the root package.json
//! - Expands the `packages:` globs of pnpm-workspace.yaml (`dir/*`,
//!   `dir/**` first level only, and literal paths)
//! - Honors `!` exclusion entries for literal paths and `dir/*` patterns

use crate::domain::PackageId;
use crate::error::IoError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Detect every package in the workspace at `dir` that has a package.json
///
/// The root package comes first, then workspace packages sorted by path.
pub fn discover_workspace_packages(dir: &Path) -> Result<Vec<PackageId>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::directory_not_found(dir));
    }

    let mut packages = Vec::new();

    if dir.join("package.json").exists() {
        packages.push(PackageId::root());
    }

    let workspace_file = dir.join("pnpm-workspace.yaml");
    if !workspace_file.exists() {
        return Ok(packages);
    }

    let content = std::fs::read_to_string(&workspace_file)
        .map_err(|e| IoError::generic(&workspace_file, e))?;
    let (include, exclude) = parse_package_patterns(&content);

    let excluded: BTreeSet<PathBuf> = exclude
        .iter()
        .flat_map(|pattern| expand_pattern(dir, pattern))
        .collect();

    let found: BTreeSet<PackageId> = include
        .iter()
        .flat_map(|pattern| expand_pattern(dir, pattern))
        .filter(|path| !excluded.contains(path))
        .filter(|path| path.join("package.json").exists())
        .filter_map(|path| PackageId::from_dir(dir, &path).ok())
        .filter(|id| !id.is_root())
        .collect();

    packages.extend(found);
    Ok(packages)
}

/// Split the `packages:` list of pnpm-workspace.yaml into include and exclude patterns
///
/// Format: packages:
///           - 'packages/*'
///           - '!packages/internal'
fn parse_package_patterns(content: &str) -> (Vec<String>, Vec<String>) {
    let mut include = Vec::new();
    let mut exclude = Vec::new();

    let mut in_packages = false;
    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("packages:") {
            in_packages = true;
            continue;
        }

        if in_packages {
            // Check if we've moved to a new section
            if !trimmed.is_empty() && !trimmed.starts_with('-') && !trimmed.starts_with('#') {
                break;
            }

            if let Some(pattern) = trimmed.strip_prefix('-') {
                let pattern = pattern.split(" #").next().unwrap_or(pattern);
                let pattern = pattern.trim().trim_matches('\'').trim_matches('"');
                if pattern.is_empty() {
                    continue;
                }
                match pattern.strip_prefix('!') {
                    Some(negated) => exclude.push(negated.to_string()),
                    None => include.push(pattern.to_string()),
                }
            }
        }
    }

    (include, exclude)
}

/// Expand a single workspace pattern into existing directories
fn expand_pattern(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let base = pattern
        .strip_suffix("/**")
        .or_else(|| pattern.strip_suffix("/*"));

    match base {
        // For ** patterns, we just use the first level
        Some(base) => {
            let base_path = dir.join(base);
            let Ok(entries) = std::fs::read_dir(&base_path) else {
                return Vec::new();
            };
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect()
        }
        None if !pattern.contains('*') => {
            let pkg_path = dir.join(pattern.trim_end_matches('/'));
            if pkg_path.is_dir() {
                vec![pkg_path]
            } else {
                Vec::new()
            }
        }
        None => Vec::new(),
    }
}

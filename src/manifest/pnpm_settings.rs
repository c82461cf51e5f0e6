//! pnpm workspace settings reader
//!
//! Locates the pnpmfile from (in priority order):
//! - .npmrc (pnpmfile=config/hooks.cjs)
//! - pnpm-workspace.yaml (pnpmfile: config/hooks.cjs)
//! - the default `.pnpmfile.cjs` at the workspace root

use std::path::{Path, PathBuf};

/// File name pnpm looks for when no pnpmfile is configured
pub const DEFAULT_PNPMFILE: &str = ".pnpmfile.cjs";

/// pnpm workspace settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PnpmSettings {
    /// Configured pnpmfile location, as written in the settings file
    pub pnpmfile: Option<PathBuf>,
}

impl PnpmSettings {
    /// Read pnpm settings from a directory
    ///
    /// Checks in order of priority:
    /// 1. .npmrc (pnpmfile setting)
    /// 2. pnpm-workspace.yaml (pnpmfile key)
    pub fn from_dir(dir: &Path) -> Self {
        let mut settings = PnpmSettings::default();

        // Try reading from .npmrc first (highest priority)
        if let Some(path) = read_npmrc_pnpmfile(dir) {
            settings.pnpmfile = Some(path);
            return settings;
        }

        if let Some(path) = read_workspace_yaml_pnpmfile(dir) {
            settings.pnpmfile = Some(path);
        }

        settings
    }

    /// Resolve the pnpmfile path for the workspace at `dir`
    ///
    /// Relative settings are resolved against `dir`.
    pub fn pnpmfile_path(&self, dir: &Path) -> PathBuf {
        match &self.pnpmfile {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => dir.join(path),
            None => dir.join(DEFAULT_PNPMFILE),
        }
    }
}

/// Strip matching quotes from a settings value
fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"').trim_matches('\'')
}

/// Read pnpmfile from .npmrc file
fn read_npmrc_pnpmfile(dir: &Path) -> Option<PathBuf> {
    let npmrc_path = dir.join(".npmrc");
    let content = std::fs::read_to_string(npmrc_path).ok()?;

    for line in content.lines() {
        let line = line.trim();
        // Skip comments
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "pnpmfile" {
                let value = unquote(value);
                if !value.is_empty() {
                    return Some(PathBuf::from(value));
                }
            }
        }
    }

    None
}

/// Read the top-level pnpmfile key from pnpm-workspace.yaml
fn read_workspace_yaml_pnpmfile(dir: &Path) -> Option<PathBuf> {
    let workspace_path = dir.join("pnpm-workspace.yaml");
    let content = std::fs::read_to_string(workspace_path).ok()?;

    // Only unindented keys are top-level settings
    for line in content.lines() {
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        if let Some(value) = line.strip_prefix("pnpmfile:") {
            let value = value.split(" #").next().unwrap_or(value);
            let value = unquote(value);
            if !value.is_empty() {
                return Some(PathBuf::from(value));
            }
        }
    }

    None
}

/// Check if a directory has pnpm workspace configuration
pub fn has_pnpm_workspace(dir: &Path) -> bool {
    dir.join("pnpm-workspace.yaml").exists() || dir.join("pnpm-lock.yaml").exists()
}

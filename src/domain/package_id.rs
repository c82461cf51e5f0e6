//! Package identifiers within a workspace

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Folder of a package relative to the workspace root
///
/// The root package is `.`. Identifiers never escape the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// The workspace root package
    pub fn root() -> Self {
        PackageId(".".to_string())
    }

    /// Parses a relative package folder such as `packages/app`
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let mut parts = Vec::new();
        for component in Path::new(value.trim()).components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        ConfigError::invalid_package_path(value, "path is not valid UTF-8")
                    })?;
                    parts.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(ConfigError::invalid_package_path(
                        value,
                        "must stay inside the workspace",
                    ))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ConfigError::invalid_package_path(
                        value,
                        "must be relative to the workspace root",
                    ))
                }
            }
        }

        if parts.is_empty() {
            Ok(Self::root())
        } else {
            Ok(PackageId(parts.join("/")))
        }
    }

    /// Builds an identifier from a folder found under `workspace`
    pub fn from_dir(workspace: &Path, dir: &Path) -> Result<Self, ConfigError> {
        let relative = dir.strip_prefix(workspace).map_err(|_| {
            ConfigError::invalid_package_path(
                dir.display().to_string(),
                "is not inside the workspace",
            )
        })?;
        Self::parse(&relative.to_string_lossy())
    }

    /// Returns true for the workspace root package
    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the package folder under `base`
    pub fn dir_in(&self, base: &Path) -> PathBuf {
        if self.is_root() {
            base.to_path_buf()
        } else {
            base.join(&self.0)
        }
    }

    /// Resolves the package.json path under `base`
    pub fn manifest_path(&self, base: &Path) -> PathBuf {
        self.dir_in(base).join("package.json")
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

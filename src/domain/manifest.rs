//! Package manifest snapshot

use super::{DependencyGroup, DependencySpec};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Dependency-relevant view of a package.json document
///
/// A group set to `None` was not declared at all, which is different from a
/// group declared as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Package version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `dependencies`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencySpec>,
    /// `devDependencies`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencySpec>,
    /// `peerDependencies`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<DependencySpec>,
    /// The document as it was read, `Null` when built in memory
    #[serde(skip)]
    pub raw: Value,
}

impl PackageManifest {
    /// Creates a manifest with no groups declared
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package name (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the package version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Declares a dependency group (builder pattern)
    pub fn with_group(mut self, group: DependencyGroup, spec: DependencySpec) -> Self {
        *self.group_slot(group) = Some(spec);
        self
    }

    /// Returns the declared specification for `group`, if any
    pub fn group(&self, group: DependencyGroup) -> Option<&DependencySpec> {
        match group {
            DependencyGroup::Runtime => self.dependencies.as_ref(),
            DependencyGroup::Development => self.dev_dependencies.as_ref(),
            DependencyGroup::Peer => self.peer_dependencies.as_ref(),
        }
    }

    fn group_slot(&mut self, group: DependencyGroup) -> &mut Option<DependencySpec> {
        match group {
            DependencyGroup::Runtime => &mut self.dependencies,
            DependencyGroup::Development => &mut self.dev_dependencies,
            DependencyGroup::Peer => &mut self.peer_dependencies,
        }
    }

    /// Returns true if `group` is declared (even if empty)
    pub fn declares(&self, group: DependencyGroup) -> bool {
        self.group(group).is_some()
    }

    /// Returns the document to show in the package.json view
    ///
    /// Manifests read from disk return the original document with every
    /// field intact; manifests built in memory are rendered from their fields.
    pub fn to_json(&self) -> Value {
        if !self.raw.is_null() {
            return self.raw.clone();
        }

        let mut object = Map::new();
        if let Some(name) = &self.name {
            object.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(version) = &self.version {
            object.insert("version".to_string(), Value::String(version.clone()));
        }
        for group in DependencyGroup::all() {
            if let Some(spec) = self.group(*group) {
                let deps: Map<String, Value> = spec
                    .iter()
                    .map(|(name, range)| (name.to_string(), Value::String(range.to_string())))
                    .collect();
                object.insert(group.manifest_key().to_string(), Value::Object(deps));
            }
        }
        Value::Object(object)
    }
}

impl fmt::Display for PackageManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("(unnamed)");
        match &self.version {
            Some(version) => write!(f, "{}@{}", name, version),
            None => write!(f, "{}", name),
        }
    }
}

//! Dependency group definitions for package.json manifests

use serde::{Deserialize, Serialize};
use std::fmt;

/// The dependency groups a manifest can declare
///
/// Variant order is the order groups are visited when diffs are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyGroup {
    /// `dependencies`
    #[serde(rename = "dependencies")]
    Runtime,
    /// `devDependencies`
    #[serde(rename = "devDependencies")]
    Development,
    /// `peerDependencies`
    #[serde(rename = "peerDependencies")]
    Peer,
}

impl DependencyGroup {
    /// Returns the package.json key for this group
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "dependencies",
            DependencyGroup::Development => "devDependencies",
            DependencyGroup::Peer => "peerDependencies",
        }
    }

    /// Returns the heading used when rendering this group
    pub fn display_name(&self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "Dependencies",
            DependencyGroup::Development => "Dev Dependencies",
            DependencyGroup::Peer => "Peer Dependencies",
        }
    }

    /// Returns all groups in merge order
    pub fn all() -> &'static [DependencyGroup] {
        &[
            DependencyGroup::Runtime,
            DependencyGroup::Development,
            DependencyGroup::Peer,
        ]
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manifest_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keys() {
        assert_eq!(DependencyGroup::Runtime.manifest_key(), "dependencies");
        assert_eq!(DependencyGroup::Development.manifest_key(), "devDependencies");
        assert_eq!(DependencyGroup::Peer.manifest_key(), "peerDependencies");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(DependencyGroup::Runtime.display_name(), "Dependencies");
        assert_eq!(DependencyGroup::Development.display_name(), "Dev Dependencies");
        assert_eq!(DependencyGroup::Peer.display_name(), "Peer Dependencies");
    }

    #[test]
    fn test_all_is_in_merge_order() {
        let all = DependencyGroup::all();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_display_uses_manifest_key() {
        assert_eq!(format!("{}", DependencyGroup::Development), "devDependencies");
    }

    #[test]
    fn test_serde_group() {
        let json = serde_json::to_string(&DependencyGroup::Peer).unwrap();
        assert_eq!(json, "\"peerDependencies\"");
        let parsed: DependencyGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DependencyGroup::Peer);
    }
}

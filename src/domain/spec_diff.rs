//! Per-group diff between two dependency specifications

use super::{ChangeKind, ChangeRecord};
use indexmap::IndexMap;
use serde::Serialize;

/// Mapping from dependency name to how the hook changed it
///
/// Unchanged dependencies are never stored; absence means unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpecDiff {
    entries: IndexMap<String, ChangeRecord>,
}

impl SpecDiff {
    /// Creates an empty diff
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change. A later record for the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, record: ChangeRecord) {
        self.entries.insert(name.into(), record);
    }

    /// Returns the change recorded for `name`
    pub fn get(&self, name: &str) -> Option<&ChangeRecord> {
        self.entries.get(name)
    }

    /// Returns true if `name` changed
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of changed dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing changed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, record)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChangeRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Number of records of the given kind
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.iter().filter(|(_, r)| r.kind() == kind).count()
    }
}

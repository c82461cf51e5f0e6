//! Diffs partitioned by dependency group
//!
//! The same name may legitimately appear in several groups (a peer that is
//! also a dev dependency, for instance) with different outcomes. Each group
//! keeps its own [`SpecDiff`]; a single name-keyed view is only produced by
//! [`GroupedSpecDiff::flatten`] under an explicit [`MergePrecedence`].

use super::{ChangeKind, ChangeRecord, DependencyGroup, SpecDiff};
use serde::Serialize;

/// Which group's record survives when flattening a name found in several groups
///
/// Groups are visited in [`DependencyGroup::all`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePrecedence {
    /// The earliest group (runtime before dev before peer) wins
    #[default]
    FirstWins,
    /// The latest group wins
    LastWins,
}

/// A dependency name classified in more than one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameConflict {
    pub name: String,
    /// Every group that recorded the name, in merge order
    pub records: Vec<(DependencyGroup, ChangeRecord)>,
}

/// One [`SpecDiff`] per dependency group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedSpecDiff {
    #[serde(rename = "dependencies")]
    runtime: SpecDiff,
    #[serde(rename = "devDependencies")]
    development: SpecDiff,
    #[serde(rename = "peerDependencies")]
    peer: SpecDiff,
}

impl GroupedSpecDiff {
    /// Creates a grouped diff with every group empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diff computed for `group`
    pub fn set(&mut self, group: DependencyGroup, diff: SpecDiff) {
        *self.group_mut(group) = diff;
    }

    /// Returns the diff for `group`
    pub fn group(&self, group: DependencyGroup) -> &SpecDiff {
        match group {
            DependencyGroup::Runtime => &self.runtime,
            DependencyGroup::Development => &self.development,
            DependencyGroup::Peer => &self.peer,
        }
    }

    fn group_mut(&mut self, group: DependencyGroup) -> &mut SpecDiff {
        match group {
            DependencyGroup::Runtime => &mut self.runtime,
            DependencyGroup::Development => &mut self.development,
            DependencyGroup::Peer => &mut self.peer,
        }
    }

    /// Iterates every group with its diff, in merge order
    pub fn iter(&self) -> impl Iterator<Item = (DependencyGroup, &SpecDiff)> {
        DependencyGroup::all().iter().map(|&g| (g, self.group(g)))
    }

    /// Returns true if no group changed
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, diff)| diff.is_empty())
    }

    /// Total number of change records across all groups
    pub fn total_changes(&self) -> usize {
        self.iter().map(|(_, diff)| diff.len()).sum()
    }

    /// Number of records of `kind` across all groups
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.iter().map(|(_, diff)| diff.count(kind)).sum()
    }

    /// Names recorded in more than one group, in order of first appearance
    pub fn conflicts(&self) -> Vec<NameConflict> {
        let mut conflicts: Vec<NameConflict> = Vec::new();

        for (group, diff) in self.iter() {
            for (name, record) in diff.iter() {
                match conflicts.iter_mut().find(|c| c.name == name) {
                    Some(conflict) => conflict.records.push((group, record.clone())),
                    None => conflicts.push(NameConflict {
                        name: name.to_string(),
                        records: vec![(group, record.clone())],
                    }),
                }
            }
        }

        conflicts.retain(|c| c.records.len() > 1);
        conflicts
    }

    /// Merges all groups into one name-keyed diff
    ///
    /// Names keep the position of their first appearance; `precedence`
    /// decides which record they carry.
    pub fn flatten(&self, precedence: MergePrecedence) -> SpecDiff {
        let mut merged = SpecDiff::new();

        for (_, diff) in self.iter() {
            for (name, record) in diff.iter() {
                if precedence == MergePrecedence::FirstWins && merged.contains(name) {
                    continue;
                }
                merged.insert(name, record.clone());
            }
        }

        merged
    }
}

//! Core domain models for specdiff
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency groups and per-group dependency specifications
//! - Package manifests as read before and after the pnpmfile hook
//! - Change classification records and the diffs built from them
//! - Package identifiers within a workspace

mod change;
mod dependency_spec;
mod group;
mod grouped_diff;
mod manifest;
mod package_id;
mod spec_diff;

pub use change::{ChangeKind, ChangeRecord};
pub use dependency_spec::DependencySpec;
pub use group::DependencyGroup;
pub use grouped_diff::{GroupedSpecDiff, MergePrecedence, NameConflict};
pub use manifest::PackageManifest;
pub use package_id::PackageId;
pub use spec_diff::SpecDiff;

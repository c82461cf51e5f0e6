//! Comparison of dependency specifications before and after the pnpmfile hook
//!
//! [`compare`] is the whole engine: a pure function over two specifications
//! of ONE dependency group. It knows nothing about groups; running it once per
//! group and keeping the results apart is done by [`compare_manifests`].
//!
//! An absent group (`None`) is compared as an empty mapping, so a group that
//! only exists after the hook yields `Added` for every name in it.

mod policy;

pub use policy::ComparePolicy;

use crate::domain::{
    ChangeRecord, DependencyGroup, DependencySpec, GroupedSpecDiff, PackageManifest, SpecDiff,
};
use crate::error::SpecError;
use serde_json::Value;

/// Classifies every dependency the hook added, removed or rewrote
///
/// Result order is `after`'s names in declaration order followed by the
/// names only `before` declares, in `before`'s order.
pub fn compare(before: Option<&DependencySpec>, after: Option<&DependencySpec>) -> SpecDiff {
    compare_with(ComparePolicy::Exact, before, after)
}

/// Same as [`compare`] with an explicit equality policy
///
/// `previous_value` always holds the untouched `before` text.
pub fn compare_with(
    policy: ComparePolicy,
    before: Option<&DependencySpec>,
    after: Option<&DependencySpec>,
) -> SpecDiff {
    let empty = DependencySpec::new();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    let mut diff = SpecDiff::new();

    for (name, after_range) in after.iter() {
        match before.get(name) {
            None => diff.insert(name, ChangeRecord::added()),
            Some(before_range) if !policy.same(before_range, after_range) => {
                diff.insert(name, ChangeRecord::changed(before_range))
            }
            Some(_) => {}
        }
    }

    for name in before.names() {
        if !after.contains(name) {
            diff.insert(name, ChangeRecord::removed());
        }
    }

    diff
}

/// Compares every dependency group of two manifests, keeping groups apart
pub fn compare_manifests(
    before: &PackageManifest,
    after: &PackageManifest,
    policy: ComparePolicy,
) -> GroupedSpecDiff {
    let mut grouped = GroupedSpecDiff::new();
    for &group in DependencyGroup::all() {
        grouped.set(
            group,
            compare_with(policy, before.group(group), after.group(group)),
        );
    }
    grouped
}

/// Compares raw JSON group values, rejecting anything that is not a `name -> string` object
///
/// `None` and JSON `null` both mean the group is not declared.
pub fn compare_json(
    group: DependencyGroup,
    before: Option<&Value>,
    after: Option<&Value>,
) -> Result<SpecDiff, SpecError> {
    let before = read_group(group, before)?;
    let after = read_group(group, after)?;
    Ok(compare(before.as_ref(), after.as_ref()))
}

fn read_group(
    group: DependencyGroup,
    value: Option<&Value>,
) -> Result<Option<DependencySpec>, SpecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => DependencySpec::from_json(group, value).map(Some),
    }
}

//! Equality policies for version range text
//!
//! The comparator never normalizes on its own. A policy other than
//! [`ComparePolicy::Exact`] has to be asked for explicitly.

use serde::Serialize;

/// How two version range strings are judged equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparePolicy {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equality after dropping all whitespace, so `>=1.0.0 <2.0.0` matches `>=1.0.0  <2.0.0`
    IgnoreWhitespace,
}

impl ComparePolicy {
    /// Returns true if `before` and `after` count as the same range
    pub fn same(&self, before: &str, after: &str) -> bool {
        match self {
            ComparePolicy::Exact => before == after,
            ComparePolicy::IgnoreWhitespace => {
                let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
                before == after || strip(before) == strip(after)
            }
        }
    }
}

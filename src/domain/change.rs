//! Change classification for a single dependency

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the pnpmfile hook changed a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Declared only after the hook ran
    Added,
    /// Declared on both sides with a different version range
    Changed,
    /// Declared only before the hook ran
    Removed,
}

impl ChangeKind {
    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Changed => "changed",
            ChangeKind::Removed => "removed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classified change for one dependency name
///
/// `previous_value` is only ever set for [`ChangeKind::Changed`]. Records
/// are built by the constructors; deserialization enforces the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChangeRecordFields")]
pub struct ChangeRecord {
    kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_value: Option<String>,
}

impl ChangeRecord {
    /// Dependency introduced by the hook
    pub fn added() -> Self {
        Self {
            kind: ChangeKind::Added,
            previous_value: None,
        }
    }

    /// Dependency deleted by the hook
    pub fn removed() -> Self {
        Self {
            kind: ChangeKind::Removed,
            previous_value: None,
        }
    }

    /// Dependency whose range was rewritten, remembering the original range
    pub fn changed(previous_value: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Changed,
            previous_value: Some(previous_value.into()),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Range declared before the hook ran, for `Changed` records
    pub fn previous_value(&self) -> Option<&str> {
        self.previous_value.as_deref()
    }
}

/// Unchecked shape of a serialized [`ChangeRecord`]
#[derive(Deserialize)]
struct ChangeRecordFields {
    kind: ChangeKind,
    #[serde(default)]
    previous_value: Option<String>,
}

impl TryFrom<ChangeRecordFields> for ChangeRecord {
    type Error = String;

    fn try_from(fields: ChangeRecordFields) -> Result<Self, Self::Error> {
        match (fields.kind, fields.previous_value) {
            (ChangeKind::Changed, Some(previous)) => Ok(ChangeRecord::changed(previous)),
            (ChangeKind::Changed, None) => {
                Err("a changed record needs previous_value".to_string())
            }
            (ChangeKind::Added, None) => Ok(ChangeRecord::added()),
            (ChangeKind::Removed, None) => Ok(ChangeRecord::removed()),
            (kind, Some(_)) => Err(format!("{} record cannot carry previous_value", kind)),
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous_value {
            Some(prev) => write!(f, "{} (from {})", self.kind, prev),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_has_no_previous_value() {
        let record = ChangeRecord::added();
        assert_eq!(record.kind(), ChangeKind::Added);
        assert!(record.previous_value().is_none());
    }

    #[test]
    fn test_removed_has_no_previous_value() {
        let record = ChangeRecord::removed();
        assert_eq!(record.kind(), ChangeKind::Removed);
        assert!(record.previous_value().is_none());
    }

    #[test]
    fn test_changed_keeps_previous_value() {
        let record = ChangeRecord::changed("^17.0.0");
        assert_eq!(record.kind(), ChangeKind::Changed);
        assert_eq!(record.previous_value(), Some("^17.0.0"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ChangeRecord::added()), "added");
        assert_eq!(format!("{}", ChangeRecord::changed("1.0.0")), "changed (from 1.0.0)");
    }

    #[test]
    fn test_serde_change_record() {
        let json = serde_json::to_string(&ChangeRecord::changed("^17.0.0")).unwrap();
        assert_eq!(json, r#"{"kind":"changed","previous_value":"^17.0.0"}"#);

        let json = serde_json::to_string(&ChangeRecord::added()).unwrap();
        assert_eq!(json, r#"{"kind":"added"}"#);

        let parsed: ChangeRecord = serde_json::from_str(r#"{"kind":"removed"}"#).unwrap();
        assert_eq!(parsed, ChangeRecord::removed());

        let parsed: ChangeRecord =
            serde_json::from_str(r#"{"kind":"changed","previous_value":"1.0.0"}"#).unwrap();
        assert_eq!(parsed, ChangeRecord::changed("1.0.0"));
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_records() {
        let added = serde_json::from_str::<ChangeRecord>(
            r#"{"kind":"added","previous_value":"^1.0.0"}"#,
        );
        assert!(added.unwrap_err().to_string().contains("cannot carry previous_value"));

        let removed = serde_json::from_str::<ChangeRecord>(
            r#"{"kind":"removed","previous_value":"^1.0.0"}"#,
        );
        assert!(removed.is_err());

        let changed = serde_json::from_str::<ChangeRecord>(r#"{"kind":"changed"}"#);
        assert!(changed.unwrap_err().to_string().contains("needs previous_value"));
    }
}

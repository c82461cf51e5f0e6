//! Dependency specification for a single dependency group

use super::DependencyGroup;
use crate::error::SpecError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Mapping from dependency name to its version range, in declaration order
///
/// Version ranges are opaque text. Nothing here parses them as semver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySpec {
    entries: IndexMap<String, String>,
}

impl DependencySpec {
    /// Creates an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a specification from `(name, range)` pairs
    ///
    /// A repeated name keeps its first position and its last range, which is
    /// how JSON objects with duplicate keys are read.
    pub fn from_pairs<N, R>(pairs: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (name, range) in pairs {
            entries.insert(name.into(), range.into());
        }
        Self { entries }
    }

    /// Reads a group value from a package.json document
    ///
    /// The value must be an object whose keys are non-empty and whose values
    /// are all strings. Anything else is rejected rather than skipped.
    pub fn from_json(group: DependencyGroup, value: &Value) -> Result<Self, SpecError> {
        let object = value.as_object().ok_or_else(|| {
            SpecError::malformed_group(
                group,
                format!("expected an object, found {}", json_type_name(value)),
            )
        })?;

        let mut entries = IndexMap::new();
        for (name, range) in object {
            if name.is_empty() {
                return Err(SpecError::malformed_group(group, "empty dependency name"));
            }
            let range = range.as_str().ok_or_else(|| {
                SpecError::malformed_group(
                    group,
                    format!(
                        "version range for '{}' must be a string, found {}",
                        name,
                        json_type_name(range)
                    ),
                )
            })?;
            entries.insert(name.clone(), range.to_string());
        }

        Ok(Self { entries })
    }

    /// Returns the version range declared for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns true if `name` is declared
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of declared dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no dependency is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, range)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, range)| (name.as_str(), range.as_str()))
    }

    /// Iterates dependency names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_pairs() {
        let spec = DependencySpec::from_pairs([("react", "^18.2.0"), ("lodash", "^4.17.21")]);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get("react"), Some("^18.2.0"));
        assert!(spec.contains("lodash"));
        assert!(!spec.contains("express"));
    }

    #[test]
    fn test_from_pairs_duplicate_keeps_last_range() {
        let spec = DependencySpec::from_pairs([("a", "1.0.0"), ("b", "1.0.0"), ("a", "2.0.0")]);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get("a"), Some("2.0.0"));
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_json_preserves_declaration_order() {
        let value = json!({"zod": "^3.0.0", "axios": "^1.0.0", "lodash": "^4.17.21"});
        let spec = DependencySpec::from_json(DependencyGroup::Runtime, &value).unwrap();
        assert_eq!(spec.names().collect::<Vec<_>>(), vec!["zod", "axios", "lodash"]);
    }

    #[test]
    fn test_from_json_keeps_ranges_verbatim() {
        let value = json!({"a": " ^1.0.0 ", "b": ""});
        let spec = DependencySpec::from_json(DependencyGroup::Runtime, &value).unwrap();
        assert_eq!(spec.get("a"), Some(" ^1.0.0 "));
        assert_eq!(spec.get("b"), Some(""));
    }

    #[test]
    fn test_from_json_rejects_array() {
        let value = json!(["react"]);
        let err = DependencySpec::from_json(DependencyGroup::Peer, &value).unwrap_err();
        assert_eq!(err.group(), DependencyGroup::Peer);
        assert!(err.to_string().contains("expected an object, found an array"));
    }

    #[test]
    fn test_from_json_rejects_non_string_range() {
        let value = json!({"react": 18});
        let err = DependencySpec::from_json(DependencyGroup::Development, &value).unwrap_err();
        assert_eq!(err.group(), DependencyGroup::Development);
        assert!(err.to_string().contains("'react' must be a string, found a number"));
    }

    #[test]
    fn test_from_json_rejects_empty_name() {
        let value = json!({"": "1.0.0"});
        let err = DependencySpec::from_json(DependencyGroup::Runtime, &value).unwrap_err();
        assert!(err.to_string().contains("empty dependency name"));
    }

    #[test]
    fn test_empty_object_is_empty_spec() {
        let spec = DependencySpec::from_json(DependencyGroup::Runtime, &json!({})).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_serialize_as_object() {
        let spec = DependencySpec::from_pairs([("b", "2"), ("a", "1")]);
        assert_eq!(serde_json::to_string(&spec).unwrap(), r#"{"b":"2","a":"1"}"#);
    }
}

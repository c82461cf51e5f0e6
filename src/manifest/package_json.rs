//! package.json parser
//!
//! Reads:
//! - name / version
//! - dependencies
//! - devDependencies
//! - peerDependencies
//!
//! Every other field is kept only in the raw document for display.

use crate::domain::{DependencyGroup, DependencySpec, PackageManifest};
use crate::error::ManifestError;
use serde_json::Value;
use std::path::Path;

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse a package.json document
    ///
    /// `path` is only used in error messages.
    pub fn parse(&self, content: &str, path: &Path) -> Result<PackageManifest, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

        if !json.is_object() {
            return Err(ManifestError::json_parse_error(
                path,
                "top-level value must be an object",
            ));
        }

        let mut manifest = PackageManifest::new();
        manifest.name = json.get("name").and_then(Value::as_str).map(str::to_string);
        manifest.version = json
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string);

        for &group in DependencyGroup::all() {
            match json.get(group.manifest_key()) {
                // `"peerDependencies": null` is treated like an undeclared group
                None | Some(Value::Null) => {}
                Some(value) => {
                    let spec = DependencySpec::from_json(group, value)
                        .map_err(|e| ManifestError::spec(path, e))?;
                    manifest = manifest.with_group(group, spec);
                }
            }
        }

        manifest.raw = json;
        Ok(manifest)
    }
}

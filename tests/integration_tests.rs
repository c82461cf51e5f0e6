//! Integration tests for specdiff
//!
//! These tests verify:
//! - Workspace discovery and pnpmfile location on a real directory tree
//! - Inspection through the file system sources
//! - The comparator contract seen from outside the crate

use serde_json::json;
use specdiff::compare::{compare, compare_json, compare_manifests, ComparePolicy};
use specdiff::domain::{
    ChangeKind, ChangeRecord, DependencyGroup, DependencySpec, MergePrecedence, PackageId,
};
use specdiff::inspector::{InspectionStatus, Inspector, MissingManifest};
use specdiff::manifest::{discover_workspace_packages, read_manifest, PnpmSettings};
use specdiff::source::{FsManifestSource, FsScriptSource, FsTransformedManifestSource};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Workspace with a root package and two members, plus hook output for some
fn create_workspace() -> (TempDir, TempDir) {
    let workspace = create_test_dir();
    let snapshots = create_test_dir();
    let ws = workspace.path();
    let snap = snapshots.path();

    write(ws, "pnpm-workspace.yaml", "packages:\n  - 'packages/*'\n");
    write(ws, ".pnpmfile.cjs", "module.exports = { hooks: { readPackage } }\n");
    write(
        ws,
        "package.json",
        r#"{ "name": "root", "private": true, "devDependencies": { "typescript": "^5.0.0" } }"#,
    );
    write(
        ws,
        "packages/app/package.json",
        r#"{
  "name": "app",
  "version": "1.0.0",
  "dependencies": { "react": "^17.0.0", "left-pad": "1.3.0" }
}"#,
    );
    write(
        ws,
        "packages/lib/package.json",
        r#"{ "name": "lib", "dependencies": { "a": "1.0.0" } }"#,
    );

    write(
        snap,
        "package.json",
        r#"{ "name": "root", "private": true, "devDependencies": { "typescript": "^5.0.0" } }"#,
    );
    write(
        snap,
        "packages/app/package.json",
        r#"{
  "name": "app",
  "version": "1.0.0",
  "dependencies": { "react": "^18.0.0", "tslib": "^2.0.0" },
  "peerDependencies": { "react-dom": "^18.0.0" }
}"#,
    );

    (workspace, snapshots)
}

fn fs_inspector(workspace: &Path, snapshots: &Path) -> Inspector {
    let pnpmfile = PnpmSettings::from_dir(workspace).pnpmfile_path(workspace);
    Inspector::new(
        Arc::new(FsManifestSource::new(workspace)),
        Arc::new(FsTransformedManifestSource::new(snapshots)),
        Arc::new(FsScriptSource::new(pnpmfile)),
    )
}

mod workspace_discovery {
    use super::*;

    #[test]
    fn test_discovers_root_then_members() {
        let (workspace, _snapshots) = create_workspace();
        let packages = discover_workspace_packages(workspace.path()).unwrap();
        let names: Vec<&str> = packages.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec![".", "packages/app", "packages/lib"]);
    }

    #[test]
    fn test_folders_without_manifest_are_skipped() {
        let (workspace, _snapshots) = create_workspace();
        fs::create_dir_all(workspace.path().join("packages/docs")).unwrap();

        let packages = discover_workspace_packages(workspace.path()).unwrap();
        assert!(!packages.iter().any(|p| p.as_str() == "packages/docs"));
    }

    #[test]
    fn test_pnpmfile_from_npmrc_wins() {
        let (workspace, _snapshots) = create_workspace();
        write(
            workspace.path(),
            "pnpm-workspace.yaml",
            "packages:\n  - 'packages/*'\npnpmfile: yaml-hooks.cjs\n",
        );
        write(workspace.path(), ".npmrc", "pnpmfile=config/hooks.cjs\n");

        let settings = PnpmSettings::from_dir(workspace.path());
        assert_eq!(
            settings.pnpmfile_path(workspace.path()),
            workspace.path().join("config/hooks.cjs")
        );
    }

    #[test]
    fn test_pnpmfile_defaults_to_pnpmfile_cjs() {
        let workspace = create_test_dir();
        let settings = PnpmSettings::from_dir(workspace.path());
        assert_eq!(
            settings.pnpmfile_path(workspace.path()),
            workspace.path().join(".pnpmfile.cjs")
        );
    }
}

mod inspection {
    use super::*;

    #[tokio::test]
    async fn test_inspect_changed_package() {
        let (workspace, snapshots) = create_workspace();
        let inspector = fs_inspector(workspace.path(), snapshots.path());

        let app = PackageId::parse("packages/app").unwrap();
        let inspection = inspector.inspect(&app).await.unwrap();

        assert_eq!(inspection.status(), InspectionStatus::Compared);
        assert!(inspection.script.as_deref().unwrap().contains("readPackage"));

        let diff = inspection.diff.unwrap();
        let runtime: Vec<(&str, ChangeKind)> = diff
            .group(DependencyGroup::Runtime)
            .iter()
            .map(|(name, record)| (name, record.kind()))
            .collect();
        assert_eq!(
            runtime,
            vec![
                ("react", ChangeKind::Changed),
                ("tslib", ChangeKind::Added),
                ("left-pad", ChangeKind::Removed),
            ]
        );
        assert_eq!(
            diff.group(DependencyGroup::Peer).get("react-dom"),
            Some(&ChangeRecord::added())
        );
        assert!(diff.group(DependencyGroup::Development).is_empty());
    }

    #[tokio::test]
    async fn test_inspect_all_in_order_with_no_data() {
        let (workspace, snapshots) = create_workspace();
        let inspector = fs_inspector(workspace.path(), snapshots.path()).with_concurrency(2);

        let packages = discover_workspace_packages(workspace.path()).unwrap();
        let result = inspector.inspect_all(&packages).await;

        assert!(result.errors.is_empty());
        let order: Vec<&str> = result
            .inspections
            .iter()
            .map(|i| i.package.as_str())
            .collect();
        assert_eq!(order, vec![".", "packages/app", "packages/lib"]);

        assert!(!result.inspections[0].has_changes());
        assert!(result.inspections[1].has_changes());
        assert_eq!(
            result.inspections[2].status(),
            InspectionStatus::NoData(MissingManifest::Transformed)
        );
        assert_eq!(result.changed_packages(), 1);
    }

    #[tokio::test]
    async fn test_malformed_group_is_collected_as_error() {
        let (workspace, snapshots) = create_workspace();
        write(
            workspace.path(),
            "packages/bad/package.json",
            r#"{ "name": "bad", "devDependencies": ["jest"] }"#,
        );
        let inspector = fs_inspector(workspace.path(), snapshots.path());

        let packages = vec![
            PackageId::parse("packages/bad").unwrap(),
            PackageId::parse("packages/app").unwrap(),
        ];
        let result = inspector.inspect_all(&packages).await;

        assert_eq!(result.inspections.len(), 1);
        assert_eq!(result.errors.len(), 1);
        let message = result.errors[0].to_string();
        assert!(message.contains("packages/bad"));
        assert!(message.contains("malformed devDependencies group"));
    }

    #[tokio::test]
    async fn test_missing_pnpmfile_is_not_an_error() {
        let (workspace, snapshots) = create_workspace();
        fs::remove_file(workspace.path().join(".pnpmfile.cjs")).unwrap();
        let inspector = fs_inspector(workspace.path(), snapshots.path());

        let inspection = inspector.inspect(&PackageId::root()).await.unwrap();
        assert!(inspection.script.is_none());
        assert_eq!(inspection.status(), InspectionStatus::Compared);
    }

    #[tokio::test]
    async fn test_unreadable_pnpmfile_keeps_diff() {
        let (workspace, snapshots) = create_workspace();
        let pnpmfile = workspace.path().join(".pnpmfile.cjs");
        fs::remove_file(&pnpmfile).unwrap();
        fs::create_dir(&pnpmfile).unwrap();
        let inspector = fs_inspector(workspace.path(), snapshots.path());

        let inspection = inspector.inspect(&PackageId::root()).await.unwrap();
        assert_eq!(inspection.status(), InspectionStatus::Compared);
        assert!(inspection.diff.is_some());
        assert!(inspection.script.is_none());
        assert!(inspection
            .script_error
            .unwrap()
            .contains("failed to read pnpmfile"));
    }

    #[tokio::test]
    async fn test_whitespace_policy_through_inspector() {
        let (workspace, snapshots) = create_workspace();
        write(
            snapshots.path(),
            "packages/lib/package.json",
            r#"{ "name": "lib", "dependencies": { "a": " 1.0.0" } }"#,
        );
        let lib = PackageId::parse("packages/lib").unwrap();

        let exact = fs_inspector(workspace.path(), snapshots.path())
            .inspect(&lib)
            .await
            .unwrap();
        assert!(exact.has_changes());

        let relaxed = fs_inspector(workspace.path(), snapshots.path())
            .with_policy(ComparePolicy::IgnoreWhitespace)
            .inspect(&lib)
            .await
            .unwrap();
        assert!(!relaxed.has_changes());
    }
}

mod comparator_contract {
    use super::*;

    fn spec(pairs: &[(&str, &str)]) -> DependencySpec {
        DependencySpec::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_mixed_scenario() {
        let before = spec(&[("a", "1.0.0"), ("b", "2.0.0")]);
        let after = spec(&[("a", "1.0.0"), ("b", "3.0.0"), ("c", "1.0.0")]);
        let diff = compare(Some(&before), Some(&after));

        assert_eq!(diff.len(), 2);
        assert_eq!(diff.get("b"), Some(&ChangeRecord::changed("2.0.0")));
        assert_eq!(diff.get("c"), Some(&ChangeRecord::added()));
        assert!(!diff.contains("a"));
    }

    #[test]
    fn test_absent_group_compares_as_empty() {
        let after = spec(&[("left-pad", "1.3.0")]);
        let diff = compare(None, Some(&after));
        assert_eq!(diff.get("left-pad"), Some(&ChangeRecord::added()));
        assert!(compare(None, None).is_empty());
    }

    #[test]
    fn test_compare_json_names_malformed_group() {
        let err = compare_json(
            DependencyGroup::Peer,
            Some(&json!({ "react": "^18.0.0" })),
            Some(&json!({ "react": 18 })),
        )
        .unwrap_err();
        assert_eq!(err.group(), DependencyGroup::Peer);
        assert!(err.to_string().contains("peerDependencies"));
    }

    #[test]
    fn test_read_manifest_rejects_malformed_group() {
        let dir = create_test_dir();
        write(dir.path(), "package.json", r#"{ "dependencies": 42 }"#);

        let err = read_manifest(&dir.path().join("package.json")).unwrap_err();
        assert!(err.to_string().contains("malformed dependencies group"));
        assert!(read_manifest(&dir.path().join("missing.json")).unwrap().is_none());
    }

    #[test]
    fn test_flatten_precedence_on_read_manifests() {
        let dir = create_test_dir();
        write(
            dir.path(),
            "before/package.json",
            r#"{ "peerDependencies": { "typescript": ">=4" } }"#,
        );
        write(
            dir.path(),
            "after/package.json",
            r#"{ "dependencies": { "typescript": "^5.0.0" }, "peerDependencies": { "typescript": ">=5" } }"#,
        );
        let before = read_manifest(&dir.path().join("before/package.json"))
            .unwrap()
            .unwrap();
        let after = read_manifest(&dir.path().join("after/package.json"))
            .unwrap()
            .unwrap();

        let grouped = compare_manifests(&before, &after, ComparePolicy::Exact);
        assert_eq!(
            grouped.flatten(MergePrecedence::FirstWins).get("typescript"),
            Some(&ChangeRecord::added())
        );
        assert_eq!(
            grouped.flatten(MergePrecedence::LastWins).get("typescript"),
            Some(&ChangeRecord::changed(">=4"))
        );
        assert_eq!(grouped.conflicts().len(), 1);
    }
}

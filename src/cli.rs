//! CLI argument parsing module for specdiff

use crate::compare::ComparePolicy;
use crate::domain::{MergePrecedence, PackageId};
use crate::error::ConfigError;
use crate::view::ViewMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a view name: spec, package-json or pnpmfile
fn parse_view(s: &str) -> Result<ViewMode, String> {
    s.trim().parse()
}

/// Parse merge precedence for the combined view: first or last
fn parse_precedence(s: &str) -> Result<MergePrecedence, String> {
    match s.trim() {
        "first" => Ok(MergePrecedence::FirstWins),
        "last" => Ok(MergePrecedence::LastWins),
        other => Err(format!(
            "invalid precedence '{}' (expected first or last)",
            other
        )),
    }
}

/// Show how a pnpmfile readPackage hook rewrites dependency specs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "specdiff",
    version,
    about = "Show how a pnpmfile readPackage hook rewrites dependency specs"
)]
pub struct CliArgs {
    /// Workspace root (default: current directory)
    #[arg(default_value = ".")]
    pub workspace: PathBuf,

    /// Directory holding package.json files as emitted by the hook,
    /// laid out like the workspace
    #[arg(long, value_name = "DIR")]
    pub snapshots: PathBuf,

    // Package selection
    /// Package directory relative to the workspace root (can be specified multiple times)
    #[arg(short, long = "package", value_name = "PATH", action = ArgAction::Append)]
    pub packages: Vec<String>,

    /// Inspect every package of the pnpm workspace
    #[arg(long, conflicts_with = "packages")]
    pub all: bool,

    /// pnpmfile location, overriding .npmrc and pnpm-workspace.yaml
    #[arg(long, value_name = "FILE")]
    pub pnpmfile: Option<PathBuf>,

    // Output options
    /// What to show: spec, package-json or pnpmfile
    #[arg(long, value_parser = parse_view, default_value = "spec")]
    pub view: ViewMode,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Merge all dependency groups into one list
    #[arg(long)]
    pub combined: bool,

    /// Which group wins in the combined list when a name is in several: first or last
    #[arg(long, value_parser = parse_precedence, default_value = "first")]
    pub precedence: MergePrecedence,

    /// Treat version ranges that differ only in whitespace as equal
    #[arg(long)]
    pub ignore_whitespace: bool,

    /// Exit with status 3 when the hook changed anything
    #[arg(long)]
    pub exit_code: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    // General options
    /// Enable quiet mode - summary only
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Reject flag combinations clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }
        if self.snapshots.exists() && !self.snapshots.is_dir() {
            return Err(ConfigError::invalid_path(
                &self.snapshots,
                "snapshot path is not a directory",
            ));
        }
        Ok(())
    }

    /// Packages named with --package, or the root package when none are given
    ///
    /// Returns an empty list with --all; the caller discovers the workspace.
    pub fn selected_packages(&self) -> Result<Vec<PackageId>, ConfigError> {
        if self.all {
            return Ok(Vec::new());
        }
        if self.packages.is_empty() {
            return Ok(vec![PackageId::root()]);
        }

        let mut selected: Vec<PackageId> = Vec::new();
        for raw in &self.packages {
            let package = PackageId::parse(raw)?;
            if !selected.contains(&package) {
                selected.push(package);
            }
        }
        Ok(selected)
    }

    /// Range equality policy selected by flags
    pub fn policy(&self) -> ComparePolicy {
        if self.ignore_whitespace {
            ComparePolicy::IgnoreWhitespace
        } else {
            ComparePolicy::Exact
        }
    }

    /// Precedence for the combined view, when it was asked for
    pub fn combined_precedence(&self) -> Option<MergePrecedence> {
        self.combined.then_some(self.precedence)
    }

    /// Whether a progress bar may be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;

    fn parse(extra: &[&str]) -> CliArgs {
        let mut args = vec!["specdiff", "--snapshots", "out"];
        args.extend_from_slice(extra);
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_default_args() {
        let args = parse(&[]);
        assert_eq!(args.workspace, PathBuf::from("."));
        assert_eq!(args.snapshots, PathBuf::from("out"));
        assert!(args.packages.is_empty());
        assert!(!args.all);
        assert!(args.pnpmfile.is_none());
        assert_eq!(args.view, ViewMode::Spec);
        assert!(!args.json);
        assert!(!args.combined);
        assert_eq!(args.precedence, MergePrecedence::FirstWins);
        assert!(!args.ignore_whitespace);
        assert!(!args.exit_code);
        assert!(!args.no_color);
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn test_snapshots_required() {
        assert!(CliArgs::try_parse_from(["specdiff"]).is_err());
    }

    #[test]
    fn test_workspace_argument() {
        let args = parse(&["/some/workspace"]);
        assert_eq!(args.workspace, PathBuf::from("/some/workspace"));
    }

    #[test]
    fn test_default_package_is_root() {
        let args = parse(&[]);
        assert_eq!(args.selected_packages().unwrap(), vec![PackageId::root()]);
    }

    #[test]
    fn test_package_multiple() {
        let args = parse(&["-p", "packages/a", "--package", "packages/b", "-p", "packages/a/"]);
        let selected = args.selected_packages().unwrap();
        assert_eq!(
            selected,
            vec![
                PackageId::parse("packages/a").unwrap(),
                PackageId::parse("packages/b").unwrap(),
            ]
        );
    }

    #[test]
    fn test_package_outside_workspace_rejected() {
        let args = parse(&["-p", "../other"]);
        assert!(args.selected_packages().is_err());
    }

    #[test]
    fn test_all_conflicts_with_package() {
        let result =
            CliArgs::try_parse_from(["specdiff", "--snapshots", "out", "--all", "-p", "a"]);
        assert!(result.is_err());

        let args = parse(&["--all"]);
        assert!(args.selected_packages().unwrap().is_empty());
    }

    #[test]
    fn test_view_values() {
        assert_eq!(parse(&["--view", "package-json"]).view, ViewMode::PackageJson);
        assert_eq!(parse(&["--view", "pnpmfile"]).view, ViewMode::Pnpmfile);
        assert!(CliArgs::try_parse_from(["specdiff", "--snapshots", "out", "--view", "tree"]).is_err());
    }

    #[test]
    fn test_combined_precedence() {
        assert_eq!(parse(&[]).combined_precedence(), None);
        assert_eq!(
            parse(&["--combined"]).combined_precedence(),
            Some(MergePrecedence::FirstWins)
        );
        assert_eq!(
            parse(&["--combined", "--precedence", "last"]).combined_precedence(),
            Some(MergePrecedence::LastWins)
        );
    }

    #[test]
    fn test_parse_precedence_invalid() {
        assert!(parse_precedence("middle").is_err());
        assert_eq!(parse_precedence(" last ").unwrap(), MergePrecedence::LastWins);
    }

    #[test]
    fn test_policy() {
        assert_eq!(parse(&[]).policy(), ComparePolicy::Exact);
        assert_eq!(
            parse(&["--ignore-whitespace"]).policy(),
            ComparePolicy::IgnoreWhitespace
        );
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let args = parse(&["-q", "--verbose"]);
        assert!(args.validate().is_err());
        assert!(parse(&["--quiet"]).validate().is_ok());
    }

    #[test]
    fn test_snapshots_file_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("snapshot.json");
        std::fs::write(&file, "{}").unwrap();

        let args = CliArgs::try_parse_from([
            OsStr::new("specdiff"),
            OsStr::new("--snapshots"),
            file.as_os_str(),
        ])
        .unwrap();
        let err = args.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
        assert!(err.to_string().contains("snapshot path is not a directory"));

        let args = CliArgs::try_parse_from([
            OsStr::new("specdiff"),
            OsStr::new("--snapshots"),
            dir.path().as_os_str(),
        ])
        .unwrap();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_show_progress() {
        assert!(parse(&[]).show_progress());
        assert!(!parse(&["--json"]).show_progress());
        assert!(!parse(&["-q"]).show_progress());
    }

    #[test]
    fn test_combined_flags() {
        let args = parse(&[
            "/path/to/workspace",
            "--pnpmfile",
            "hooks/pnpmfile.cjs",
            "--json",
            "--exit-code",
            "--no-color",
            "--verbose",
        ]);
        assert_eq!(args.workspace, PathBuf::from("/path/to/workspace"));
        assert_eq!(args.pnpmfile, Some(PathBuf::from("hooks/pnpmfile.cjs")));
        assert!(args.json);
        assert!(args.exit_code);
        assert!(args.no_color);
        assert!(args.verbose);
    }
}

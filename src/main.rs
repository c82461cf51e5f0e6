//! specdiff - show how a pnpmfile readPackage hook rewrites dependency specs
//!
//! Compares each package.json against the manifest the hook produced and
//! annotates every added, changed or deleted dependency.

use clap::Parser;
use specdiff::cli::CliArgs;
use specdiff::error::IoError;
use specdiff::inspector::Inspector;
use specdiff::manifest::{discover_workspace_packages, has_pnpm_workspace, PnpmSettings};
use specdiff::output::{create_formatter, OutputConfig};
use specdiff::progress::Progress;
use specdiff::source::{FsManifestSource, FsScriptSource, FsTransformedManifestSource};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

/// Exit status when --exit-code is given and the hook changed something
const CHANGES_FOUND: u8 = 3;

/// Exit status when some packages could not be inspected
const PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;

    if args.no_color {
        colored::control::set_override(false);
    }

    let workspace = args.workspace.clone();
    if !workspace.is_dir() {
        return Err(IoError::directory_not_found(&workspace).into());
    }

    let pnpmfile = match &args.pnpmfile {
        Some(path) => workspace.join(path),
        None => PnpmSettings::from_dir(&workspace).pnpmfile_path(&workspace),
    };

    if args.verbose {
        eprintln!("specdiff v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Workspace: {}", workspace.display());
        eprintln!("Snapshots: {}", args.snapshots.display());
        eprintln!("pnpmfile: {}", pnpmfile.display());
        if !args.snapshots.is_dir() {
            eprintln!("Warning: snapshot directory does not exist, every package will have no data");
        }
        if args.all && !has_pnpm_workspace(&workspace) {
            eprintln!("Note: no pnpm workspace found, only the root package is inspected");
        }
    }

    let packages = if args.all {
        let mut progress = Progress::new(args.show_progress());
        progress.spinner("Discovering workspace packages");
        let found = discover_workspace_packages(&workspace);
        progress.finish_and_clear();
        found?
    } else {
        args.selected_packages()?
    };

    if args.verbose {
        eprintln!("Packages: {}", packages.len());
    }

    let inspector = Inspector::new(
        Arc::new(FsManifestSource::new(workspace.clone())),
        Arc::new(FsTransformedManifestSource::new(args.snapshots.clone())),
        Arc::new(FsScriptSource::new(pnpmfile.clone())),
    )
    .with_policy(args.policy());
    let result = inspector
        .inspect_all_with_progress(&packages, args.show_progress())
        .await;

    let hook_name = pnpmfile
        .strip_prefix(&workspace)
        .unwrap_or(&pnpmfile)
        .display()
        .to_string();
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_view(args.view)
        .with_combined(args.combined_precedence())
        .with_color(!args.no_color)
        .with_hook_name(hook_name);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    // Print error chains in verbose mode
    if args.verbose && !result.errors.is_empty() {
        eprintln!();
        eprintln!("Errors encountered:");
        for error in &result.errors {
            eprintln!("  - {}", error);
            let mut cause = std::error::Error::source(&error.source);
            while let Some(inner) = cause {
                eprintln!("    caused by: {}", inner);
                cause = inner.source();
            }
        }
    }

    if !result.errors.is_empty() {
        Ok(ExitCode::from(PARTIAL_FAILURE))
    } else if args.exit_code && result.changed_packages() > 0 {
        Ok(ExitCode::from(CHANGES_FOUND))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

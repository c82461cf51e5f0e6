//! Output formatting for inspection results
//!
//! This module provides:
//! - Text output with colored change annotations
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::MergePrecedence;
use crate::inspector::{Inspection, InspectorResult};
use crate::manifest::DEFAULT_PNPMFILE;
use crate::view::ViewMode;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary line only
    Quiet,
    #[default]
    Normal,
    /// Adds missing-manifest reasons and name conflicts
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Which view of each package to print
    pub view: ViewMode,
    /// Merge all groups into one list using this precedence
    pub combined: Option<MergePrecedence>,
    /// Whether to use colors
    pub color: bool,
    /// File name used in `Added by` / `Deleted by` annotations
    pub hook_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            view: ViewMode::default(),
            combined: None,
            color: true,
            hook_name: DEFAULT_PNPMFILE.to_string(),
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            ..Self::default()
        }
    }

    /// Create configuration from CLI flags
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self::new(format, verbosity)
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn with_combined(mut self, precedence: Option<MergePrecedence>) -> Self {
        self.combined = precedence;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_hook_name(mut self, name: impl Into<String>) -> Self {
        self.hook_name = name.into();
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write every inspection, the errors, and the summary
    fn format(&self, result: &InspectorResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write just the summary
    fn format_summary(
        &self,
        result: &InspectorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format and write a single package
    fn format_inspection(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config)),
    }
}

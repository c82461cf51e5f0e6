//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Dependency groups annotated with what the hook did
//! - The raw package.json and pnpmfile views
//! - Errors and a summary with a per-kind breakdown

use crate::domain::{ChangeKind, DependencyGroup, GroupedSpecDiff, PackageManifest};
use crate::inspector::{Inspection, InspectionStatus, InspectorResult, MissingManifest};
use crate::output::{OutputConfig, OutputFormatter, Verbosity};
use crate::view::{combined_rows, group_rows, DependencyRow, ViewMode};
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Narrowest name column, so short lists still line up with each other
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.config.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_header(
        &self,
        inspection: &Inspection,
        note: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let title = self.paint(inspection.package.as_str(), |s| s.bold());
        let manifest = inspection
            .transformed
            .as_ref()
            .or(inspection.raw.as_ref())
            .filter(|m| m.name.is_some())
            .map(|m| format!(" ({})", m))
            .unwrap_or_default();
        writeln!(
            writer,
            "{}{}: {}",
            title,
            self.paint(&manifest, |s| s.dimmed()),
            note
        )
    }

    fn change_note(&self, diff: &GroupedSpecDiff) -> String {
        match diff.total_changes() {
            0 => self.paint("no changes", |s| s.dimmed()),
            1 => "1 change".to_string(),
            n => format!("{} changes", n),
        }
    }

    fn missing_reason(missing: MissingManifest) -> &'static str {
        match missing {
            MissingManifest::Raw => "package.json not found",
            MissingManifest::Transformed => "no manifest produced by the pnpmfile hook",
            MissingManifest::Both => "neither package.json nor hook output found",
        }
    }

    fn write_row(
        &self,
        row: &DependencyRow,
        width: usize,
        show_group: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = format!("{:width$}", row.name, width = width);
        let annotation = match (&row.change, row.annotation(&self.config.hook_name)) {
            (Some(change), Some(text)) => {
                let text = format!("[{}]", text);
                let styled = match change.kind() {
                    ChangeKind::Added => self.paint(&text, |s| s.green()),
                    ChangeKind::Changed => self.paint(&text, |s| s.yellow()),
                    ChangeKind::Removed => self.paint(&text, |s| s.red()),
                };
                format!(" {}", styled)
            }
            _ => String::new(),
        };
        let group = if show_group {
            format!(" {}", self.paint(&format!("({})", row.group), |s| s.dimmed()))
        } else {
            String::new()
        };

        let range = match row.change.as_ref().map(|c| c.kind()) {
            Some(ChangeKind::Removed) => self.paint(&row.version_range, |s| s.strikethrough()),
            Some(_) => self.paint(&row.version_range, |s| s.bright_white().bold()),
            None => row.version_range.clone(),
        };

        writeln!(writer, "    {} {}{}{}", name, range, annotation, group)
    }

    fn name_width(rows: &[DependencyRow]) -> usize {
        rows.iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH)
    }

    fn write_groups(
        &self,
        raw: &PackageManifest,
        transformed: &PackageManifest,
        diff: &GroupedSpecDiff,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for group in DependencyGroup::all() {
            let rows = group_rows(raw, transformed, diff.group(*group), *group);
            if rows.is_empty() {
                continue;
            }
            writeln!(writer, "  {}", self.paint(group.display_name(), |s| s.cyan()))?;
            let width = Self::name_width(&rows);
            for row in &rows {
                self.write_row(row, width, false, writer)?;
            }
        }
        Ok(())
    }

    fn write_combined(
        &self,
        raw: &PackageManifest,
        transformed: &PackageManifest,
        diff: &GroupedSpecDiff,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let precedence = self.config.combined.unwrap_or_default();
        let rows = combined_rows(raw, transformed, diff, precedence);
        let width = Self::name_width(&rows);
        for row in &rows {
            self.write_row(row, width, true, writer)?;
        }

        for conflict in diff.conflicts() {
            let groups: Vec<String> = conflict
                .records
                .iter()
                .map(|(group, record)| format!("{} {}", group, record))
                .collect();
            let note = format!(
                "note: {} is recorded in several groups: {}",
                conflict.name,
                groups.join(", ")
            );
            writeln!(writer, "    {}", self.paint(&note, |s| s.dimmed()))?;
        }
        Ok(())
    }

    fn write_spec_view(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let (raw, transformed, diff) =
            match (&inspection.raw, &inspection.transformed, &inspection.diff) {
                (Some(raw), Some(transformed), Some(diff)) => (raw, transformed, diff),
                _ => return self.write_no_data(inspection, writer),
            };

        self.write_header(inspection, &self.change_note(diff), writer)?;
        if self.config.combined.is_some() {
            self.write_combined(raw, transformed, diff, writer)
        } else {
            self.write_groups(raw, transformed, diff, writer)
        }
    }

    fn write_no_data(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let note = self.paint("no data available", |s| s.dimmed());
        self.write_header(inspection, &note, writer)?;
        if let InspectionStatus::NoData(missing) = inspection.status() {
            if self.config.verbosity == Verbosity::Verbose {
                writeln!(writer, "  {}", Self::missing_reason(missing))?;
            }
        }
        Ok(())
    }

    fn write_package_json_view(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let Some(raw) = &inspection.raw else {
            return self.write_no_data(inspection, writer);
        };
        self.write_header(inspection, "package.json", writer)?;
        let json = serde_json::to_string_pretty(&raw.to_json()).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    fn write_pnpmfile_view(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if let Some(error) = &inspection.script_error {
            let note = format!("{} unreadable: {}", self.config.hook_name, error);
            return self.write_header(inspection, &self.paint(&note, |s| s.yellow()), writer);
        }
        match &inspection.script {
            Some(script) => {
                self.write_header(inspection, &self.config.hook_name, writer)?;
                write!(writer, "{}", script)?;
                if !script.ends_with('\n') {
                    writeln!(writer)?;
                }
                Ok(())
            }
            None => {
                let note = format!("{} not found", self.config.hook_name);
                self.write_header(inspection, &self.paint(&note, |s| s.dimmed()), writer)
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &InspectorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.config.verbosity == Verbosity::Quiet {
            return self.format_summary(result, writer);
        }

        for inspection in &result.inspections {
            self.format_inspection(inspection, writer)?;
            writeln!(writer)?;
        }

        if !result.errors.is_empty() {
            writeln!(writer, "{}:", self.paint("Errors", |s| s.red().bold()))?;
            for error in &result.errors {
                if self.config.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
            writeln!(writer)?;
        }

        // The pnpmfile view has nothing to summarize
        if self.config.view == ViewMode::Spec {
            self.format_summary(result, writer)?;
        }
        Ok(())
    }

    fn format_summary(
        &self,
        result: &InspectorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let diffs = || result.inspections.iter().filter_map(|i| i.diff.as_ref());
        let total: usize = diffs().map(|d| d.total_changes()).sum();

        if self.config.verbosity == Verbosity::Quiet {
            if total == 0 {
                writeln!(writer, "{}", self.paint("No changes", |s| s.dimmed()))?;
            } else {
                writeln!(writer, "{} changed", self.paint(&total.to_string(), |s| s.yellow()))?;
            }
            return Ok(());
        }

        let count = |kind: ChangeKind| -> usize { diffs().map(|d| d.count(kind)).sum() };
        let packages = result.inspections.len();
        let without_data = result
            .inspections
            .iter()
            .filter(|i| i.diff.is_none())
            .count();

        let mut line = format!(
            "{} {} inspected, {} changed",
            packages,
            if packages == 1 { "package" } else { "packages" },
            result.changed_packages()
        );
        if without_data > 0 {
            line.push_str(&format!(", {} without data", without_data));
        }
        writeln!(writer, "{}", self.paint(&line, |s| s.bold()))?;

        if total > 0 {
            let added = count(ChangeKind::Added).to_string();
            let changed = count(ChangeKind::Changed).to_string();
            let removed = count(ChangeKind::Removed).to_string();
            writeln!(
                writer,
                "  {} added, {} changed, {} removed",
                self.paint(&added, |s| s.green()),
                self.paint(&changed, |s| s.yellow()),
                self.paint(&removed, |s| s.red())
            )?;
        }
        if !result.errors.is_empty() {
            let failed = format!("{} failed", result.errors.len());
            writeln!(writer, "  {}", self.paint(&failed, |s| s.red()))?;
        }
        Ok(())
    }

    fn format_inspection(
        &self,
        inspection: &Inspection,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match self.config.view {
            ViewMode::Spec => self.write_spec_view(inspection, writer),
            ViewMode::PackageJson => self.write_package_json_view(inspection, writer),
            ViewMode::Pnpmfile => self.write_pnpmfile_view(inspection, writer),
        }
    }
}

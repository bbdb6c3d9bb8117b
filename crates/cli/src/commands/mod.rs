pub mod classify;
pub mod delete;
pub mod find;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use log::debug;
use pathsift_fs::{CombineMode, CriteriaConfig, FileSelectionCriteria, WalkResult};
use pathsift_runtime::default_criteria_path;

pub use classify::ClassifyArgs;
pub use delete::DeleteArgs;
pub use find::FindArgs;

use crate::printer::{ColorChoice, OutputFormat, PrinterConfig, WalkPrinter, WalkRow, make_printer};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether path strings look like directories or files.
    ///
    /// Example:
    ///   pathsift classify ./build a/b/report.pdf 'C:'
    ///   pathsift classify --as-file a/b/xray
    Classify(ClassifyArgs),

    /// List files under a directory that match the selection criteria.
    ///
    /// Example:
    ///   pathsift find /var/log --pattern '*.log' --older-than-days 5
    Find(FindArgs),

    /// Delete files under a directory that match the selection criteria.
    ///
    /// Example:
    ///   pathsift delete /tmp/cache --pattern '*.tmp' --dry-run
    Delete(DeleteArgs),
}

/// File selection flags shared by `find` and `delete`.
///
/// Flags override the matching fields of the criteria file.
#[derive(Debug, Default, Args)]
pub struct SelectionArgs {
    /// Glob matched against file names (repeatable)
    #[arg(long = "pattern", short = 'p', value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Select files modified more than N days ago
    #[arg(long, value_name = "DAYS")]
    pub older_than_days: Option<u32>,

    /// Select files modified less than N days ago
    #[arg(long, value_name = "DAYS")]
    pub newer_than_days: Option<u32>,

    /// Select files whose permission bits equal this octal mode
    #[arg(long, value_name = "OCTAL")]
    pub mode: Option<String>,

    /// Select a file when any criterion matches instead of all
    #[arg(long)]
    pub any: bool,

    /// JSON criteria file (defaults to the per-user criteria file if present)
    #[arg(long, value_name = "FILE")]
    pub criteria: Option<PathBuf>,
}

impl SelectionArgs {
    pub fn build(&self, now: DateTime<Utc>) -> Result<FileSelectionCriteria> {
        let config = self.resolve_config()?;
        debug!("[criteria] {config:?}");
        config
            .into_criteria(now)
            .context("invalid file selection criteria")
    }

    fn resolve_config(&self) -> Result<CriteriaConfig> {
        let file = match &self.criteria {
            Some(path) => Some(path.clone()),
            None => Some(default_criteria_path()).filter(|p| p.is_file()),
        };

        let base = match file {
            Some(path) => CriteriaConfig::load(&path)
                .with_context(|| format!("loading criteria from {}", path.display()))?,
            None => CriteriaConfig::default(),
        };

        Ok(self.apply(base))
    }

    fn apply(&self, mut config: CriteriaConfig) -> CriteriaConfig {
        if !self.patterns.is_empty() {
            config.name_patterns = self.patterns.clone();
        }
        if let Some(days) = self.older_than_days {
            config.older_than = None;
            config.older_than_days = Some(days);
        }
        if let Some(days) = self.newer_than_days {
            config.newer_than = None;
            config.newer_than_days = Some(days);
        }
        if let Some(mode) = &self.mode {
            config.mode = Some(mode.clone());
        }
        if self.any {
            config.combine = CombineMode::Or;
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn WalkPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        make_printer(PrinterConfig {
            format,
            color,
            show_summary: !self.quiet,
        })
    }
}

/// Print a walk result and map it to the process exit code.
pub fn report(result: &WalkResult, output: &OutputOptions) -> Result<ExitCode> {
    let mut printer = output.make_printer();
    print_result(printer.as_mut(), result)?;

    Ok(if result.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

pub(crate) fn print_result(printer: &mut dyn WalkPrinter, result: &WalkResult) -> Result<()> {
    printer.begin(result)?;
    for file in result.files() {
        printer.print_row(&WalkRow::from(file), result)?;
    }
    for err in result.errors() {
        printer.print_error(err)?;
    }
    printer.finish(result)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use log::error;
use pathsift_fs::{DirectoryRecord, find_files};

use crate::commands::{OutputOptions, SelectionArgs, report};

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Directory to search
    pub start: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Copy the found files into DIR, keeping their directory layout
    #[arg(long, value_name = "DIR")]
    pub copy_to: Option<PathBuf>,
}

pub fn run(args: FindArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[find] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: FindArgs) -> Result<ExitCode> {
    let criteria = args.selection.build(Utc::now())?;
    let result = find_files(&args.start, &criteria)
        .with_context(|| format!("searching {}", args.start.display()))?;

    if let Some(dest) = &args.copy_to {
        let base = DirectoryRecord::from_path(result.start_path())?;
        let new_base = DirectoryRecord::from_path(dest)?;
        let copied = result
            .copy_to_tree(&base, &new_base)
            .with_context(|| format!("copying into {}", dest.display()))?;
        eprintln!(
            "[find] copied {} files to {}",
            copied.found_files().len(),
            copied.start_path().display()
        );
    }

    report(&result, &args.output)
}

use std::{io, path::Path, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use log::{error, info};
use pathsift_fs::{WalkMode, delete_files, walk_with_remover};

use crate::commands::{OutputOptions, SelectionArgs, report};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Directory to clean
    pub start: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Report what would be deleted without touching the filesystem
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

pub fn run(args: DeleteArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[delete] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: DeleteArgs) -> Result<ExitCode> {
    let criteria = args.selection.build(Utc::now())?;

    let result = if args.dry_run {
        let mut skip = |path: &Path| -> io::Result<()> {
            info!("[delete] dry run, keeping {:?}", path);
            Ok(())
        };
        walk_with_remover(&args.start, &criteria, WalkMode::Delete, &mut skip)
    } else {
        delete_files(&args.start, &criteria)
    }
    .with_context(|| format!("cleaning {}", args.start.display()))?;

    report(&result, &args.output)
}

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use log::error;
use pathsift_paths::{Classification, PathError, classify_as_directory, classify_as_file};

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Path strings to classify
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Ask whether each path names a file rather than a directory
    #[arg(long)]
    pub as_file: bool,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ClassifyArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e}");
            eprintln!("[classify] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ClassifyArgs) -> Result<ExitCode> {
    let mut failed = false;

    for raw in &args.paths {
        match classify(raw, args.as_file) {
            Ok(c) if args.json => println!("{}", json_line(raw, c)),
            Ok(c) => println!("{raw}\t{}", label(c)),
            Err(e) => {
                failed = true;
                eprintln!("[classify] {raw:?}: {e}");
            }
        }
    }

    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn classify(raw: &str, as_file: bool) -> Result<Classification, PathError> {
    if as_file {
        classify_as_file(raw)
    } else {
        classify_as_directory(raw)
    }
}

pub(crate) fn label(c: Classification) -> &'static str {
    match c {
        Classification::Directory => "directory",
        Classification::File => "file",
        Classification::Ambiguous {
            best_guess_is_directory: true,
        } => "ambiguous (probably a directory)",
        Classification::Ambiguous {
            best_guess_is_directory: false,
        } => "ambiguous (probably a file)",
        Classification::NotAPath => "not a path",
    }
}

pub(crate) fn json_line(raw: &str, c: Classification) -> serde_json::Value {
    let (kind, guess) = match c {
        Classification::Directory => ("directory", None),
        Classification::File => ("file", None),
        Classification::Ambiguous {
            best_guess_is_directory,
        } => (
            "ambiguous",
            Some(if best_guess_is_directory { "directory" } else { "file" }),
        ),
        Classification::NotAPath => ("not_a_path", None),
    };

    serde_json::json!({
        "path": raw,
        "classification": kind,
        "best_guess": guess,
    })
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

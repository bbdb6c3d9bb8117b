use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use pathsift_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "pathsift",
    version,
    about = "Classify path strings and find or delete files by name, age and mode"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Classify(args) => commands::classify::run(args),
        Command::Find(args) => commands::find::run(args),
        Command::Delete(args) => commands::delete::run(args),
    }
}

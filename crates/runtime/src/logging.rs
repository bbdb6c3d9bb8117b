use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::{Mutex, OnceLock},
};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// When set, log lines are appended to this file instead of stderr.
pub const PROGRAM_LOG_FILE: &str = "PATHSIFT_LOG_FILE";

enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

pub struct Logger {
    level: Level,
    target: LogTarget,
}

impl Logger {
    fn format_line(record: &Record<'_>) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format_line(record);
        match &self.target {
            LogTarget::Stderr => eprintln!("{line}"),
            LogTarget::File(file) => {
                // A poisoned lock only means another thread panicked mid-write.
                let mut f = file.lock().unwrap_or_else(|p| p.into_inner());
                let _ = writeln!(f, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let LogTarget::File(file) = &self.target {
            let mut f = file.lock().unwrap_or_else(|p| p.into_inner());
            let _ = f.flush();
        }
    }
}

fn get_level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

fn open_target(path: Option<&Path>) -> LogTarget {
    let Some(path) = path else {
        return LogTarget::Stderr;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => LogTarget::File(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "[logging] cannot open {}: {e}; logging to stderr",
                path.display()
            );
            LogTarget::Stderr
        }
    }
}

pub fn init() -> Result<(), SetLoggerError> {
    let file = std::env::var_os(PROGRAM_LOG_FILE).filter(|v| !v.is_empty());
    _init(get_level_from_env(), file.as_deref().map(Path::new))
}

pub fn _init(level: Level, log_file: Option<&Path>) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller gets to pick the level and target; later
    // calls must not touch the max level or it would disagree with
    // the installed logger.
    let init_call = LOGGER.get().is_none();

    let logger = LOGGER.get_or_init(|| Logger {
        level,
        target: open_target(log_file),
    });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

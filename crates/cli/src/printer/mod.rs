use std::{
    io::{self, IsTerminal, Write},
    path::Path,
};

use chrono::{DateTime, SecondsFormat, Utc};
use pathsift_fs::{WalkMode, WalkResult, WalkedFile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Enable colors when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to print the trailing summary to stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// One selected file.
#[derive(Debug)]
pub struct WalkRow<'a> {
    pub path: &'a Path,
    pub size: u64,
    pub mode: u32,
    pub modified: DateTime<Utc>,
}

impl<'a> From<&'a WalkedFile> for WalkRow<'a> {
    fn from(file: &'a WalkedFile) -> Self {
        Self {
            path: file.record.path(),
            size: file.info.size(),
            mode: file.info.mode(),
            modified: file.info.modified(),
        }
    }
}

/// Renders a [`WalkResult`]: rows to stdout, errors and summary to stderr.
pub trait WalkPrinter {
    fn begin(&mut self, result: &WalkResult) -> io::Result<()>;

    fn print_row(&mut self, row: &WalkRow<'_>, result: &WalkResult) -> io::Result<()>;

    fn print_error(&mut self, message: &str) -> io::Result<()>;

    fn finish(&mut self, result: &WalkResult) -> io::Result<()>;
}

pub fn make_printer(cfg: PrinterConfig) -> Box<dyn WalkPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
    }
}

fn verb(mode: WalkMode) -> &'static str {
    match mode {
        WalkMode::Find => "found",
        WalkMode::Delete => "deleted",
    }
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` color resolves to no color for arbitrary writers.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    #[inline]
    fn format_path(&self, path: &Path) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", path.display())
        } else {
            path.display().to_string()
        }
    }
}

impl<W: Write, E: Write> WalkPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _result: &WalkResult) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &WalkRow<'_>, _result: &WalkResult) -> io::Result<()> {
        let path = self.format_path(row.path);
        writeln!(self.out, "{path}")
    }

    fn print_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "[error] {message}")
    }

    fn finish(&mut self, result: &WalkResult) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        writeln!(
            self.err,
            "\n[{}] {} {} files under {} ({} dirs, {} errors)",
            result.mode(),
            verb(result.mode()),
            result.files().len(),
            result.start_path().display(),
            result.directories().len(),
            result.errors().len(),
        )
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> WalkPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _result: &WalkResult) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &WalkRow<'_>, result: &WalkResult) -> io::Result<()> {
        let obj = serde_json::json!({
            "kind": result.mode().to_string(),
            "path": row.path.display().to_string(),
            "size": row.size,
            "mode": format!("{:o}", row.mode),
            "modified": row.modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        });
        writeln!(self.out, "{obj}")
    }

    fn print_error(&mut self, message: &str) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "error",
            "message": message,
        });
        writeln!(self.err, "{obj}")
    }

    fn finish(&mut self, result: &WalkResult) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        let obj = serde_json::json!({
            "type": "summary",
            "kind": result.mode().to_string(),
            "start": result.start_path().display().to_string(),
            "files": result.files().len(),
            "directories": result.directories().len(),
            "errors": result.errors().len(),
        });
        writeln!(self.err, "{obj}")
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;

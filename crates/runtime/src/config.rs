use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "pathsift";
pub const PROGRAM_LOG_LEVEL: &str = "PATHSIFT_LOG_LEVEL";
pub const CRITERIA_FILE_NAME: &str = "criteria.json";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var)
        && !dir.is_empty()
    {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Per-user configuration directory for the program.
///
/// `XDG_CONFIG_HOME` wins when set; otherwise the platform config dir
/// reported by `dirs`, falling back to `$HOME/.config`.
pub fn config_dir() -> PathBuf {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir().unwrap_or_else(|| xdg_or_home("XDG_CONFIG_HOME", ".config")),
    };
    base.join(PROGRAM_NAME)
}

/// Default location of the file selection criteria consumed by `find`/`delete`.
pub fn default_criteria_path() -> PathBuf {
    config_dir().join(CRITERIA_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

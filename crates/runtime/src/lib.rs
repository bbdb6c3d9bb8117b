mod config;
pub mod logging;

pub use config::{
    CRITERIA_FILE_NAME, PROGRAM_LOG_LEVEL, PROGRAM_NAME, config_dir, default_criteria_path,
    xdg_or_home,
};

pub use logging::init;

use std::{io, path::PathBuf};

use pathsift_paths::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("invalid file name pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid file mode '{0}': expected octal digits such as 644")]
    Mode(String),

    #[error("age of {0} days is out of range")]
    Age(u32),

    #[error("invalid criteria config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot read criteria config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("start path does not exist: {}", .0.display())]
    StartPathMissing(PathBuf),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

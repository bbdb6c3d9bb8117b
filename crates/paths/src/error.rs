use std::{io, path::PathBuf};

use thiserror::Error;

/// Validation failures for path strings handed to the classifier,
/// helpers and record constructors.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path string is empty")]
    Empty,

    /// Three or more consecutive dots never form a valid path.
    #[error("invalid dot sequence in path '{0}'")]
    InvalidDots(String),

    #[error("'{0}' names a file, not a directory")]
    NotADirectory(String),

    #[error("'{0}' names a directory, not a file")]
    NotAFile(String),

    #[error("'{0}' does not contain a file name")]
    MissingFileName(String),

    #[error("path '{}' is not valid UTF-8", .0.display())]
    NonUtf8(PathBuf),

    #[error("'{}' is not located under '{}'", path.display(), base.display())]
    OutsideBase { path: PathBuf, base: PathBuf },

    #[error("cannot resolve '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

use std::{fs, path::Path};

use log::debug;

use crate::{PathError, tokenizer::PathTokens};

/// Outcome of deciding what a path string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Directory,
    File,
    /// The string could be either. The guess is a heuristic only; callers
    /// must decide explicitly whether to trust it.
    Ambiguous { best_guess_is_directory: bool },
    /// A bare word with neither dots nor separators, e.g. `common`.
    NotAPath,
}

impl Classification {
    #[inline]
    pub fn is_directory(self) -> bool {
        self == Classification::Directory
    }

    #[inline]
    pub fn is_file(self) -> bool {
        self == Classification::File
    }

    #[inline]
    pub fn is_ambiguous(self) -> bool {
        matches!(self, Classification::Ambiguous { .. })
    }
}

/// Which question the caller is asking. Only affects how a trailing
/// extension-less element (`a/b/xray`) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Directory,
    File,
}

/// Lexical verdict before it is mapped through an [`Intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Directory,
    File,
    NotAPath,
    /// Separators present, and the final element carries no dot.
    UndottedTail,
    Ambiguous { best_guess_is_directory: bool },
}

/// Decide whether `raw` denotes a directory.
///
/// An existing target is classified from its metadata; otherwise the
/// string shape decides.
pub fn classify_as_directory(raw: &str) -> Result<Classification, PathError> {
    classify_with(raw, Intent::Directory, host_is_dir)
}

/// Decide whether `raw` denotes a file.
///
/// Same procedure as [`classify_as_directory`], except that a path whose
/// final element has no dot (`a/b/xray`) is reported as ambiguous with a
/// directory guess instead of as a directory.
pub fn classify_as_file(raw: &str) -> Result<Classification, PathError> {
    classify_with(raw, Intent::File, host_is_dir)
}

fn host_is_dir(path: &Path) -> Option<bool> {
    fs::metadata(path).ok().map(|m| m.is_dir())
}

fn classify_with<F>(raw: &str, intent: Intent, probe: F) -> Result<Classification, PathError>
where
    F: Fn(&Path) -> Option<bool>,
{
    if raw.is_empty() {
        return Err(PathError::Empty);
    }

    let tokens = PathTokens::scan(raw);

    if let Some(is_dir) = probe(Path::new(tokens.as_str())) {
        debug!("[classify] {:?} exists, is_dir={is_dir}", tokens.as_str());
        return Ok(if is_dir {
            Classification::Directory
        } else {
            Classification::File
        });
    }

    let shape = lexical_shape(&tokens)?;
    Ok(match (shape, intent) {
        (Shape::Directory, _) => Classification::Directory,
        (Shape::File, _) => Classification::File,
        (Shape::NotAPath, _) => Classification::NotAPath,
        (Shape::UndottedTail, Intent::Directory) => Classification::Directory,
        (Shape::UndottedTail, Intent::File) => Classification::Ambiguous {
            best_guess_is_directory: true,
        },
        (Shape::Ambiguous { best_guess_is_directory }, _) => {
            Classification::Ambiguous { best_guess_is_directory }
        }
    })
}

/// Decision table over the string alone. Rules are applied in order.
fn lexical_shape(tokens: &PathTokens) -> Result<Shape, PathError> {
    let s = tokens.as_str();

    if s.contains("...") {
        return Err(PathError::InvalidDots(s.to_owned()));
    }

    if tokens.is_volume_only() {
        return Ok(Shape::Directory);
    }

    let dot_count = tokens.dots().len();

    // "." / "./x" and ".." / "../x"
    if s.starts_with('.') && dot_count == 1 {
        return Ok(Shape::Directory);
    }
    if s.starts_with("..") && dot_count == 2 {
        return Ok(Shape::Directory);
    }

    let (last_dot, last_sep) = (tokens.last_dot(), tokens.last_separator());

    let (Some(first_content), Some(last_content)) =
        (tokens.first_content(), tokens.last_content())
    else {
        if last_dot.is_none() && last_sep.is_none() {
            return Ok(Shape::NotAPath);
        }
        // Nothing but separators, dots and punctuation.
        return Ok(Shape::Directory);
    };

    match (last_dot, last_sep) {
        (None, None) => Ok(Shape::NotAPath),

        (None, Some(sep)) => {
            if last_content > sep {
                Ok(Shape::UndottedTail)
            } else {
                Ok(Shape::Directory)
            }
        }

        // ".common" vs "common.txt"
        (Some(dot), None) => {
            if dot < first_content {
                Ok(Shape::Directory)
            } else {
                Ok(Shape::File)
            }
        }

        (Some(dot), Some(sep)) => {
            if tokens.ends_with_separator() {
                return Ok(Shape::Directory);
            }
            if dot > sep && last_content > sep {
                return Ok(Shape::File);
            }
            if sep > dot {
                return Ok(if last_content > sep {
                    Shape::UndottedTail
                } else {
                    Shape::Directory
                });
            }

            // The final content run sits before both the last separator
            // and the last dot, e.g. "dir/.".
            let run_start = tokens.final_content_run_start().unwrap_or(first_content);
            let guess_file = run_start > sep && run_start > dot;
            Ok(Shape::Ambiguous {
                best_guess_is_directory: !guess_file,
            })
        }
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

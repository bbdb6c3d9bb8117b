use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::{
    PathError,
    tokenizer::{is_separator, normalize_separators, volume_name},
};

/// Rewrite every `/` and `\` to the host separator.
#[inline]
pub fn adjust_path_slash(path: &str) -> String {
    normalize_separators(path)
}

#[inline]
pub fn ends_with_separator(path: &str) -> bool {
    path.chars().next_back().is_some_and(is_separator)
}

pub fn add_trailing_separator(path: &str) -> Result<String, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut adjusted = adjust_path_slash(path);
    if !ends_with_separator(&adjusted) {
        adjusted.push(MAIN_SEPARATOR);
    }
    Ok(adjusted)
}

/// Drop trailing separators. A bare root (`/`, `C:\`) keeps its separator.
pub fn strip_trailing_separator(path: &str) -> String {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.len() == path.len() {
        return path.to_owned();
    }

    if trimmed.is_empty() || trimmed == volume_name(path) {
        // Keep exactly one separator so the root stays a root.
        return path[..trimmed.len() + 1].to_owned();
    }
    trimmed.to_owned()
}

/// Final element of `path`. Empty when `path` ends in a separator.
pub fn last_path_element(path: &str) -> Result<String, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let adjusted = adjust_path_slash(path);
    Ok(adjusted
        .rsplit(MAIN_SEPARATOR)
        .next()
        .unwrap_or_default()
        .to_owned())
}

/// Split a path into its directory part and its final element.
///
/// Leading and trailing spaces are ignored. Either half may be empty:
/// `"a/b/"` yields `("a/b", "")` and `"file.txt"` yields `("", "file.txt")`.
pub fn split_path_and_file_name(path: &str) -> Result<(String, String), PathError> {
    let trimmed = path.trim_matches(' ');
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }

    let adjusted = adjust_path_slash(trimmed);
    match adjusted.rfind(MAIN_SEPARATOR) {
        None => Ok((String::new(), adjusted)),
        Some(idx) => {
            let name = adjusted[idx + 1..].to_owned();
            let dir = if idx == 0 || adjusted[..idx] == *volume_name(&adjusted) {
                adjusted[..=idx].to_owned()
            } else {
                adjusted[..idx].to_owned()
            };
            Ok((dir, name))
        }
    }
}

/// Split a file name into base name and extension (leading dot included).
///
/// Dot-files such as `.bashrc` and names ending in a dot have no extension.
pub fn split_name_and_ext(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Resolve `path` against the current directory and remove `.`/`..`
/// components lexically. The filesystem is not consulted.
pub fn make_absolute(path: &str) -> Result<PathBuf, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::Empty);
    }

    let adjusted = adjust_path_slash(path);
    let absolute = std::path::absolute(&adjusted).map_err(|source| PathError::Io {
        path: adjusted.clone(),
        source,
    })?;
    Ok(lexical_clean(&absolute))
}

pub fn join_paths(base: &str, tail: &str) -> PathBuf {
    let base = adjust_path_slash(base);
    let tail = adjust_path_slash(tail);
    let joined = Path::new(&base).join(tail.trim_start_matches(MAIN_SEPARATOR));
    lexical_clean(&joined)
}

pub(crate) fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root; on a relative path
                // with nothing left to pop it is kept.
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;

use std::{
    fs::{self, Metadata},
    io,
    path::{Path, PathBuf},
};

use log::debug;
use pathsift_paths::{
    Classification, PathError, classify_as_directory, classify_as_file, make_absolute,
    split_name_and_ext, split_path_and_file_name, strip_trailing_separator,
};
use thiserror::Error;

use crate::AugmentedFileInfo;

/// A directory record could not be fully built.
///
/// `partial` holds whatever was resolved before the failure; the walker
/// keeps it so the directory still shows up in the result.
#[derive(Debug, Error)]
#[error("directory record for '{}': {source}", path.display())]
pub struct RecordError {
    pub path: PathBuf,
    pub partial: Option<Box<DirectoryRecord>>,
    #[source]
    pub source: PathError,
}

/// Normalized, absolute directory path with an optional metadata snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    path: PathBuf,
    initialized: bool,
    info: Option<AugmentedFileInfo>,
}

impl DirectoryRecord {
    /// Build a record from a user-supplied string the caller asserts is a
    /// directory.
    pub fn new(raw: &str) -> Result<Self, PathError> {
        match classify_as_directory(raw)? {
            Classification::File => return Err(PathError::NotADirectory(raw.to_owned())),
            // The caller asked for a directory; a bare word is a relative
            // directory name and an ambiguous tail is taken at its word.
            Classification::Ambiguous {
                best_guess_is_directory,
            } => {
                debug!(
                    "[record] treating ambiguous {raw:?} as a directory (guess was dir={best_guess_is_directory})"
                );
            }
            Classification::Directory | Classification::NotAPath => {}
        }

        let path = make_absolute(&strip_trailing_separator(raw))?;
        Ok(Self {
            path,
            initialized: true,
            info: None,
        })
    }

    /// Build a record for a path already known to be a directory.
    pub fn from_path(path: &Path) -> Result<Self, RecordError> {
        let raw = path.to_str().ok_or_else(|| RecordError {
            path: path.to_path_buf(),
            partial: None,
            source: PathError::NonUtf8(path.to_path_buf()),
        })?;

        let absolute = make_absolute(&strip_trailing_separator(raw)).map_err(|source| {
            RecordError {
                path: path.to_path_buf(),
                partial: None,
                source,
            }
        })?;

        Ok(Self {
            path: absolute,
            initialized: true,
            info: None,
        })
    }

    /// Build a record from a traversal entry and the metadata read for it.
    ///
    /// When the path resolves but the metadata is unusable the error
    /// carries the path-only record as `partial`.
    /// Absolute paths are kept as given; relative ones are resolved like
    /// [`from_path`](Self::from_path).
    pub fn from_entry(path: &Path, metadata: io::Result<Metadata>) -> Result<Self, RecordError> {
        let mut record = if path.is_absolute() {
            Self::verbatim(path.to_path_buf())
        } else {
            Self::from_path(path)?
        };

        let metadata = match metadata {
            Ok(m) => m,
            Err(source) => {
                return Err(record.into_partial(PathError::Io {
                    path: path.display().to_string(),
                    source,
                }));
            }
        };

        if !metadata.is_dir() {
            let raw = path.display().to_string();
            return Err(record.into_partial(PathError::NotADirectory(raw)));
        }

        let name = match record.path.file_name().map(|n| n.to_str().map(str::to_owned)) {
            None => record.path.display().to_string(),
            Some(Some(n)) => n,
            Some(None) => {
                let err = PathError::NonUtf8(record.path.clone());
                return Err(record.into_partial(err));
            }
        };
        let mut info = AugmentedFileInfo::from_metadata(name, &metadata);
        let parent = record.path.parent().map(Path::to_path_buf);
        if let Some(parent) = parent
            && let Err(source) = info.set_dir_path(&parent)
        {
            return Err(record.into_partial(source));
        }
        record.info = Some(info);
        Ok(record)
    }

    pub(crate) fn verbatim(path: PathBuf) -> Self {
        Self {
            path,
            initialized: true,
            info: None,
        }
    }

    fn into_partial(self, source: PathError) -> RecordError {
        RecordError {
            path: self.path.clone(),
            partial: Some(Box::new(self)),
            source,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn info(&self) -> Option<&AugmentedFileInfo> {
        self.info.as_ref()
    }

    pub fn set_info(&mut self, info: AugmentedFileInfo) {
        self.info = Some(info);
    }

    /// Live check against the filesystem.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.is_dir())
    }

    pub fn make_dir_all(&self) -> io::Result<()> {
        fs::create_dir_all(&self.path)
    }

    /// Re-root this directory: `base/x/y` becomes `new_base/x/y`.
    pub fn substitute_base(
        &self,
        base: &DirectoryRecord,
        new_base: &DirectoryRecord,
    ) -> Result<Self, PathError> {
        let rel = self
            .path
            .strip_prefix(&base.path)
            .map_err(|_| PathError::OutsideBase {
                path: self.path.clone(),
                base: base.path.clone(),
            })?;

        Ok(Self {
            path: new_base.path.join(rel),
            initialized: true,
            info: None,
        })
    }
}

/// A file inside an owned [`DirectoryRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    dir: DirectoryRecord,
    name: String,
    ext: String,
    path: PathBuf,
    exists: bool,
}

impl FileRecord {
    /// Build a record from a user-supplied string the caller asserts is a
    /// file.
    pub fn new(raw: &str) -> Result<Self, PathError> {
        match classify_as_file(raw)? {
            Classification::Directory => return Err(PathError::NotAFile(raw.to_owned())),
            Classification::Ambiguous {
                best_guess_is_directory,
            } => {
                debug!(
                    "[record] treating ambiguous {raw:?} as a file (guess was dir={best_guess_is_directory})"
                );
            }
            Classification::File | Classification::NotAPath => {}
        }

        let (dir, name) = split_path_and_file_name(raw)?;
        if name.is_empty() {
            return Err(PathError::MissingFileName(raw.to_owned()));
        }
        let dir = if dir.is_empty() { ".".to_owned() } else { dir };

        let dir = DirectoryRecord::from_path(Path::new(&dir)).map_err(|e| e.source)?;
        Self::from_dir_and_name(dir, &name)
    }

    /// Build a record from a user-supplied file name. Surrounding spaces
    /// are dropped; blank names and names with a host separator are
    /// rejected.
    pub fn from_dir_and_name(dir: DirectoryRecord, file_name: &str) -> Result<Self, PathError> {
        let file_name = file_name.trim_matches(' ');
        if file_name.is_empty() {
            return Err(PathError::MissingFileName(dir.path.display().to_string()));
        }
        if file_name.contains(std::path::is_separator) {
            return Err(PathError::MissingFileName(file_name.to_owned()));
        }

        Ok(Self::from_entry(dir, file_name))
    }

    /// Build a record for a name the OS reported, taken verbatim.
    pub(crate) fn from_entry(dir: DirectoryRecord, file_name: &str) -> Self {
        let (name, ext) = split_name_and_ext(file_name);
        let path = dir.path.join(file_name);
        let exists = fs::symlink_metadata(&path).is_ok();

        Self {
            name: name.to_owned(),
            ext: ext.to_owned(),
            path,
            exists,
            dir,
        }
    }

    #[inline]
    pub fn dir(&self) -> &DirectoryRecord {
        &self.dir
    }

    /// Base name without extension.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension including the leading dot, or `""`.
    #[inline]
    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.ext)
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Existence as observed when the record was built or last refreshed.
    #[inline]
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn refresh_exists(&mut self) -> bool {
        self.exists = fs::symlink_metadata(&self.path).is_ok();
        self.exists
    }

    pub(crate) fn mark_removed(&mut self) {
        self.exists = false;
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;

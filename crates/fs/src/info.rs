use std::{
    fs::Metadata,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use pathsift_paths::{PathError, strip_trailing_separator};

/// File metadata as reported by the OS, plus the directory the entry
/// was found in.
///
/// Two infos are equal when every metadata field and the directory path
/// agree; the time the info was built is ignored.
#[derive(Debug, Clone)]
pub struct AugmentedFileInfo {
    name: String,
    size: u64,
    /// Permission bits only (`0o7777` mask on Unix).
    mode: u32,
    modified: DateTime<Utc>,
    is_dir: bool,
    dir_path: Option<PathBuf>,
    initialized_at: DateTime<Utc>,
}

impl AugmentedFileInfo {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mode: u32,
        modified: DateTime<Utc>,
        is_dir: bool,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            modified,
            is_dir,
            dir_path: None,
            initialized_at: Utc::now(),
        }
    }

    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> Self {
        let is_dir = metadata.is_dir();
        Self::new(
            name,
            if is_dir { 0 } else { metadata.len() },
            mode_bits(metadata),
            to_utc(metadata.modified().ok()),
            is_dir,
        )
    }

    /// Like [`from_metadata`](Self::from_metadata), also recording the
    /// owning directory.
    pub fn with_dir_path(
        dir_path: &Path,
        name: impl Into<String>,
        metadata: &Metadata,
    ) -> Result<Self, PathError> {
        let mut info = Self::from_metadata(name, metadata);
        info.set_dir_path(dir_path)?;
        Ok(info)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn dir_path(&self) -> Option<&Path> {
        self.dir_path.as_deref()
    }

    #[inline]
    pub fn initialized_at(&self) -> DateTime<Utc> {
        self.initialized_at
    }

    /// Full path of the entry, when the owning directory is known.
    pub fn full_path(&self) -> Option<PathBuf> {
        self.dir_path.as_ref().map(|d| d.join(&self.name))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = size;
    }

    pub fn set_mode(&mut self, mode: u32) {
        self.mode = mode;
    }

    pub fn set_modified(&mut self, modified: DateTime<Utc>) {
        self.modified = modified;
    }

    pub fn set_is_dir(&mut self, is_dir: bool) {
        self.is_dir = is_dir;
    }

    /// Blank strings are rejected; a trailing separator is dropped.
    pub fn set_dir_path(&mut self, dir_path: &Path) -> Result<(), PathError> {
        let raw = dir_path
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(dir_path.to_path_buf()))?;
        if raw.trim().is_empty() {
            return Err(PathError::Empty);
        }

        self.dir_path = Some(PathBuf::from(strip_trailing_separator(raw)));
        Ok(())
    }
}

impl PartialEq for AugmentedFileInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.mode == other.mode
            && self.modified == other.modified
            && self.is_dir == other.is_dir
            && self.dir_path == other.dir_path
    }
}

impl Eq for AugmentedFileInfo {}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

// Unreadable timestamps (some filesystems, permission errors) fall back
// to the epoch rather than failing the whole entry.
fn to_utc(t: Option<SystemTime>) -> DateTime<Utc> {
    t.map(DateTime::<Utc>::from).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;

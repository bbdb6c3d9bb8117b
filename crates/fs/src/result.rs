use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    AugmentedFileInfo, DirectoryRecord, FileRecord,
    error::WalkError,
};

/// What a walk does with the files its criteria select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    Find,
    Delete,
}

impl fmt::Display for WalkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkMode::Find => f.write_str("find"),
            WalkMode::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub record: FileRecord,
    pub info: AugmentedFileInfo,
}

/// Everything one walk produced. Per-entry failures end up in
/// [`errors`](Self::errors) and never abort the walk.
#[derive(Debug, Clone)]
pub struct WalkResult {
    pub(crate) start_path: PathBuf,
    pub(crate) mode: WalkMode,
    pub(crate) directories: Vec<DirectoryRecord>,
    pub(crate) found_files: Vec<WalkedFile>,
    pub(crate) deleted_files: Vec<WalkedFile>,
    pub(crate) errors: Vec<String>,
}

impl WalkResult {
    pub(crate) fn new(start_path: PathBuf, mode: WalkMode) -> Self {
        Self {
            start_path,
            mode,
            directories: Vec::new(),
            found_files: Vec::new(),
            deleted_files: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn start_path(&self) -> &Path {
        &self.start_path
    }

    #[inline]
    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    /// Directories in visit order, the start directory first.
    #[inline]
    pub fn directories(&self) -> &[DirectoryRecord] {
        &self.directories
    }

    #[inline]
    pub fn found_files(&self) -> &[WalkedFile] {
        &self.found_files
    }

    #[inline]
    pub fn deleted_files(&self) -> &[WalkedFile] {
        &self.deleted_files
    }

    #[inline]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The files this walk acted on: found files for a find, deleted
    /// files for a delete.
    pub fn files(&self) -> &[WalkedFile] {
        match self.mode {
            WalkMode::Find => &self.found_files,
            WalkMode::Delete => &self.deleted_files,
        }
    }

    /// Mirror the recorded directories and found files under `new_base`.
    ///
    /// Every path below `base` is re-rooted at `new_base`. Stops at the
    /// first failure; whatever was copied until then stays on disk.
    pub fn copy_to_tree(
        &self,
        base: &DirectoryRecord,
        new_base: &DirectoryRecord,
    ) -> Result<WalkResult, WalkError> {
        info!(
            "[copy] {} -> {} ({} dirs, {} files)",
            base.path().display(),
            new_base.path().display(),
            self.directories.len(),
            self.found_files.len()
        );

        new_base
            .make_dir_all()
            .map_err(|source| io_error("create_dir_all", new_base.path(), source))?;

        let mut copied = WalkResult::new(new_base.path().to_path_buf(), WalkMode::Find);

        for dir in &self.directories {
            let target = dir.substitute_base(base, new_base)?;
            target
                .make_dir_all()
                .map_err(|source| io_error("create_dir_all", target.path(), source))?;
            copied.directories.push(target);
        }

        for file in &self.found_files {
            let target_dir = file.record.dir().substitute_base(base, new_base)?;
            target_dir
                .make_dir_all()
                .map_err(|source| io_error("create_dir_all", target_dir.path(), source))?;

            let file_name = file.record.file_name();
            let mut target = FileRecord::from_entry(target_dir, &file_name);

            debug!(
                "[copy] {} -> {}",
                file.record.path().display(),
                target.path().display()
            );
            fs::copy(file.record.path(), target.path())
                .map_err(|source| io_error("copy", file.record.path(), source))?;
            target.refresh_exists();

            let metadata = fs::metadata(target.path())
                .map_err(|source| io_error("stat", target.path(), source))?;
            let info = AugmentedFileInfo::with_dir_path(target.dir().path(), file_name, &metadata)?;

            copied.found_files.push(WalkedFile {
                record: target,
                info,
            });
        }

        Ok(copied)
    }
}

fn io_error(op: &'static str, path: &Path, source: std::io::Error) -> WalkError {
    WalkError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;

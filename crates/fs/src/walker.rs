use std::{
    collections::VecDeque,
    fs::{self, Metadata, ReadDir},
    io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use pathsift_paths::{PathError, make_absolute, strip_trailing_separator};

use crate::{
    AugmentedFileInfo, DirectoryRecord, FileRecord, FileSelectionCriteria,
    error::WalkError,
    record::RecordError,
    result::{WalkMode, WalkResult, WalkedFile},
};

/// One step of a traversal.
#[derive(Debug)]
pub enum WalkEvent {
    EnteredDirectory(DirectoryRecord),
    DirectoryFailed(RecordError),
    VisitedFile { path: PathBuf, info: AugmentedFileInfo },
    Error(String),
}

/// Removes a file on behalf of a delete walk.
pub trait EntryRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// Removes entries from the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostRemover;

impl EntryRemover for HostRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

impl<F> EntryRemover for F
where
    F: FnMut(&Path) -> io::Result<()>,
{
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// Lazy depth-first, pre-order traversal.
///
/// Directories are yielded before their contents, entries in the order
/// `read_dir` returns them. Symlinks are reported as plain entries and
/// never followed. Failures become [`WalkEvent::Error`] and the walk
/// moves on to the next sibling.
pub struct WalkEvents {
    start: Option<(PathBuf, io::Result<Metadata>)>,
    stack: Vec<(PathBuf, ReadDir)>,
    queued: VecDeque<WalkEvent>,
}

impl WalkEvents {
    /// Fails with [`WalkError::StartPathMissing`] when `start` does not
    /// exist. Trailing separators are ignored.
    pub fn new(start: &Path) -> Result<Self, WalkError> {
        Ok(Self::at(resolve_start(start)?))
    }

    fn at(start: PathBuf) -> Self {
        let metadata = fs::metadata(&start);
        Self {
            start: Some((start, metadata)),
            stack: Vec::new(),
            queued: VecDeque::new(),
        }
    }

    fn enter(&mut self, path: PathBuf, metadata: io::Result<Metadata>) -> WalkEvent {
        let event = match DirectoryRecord::from_entry(&path, metadata) {
            Ok(record) => WalkEvent::EnteredDirectory(record),
            Err(e) => {
                warn!("[walk] directory record for {:?} failed: {}", path, e.source);
                WalkEvent::DirectoryFailed(e)
            }
        };

        match fs::read_dir(&path) {
            Ok(rd) => self.stack.push((path, rd)),
            Err(e) => {
                warn!("[walk] read_dir({:?}) failed: {e}", path);
                self.queued
                    .push_back(WalkEvent::Error(format!("read_dir {}: {e}", path.display())));
            }
        }

        event
    }
}

impl Iterator for WalkEvents {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        if let Some(event) = self.queued.pop_front() {
            return Some(event);
        }

        if let Some((start, metadata)) = self.start.take() {
            return Some(match metadata {
                Ok(m) if !m.is_dir() => visit_file(&start, &m),
                metadata => self.enter(start, metadata),
            });
        }

        loop {
            let (dir, rd) = self.stack.last_mut()?;
            let entry = match rd.next() {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(e)) => {
                    warn!("[walk] error reading entry in {:?}: {e}", dir);
                    return Some(WalkEvent::Error(format!(
                        "read entry in {}: {e}",
                        dir.display()
                    )));
                }
                Some(Ok(entry)) => entry,
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    warn!("[walk] file_type({:?}) failed: {e}", path);
                    return Some(WalkEvent::Error(format!(
                        "file type of {}: {e}",
                        path.display()
                    )));
                }
            };

            if file_type.is_dir() {
                let metadata = entry.metadata();
                return Some(self.enter(path, metadata));
            }

            return Some(match entry.metadata() {
                Ok(m) => visit_file(&path, &m),
                Err(e) => {
                    warn!("[walk] metadata({:?}) failed: {e}", path);
                    WalkEvent::Error(format!("stat {}: {e}", path.display()))
                }
            });
        }
    }
}

fn visit_file(path: &Path, metadata: &Metadata) -> WalkEvent {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        warn!("[walk] skipping non UTF-8 name {:?}", path);
        let err = PathError::NonUtf8(path.to_path_buf());
        return WalkEvent::Error(format!("{}: {err}", path.display()));
    };
    let dir = path.parent().unwrap_or(path);

    match AugmentedFileInfo::with_dir_path(dir, name, metadata) {
        Ok(info) => WalkEvent::VisitedFile {
            path: path.to_path_buf(),
            info,
        },
        Err(e) => WalkEvent::Error(format!("{}: {e}", path.display())),
    }
}

fn resolve_start(start: &Path) -> Result<PathBuf, WalkError> {
    let raw = start
        .to_str()
        .ok_or_else(|| PathError::NonUtf8(start.to_path_buf()))?;
    let stripped = strip_trailing_separator(raw);
    if stripped.trim().is_empty() {
        return Err(PathError::Empty.into());
    }

    let absolute = make_absolute(&stripped)?;
    if fs::symlink_metadata(&absolute).is_err() {
        return Err(WalkError::StartPathMissing(PathBuf::from(stripped)));
    }
    Ok(absolute)
}

/// Walk `start`, selecting files with `criteria`. In [`WalkMode::Delete`]
/// selected files are removed from disk.
pub fn walk(
    start: &Path,
    criteria: &FileSelectionCriteria,
    mode: WalkMode,
) -> Result<WalkResult, WalkError> {
    walk_with_remover(start, criteria, mode, &mut HostRemover)
}

/// Like [`walk`], with deletion delegated to `remover`.
pub fn walk_with_remover<R>(
    start: &Path,
    criteria: &FileSelectionCriteria,
    mode: WalkMode,
    remover: &mut R,
) -> Result<WalkResult, WalkError>
where
    R: EntryRemover + ?Sized,
{
    let start = resolve_start(start)?;
    let events = WalkEvents::at(start.clone());
    let mut result = WalkResult::new(start, mode);

    debug!(
        "[walk] {} {:?} ({})",
        mode,
        result.start_path,
        criteria.combine_mode()
    );

    for event in events {
        apply_event(&mut result, event, criteria, remover);
    }

    info!(
        "[walk] {} {:?}: {} dirs, {} found, {} deleted, {} errors",
        mode,
        result.start_path,
        result.directories.len(),
        result.found_files.len(),
        result.deleted_files.len(),
        result.errors.len()
    );
    Ok(result)
}

pub fn find_files(
    start: &Path,
    criteria: &FileSelectionCriteria,
) -> Result<WalkResult, WalkError> {
    walk(start, criteria, WalkMode::Find)
}

pub fn delete_files(
    start: &Path,
    criteria: &FileSelectionCriteria,
) -> Result<WalkResult, WalkError> {
    walk(start, criteria, WalkMode::Delete)
}

pub(crate) fn apply_event<R>(
    result: &mut WalkResult,
    event: WalkEvent,
    criteria: &FileSelectionCriteria,
    remover: &mut R,
) where
    R: EntryRemover + ?Sized,
{
    match event {
        WalkEvent::EnteredDirectory(record) => result.directories.push(record),
        WalkEvent::DirectoryFailed(err) => {
            result.errors.push(err.to_string());
            if let Some(partial) = err.partial {
                result.directories.push(*partial);
            }
        }
        WalkEvent::Error(msg) => result.errors.push(msg),
        WalkEvent::VisitedFile { path, info } => {
            if !criteria.matches(&info) {
                return;
            }

            let mut record = file_record(&path, &info);

            match result.mode {
                WalkMode::Find => result.found_files.push(WalkedFile { record, info }),
                WalkMode::Delete => match remover.remove(&path) {
                    Ok(()) => {
                        debug!("[walk] removed {:?}", path);
                        record.mark_removed();
                        result.deleted_files.push(WalkedFile { record, info });
                    }
                    Err(e) => {
                        warn!("[walk] remove({:?}) failed: {e}", path);
                        result
                            .errors
                            .push(format!("remove {}: {e}", path.display()));
                    }
                },
            }
        }
    }
}

// Walked paths are already absolute and their names came from the OS.
fn file_record(path: &Path, info: &AugmentedFileInfo) -> FileRecord {
    let parent = info
        .dir_path()
        .or_else(|| path.parent())
        .unwrap_or(path);
    FileRecord::from_entry(DirectoryRecord::verbatim(parent.to_path_buf()), info.name())
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;

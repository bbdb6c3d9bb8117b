mod config;
mod criteria;
mod error;
mod info;
mod record;
mod result;
mod walker;

pub use config::{CriteriaConfig, parse_mode};
pub use criteria::{CombineMode, FileSelectionCriteria};
pub use error::{CriteriaError, WalkError};
pub use info::AugmentedFileInfo;
pub use record::{DirectoryRecord, FileRecord, RecordError};
pub use result::{WalkMode, WalkResult, WalkedFile};
pub use walker::{
    EntryRemover, HostRemover, WalkEvent, WalkEvents, delete_files, find_files, walk,
    walk_with_remover,
};

//! Filesystem infrastructure — implements `DirectoryInspector`.

use std::path::Path;

use crate::application::ports::DirectoryInspector;
use crate::domain::validate::DirectoryStatus;

/// Checks home directories on the local filesystem.
///
/// Readability is probed by listing the directory and writability by creating
/// (and immediately discarding) a temporary file in it, so the answer reflects
/// the effective permissions of the current process.
pub struct LocalFs;

impl DirectoryInspector for LocalFs {
    fn inspect(&self, path: &Path) -> DirectoryStatus {
        if !path.exists() {
            return DirectoryStatus::Missing;
        }
        if !path.is_dir() {
            return DirectoryStatus::NotADirectory;
        }
        if std::fs::read_dir(path).is_err() {
            return DirectoryStatus::NotReadable;
        }
        if tempfile::tempfile_in(path).is_err() {
            return DirectoryStatus::NotWritable;
        }
        DirectoryStatus::Usable
    }
}

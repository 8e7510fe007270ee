use std::fs;
use std::io;
use std::path::Path;

use crate::cleaner::{DeletionResult, FailedDeletion, MatchedFile};
use crate::cleanup::observer::{CleanupObserver, NoopObserver};
use crate::error::CleanupError;

/// Deletes the files of a previous scan, one at a time.
///
/// The filesystem may have changed since the scan, so every file is
/// re-checked right before removal. A failure is recorded and the next file
/// is attempted.
#[derive(Clone, Copy)]
pub struct CleanupExecutor<'a> {
    observer: &'a dyn CleanupObserver,
}

impl Default for CleanupExecutor<'static> {
    fn default() -> Self {
        Self {
            observer: &NoopObserver,
        }
    }
}

impl<'a> CleanupExecutor<'a> {
    pub fn new(observer: &'a dyn CleanupObserver) -> Self {
        Self { observer }
    }

    pub fn execute(&self, matches: &[MatchedFile]) -> DeletionResult {
        let mut result = DeletionResult::default();

        for file in matches {
            match remove(&file.path) {
                Ok(freed) => {
                    self.observer.file_deleted(&file.path, freed);
                    result.deleted_size_bytes += freed;
                    result.deleted_paths.push(file.path.clone());
                }
                Err(e) => {
                    self.observer.delete_failed(&e);
                    result.failures.push(FailedDeletion {
                        path: file.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        result.message = format!("Deleted {} file(s)", result.deleted_count());
        if result.failed_count() > 0 {
            result.message += &format!(", {} failed", result.failed_count());
        }
        self.observer.deletion_finished(&result);
        result
    }
}

/// Remove one file and return its size at the time of deletion.
fn remove(path: &Path) -> Result<u64, CleanupError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CleanupError::FileMissing(path.to_path_buf()))
        }
        Err(source) => {
            return Err(CleanupError::Delete {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    fs::remove_file(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CleanupError::FileMissing(path.to_path_buf()),
        _ => CleanupError::Delete {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(meta.len())
}

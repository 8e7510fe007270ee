//! Fault-isolating traversal of a cleanup root.
//!
//! [`Walk`] classifies every entry below the root against a [`ScanCriteria`]
//! and yields one [`Visit`] per entry. Only a failure to read the root itself
//! ends the walk with an `Err`; anything deeper is reported as
//! [`Visit::Skipped`] and the walk moves on.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cleaner::{MatchedFile, ScanCriteria};
use crate::error::CleanupError;

#[derive(Debug)]
pub enum Visit {
    /// Right extension and old enough.
    Match(MatchedFile),
    /// Right extension, modified at or after the threshold.
    TooRecent(PathBuf),
    /// A regular file with some other extension.
    OtherFile(PathBuf),
    /// A directory, symlink or other non-regular entry.
    NotAFile,
    /// The entry could not be inspected and was left out.
    Skipped(CleanupError),
}

pub struct Walk<'a> {
    inner: walkdir::IntoIter,
    criteria: &'a ScanCriteria,
    finished: bool,
}

impl<'a> Walk<'a> {
    pub fn new(criteria: &'a ScanCriteria) -> Self {
        let inner = WalkDir::new(&criteria.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            inner,
            criteria,
            finished: false,
        }
    }

    fn classify(&self, entry: walkdir::DirEntry) -> Visit {
        if !entry.file_type().is_file() {
            return Visit::NotAFile;
        }

        let path = entry.path();
        if !extension_matches(path, &self.criteria.extension) {
            return Visit::OtherFile(entry.into_path());
        }

        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(source) => {
                return Visit::Skipped(CleanupError::EntryAccess {
                    path: Some(path.to_path_buf()),
                    source,
                })
            }
        };

        let modified = match meta.modified() {
            Ok(t) => t,
            Err(source) => {
                return Visit::Skipped(CleanupError::Metadata {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if modified < self.criteria.threshold {
            Visit::Match(MatchedFile {
                path: entry.into_path(),
                size_bytes: meta.len(),
            })
        } else {
            Visit::TooRecent(entry.into_path())
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<Visit, CleanupError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.inner.next()? {
            Ok(entry) => Some(Ok(self.classify(entry))),
            Err(err) if err.depth() == 0 => {
                self.finished = true;
                Some(Err(CleanupError::Traversal(err)))
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                Some(Ok(Visit::Skipped(CleanupError::EntryAccess { path, source: err })))
            }
        }
    }
}

/// Case-insensitive comparison of a file's extension with a normalized target.
/// An empty target never matches.
pub fn extension_matches(path: &Path, target: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()) == target,
        None => false,
    }
}

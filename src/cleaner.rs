use std::path::PathBuf;
use std::time::SystemTime;

use crate::cleanup::normalize::{normalize_extension, normalize_path};
use crate::utils::threshold_from_secs;

/// What a cleanup scan looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCriteria {
    pub root: PathBuf,
    /// Lowercase, dot-prefixed (".log"). Empty means nothing can match.
    pub extension: String,
    /// Files modified strictly before this instant are selected.
    pub threshold: SystemTime,
}

impl ScanCriteria {
    /// Build criteria from raw user input, normalizing directory and extension.
    pub fn new(directory: &str, extension: &str, threshold: SystemTime) -> Self {
        Self {
            root: normalize_path(directory),
            extension: normalize_extension(extension),
            threshold,
        }
    }

    /// Same as [`ScanCriteria::new`] with the threshold given as seconds since
    /// the epoch. Zero or negative values mean the epoch itself.
    pub fn from_timestamp(directory: &str, extension: &str, before_secs: i64) -> Self {
        Self::new(directory, extension, threshold_from_secs(before_secs))
    }
}

/// One file selected by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Success,
    DirectoryNotFound,
    NotADirectory,
    TraversalError,
}

/// Result of a cleanup scan. Never deletes anything.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Walk order, not sorted.
    pub matches: Vec<MatchedFile>,
    pub total_size_bytes: u64,
    pub outcome: ScanOutcome,
    pub message: String,
    /// Regular files inspected during the walk.
    pub files_scanned: usize,
    /// Files with the target extension, old enough or not.
    pub extension_matches: usize,
}

impl ScanResult {
    pub(crate) fn empty() -> Self {
        Self {
            matches: Vec::new(),
            total_size_bytes: 0,
            outcome: ScanOutcome::Success,
            message: String::new(),
            files_scanned: 0,
            extension_matches: 0,
        }
    }

    /// An empty result for a scan that could not run or was aborted.
    pub fn failed(outcome: ScanOutcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
            ..Self::empty()
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ScanOutcome::Success
    }

    /// Matches are only worth acting on after a completed scan that found something.
    pub fn is_actionable(&self) -> bool {
        self.is_success() && !self.matches.is_empty()
    }

    pub(crate) fn push(&mut self, file: MatchedFile) {
        self.total_size_bytes += file.size_bytes;
        self.matches.push(file);
    }
}

/// A file from the input set that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of deleting a previously scanned match set.
#[derive(Debug, Clone, Default)]
pub struct DeletionResult {
    pub deleted_paths: Vec<PathBuf>,
    pub deleted_size_bytes: u64,
    pub failures: Vec<FailedDeletion>,
    pub message: String,
}

impl DeletionResult {
    /// A run where deletion never started; carries the scan's explanation.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_paths.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// A run counts as successful only if at least one file was removed.
    pub fn success(&self) -> bool {
        self.deleted_count() > 0
    }
}

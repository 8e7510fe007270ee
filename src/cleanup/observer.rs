use std::path::Path;

use crate::cleaner::{DeletionResult, MatchedFile, ScanCriteria, ScanResult};
use crate::error::CleanupError;

/// Hooks called by the scanner and executor as they work.
///
/// The engine itself never prints or logs; callers pick the presentation by
/// handing in an observer. Every method defaults to doing nothing.
pub trait CleanupObserver: Send + Sync {
    fn scan_started(&self, _criteria: &ScanCriteria) {}

    /// An entry below the root was skipped (permission denied, unreadable).
    fn entry_skipped(&self, _error: &CleanupError) {}

    fn file_matched(&self, _file: &MatchedFile) {}

    fn scan_finished(&self, _result: &ScanResult) {}

    fn file_deleted(&self, _path: &Path, _size_bytes: u64) {}

    fn delete_failed(&self, _error: &CleanupError) {}

    fn deletion_finished(&self, _result: &DeletionResult) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CleanupObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CleanupObserver for TracingObserver {
    fn scan_started(&self, criteria: &ScanCriteria) {
        let threshold = chrono::DateTime::<chrono::Local>::from(criteria.threshold);
        tracing::info!(
            root = %criteria.root.display(),
            extension = %criteria.extension,
            threshold = %threshold.format("%Y-%m-%d %H:%M:%S"),
            "Cleanup scan started"
        );
    }

    fn entry_skipped(&self, error: &CleanupError) {
        if error.is_permission_denied() {
            tracing::debug!(error = %error, "Skipping entry");
        } else {
            tracing::warn!(error = %error, "Skipping unreadable entry");
        }
    }

    fn file_matched(&self, file: &MatchedFile) {
        tracing::trace!(path = %file.path.display(), size = file.size_bytes, "Matched");
    }

    fn scan_finished(&self, result: &ScanResult) {
        tracing::info!(
            outcome = ?result.outcome,
            files_scanned = result.files_scanned,
            extension_matches = result.extension_matches,
            matches = result.match_count(),
            total_size = result.total_size_bytes,
            "{}",
            result.message
        );
    }

    fn file_deleted(&self, path: &Path, size_bytes: u64) {
        tracing::debug!(path = %path.display(), size = size_bytes, "Deleted");
    }

    fn delete_failed(&self, error: &CleanupError) {
        tracing::warn!(error = %error, "Deletion failed");
    }

    fn deletion_finished(&self, result: &DeletionResult) {
        tracing::info!(
            deleted = result.deleted_count(),
            failed = result.failed_count(),
            freed = result.deleted_size_bytes,
            "{}",
            result.message
        );
    }
}

//! Cleanup engine: scan a tree for old files of one extension, then
//! optionally delete them.

pub mod executor;
pub mod normalize;
pub mod observer;
pub mod orchestrator;
pub mod scanner;
pub mod walk;

pub use executor::CleanupExecutor;
pub use observer::{CleanupObserver, NoopObserver, TracingObserver};
pub use orchestrator::CleanupOrchestrator;
pub use scanner::CleanupScanner;

use crate::cleaner::{DeletionResult, ScanCriteria, ScanResult};

/// Preview: which files under `directory` would be removed.
pub fn scan(
    directory: &str,
    extension: &str,
    before_secs: i64,
    observer: &dyn CleanupObserver,
) -> ScanResult {
    let criteria = ScanCriteria::from_timestamp(directory, extension, before_secs);
    CleanupOrchestrator::new(observer).scan(&criteria)
}

/// Commit: scan with the same criteria and delete every match.
pub fn scan_then_delete(
    directory: &str,
    extension: &str,
    before_secs: i64,
    observer: &dyn CleanupObserver,
) -> DeletionResult {
    let criteria = ScanCriteria::from_timestamp(directory, extension, before_secs);
    CleanupOrchestrator::new(observer).scan_then_delete(&criteria)
}

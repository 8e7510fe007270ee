use crate::cleaner::{DeletionResult, ScanCriteria, ScanResult};
use crate::cleanup::executor::CleanupExecutor;
use crate::cleanup::observer::CleanupObserver;
use crate::cleanup::scanner::CleanupScanner;

/// Preview and commit share one scanner, so both see the same matches.
#[derive(Clone, Copy)]
pub struct CleanupOrchestrator<'a> {
    scanner: CleanupScanner<'a>,
    executor: CleanupExecutor<'a>,
}

impl Default for CleanupOrchestrator<'static> {
    fn default() -> Self {
        Self {
            scanner: CleanupScanner::default(),
            executor: CleanupExecutor::default(),
        }
    }
}

impl<'a> CleanupOrchestrator<'a> {
    pub fn new(observer: &'a dyn CleanupObserver) -> Self {
        Self {
            scanner: CleanupScanner::new(observer),
            executor: CleanupExecutor::new(observer),
        }
    }

    pub fn scan(&self, criteria: &ScanCriteria) -> ScanResult {
        self.scanner.scan(criteria)
    }

    /// Scan, then delete what was found. Deletion is skipped entirely when the
    /// scan failed or matched nothing.
    pub fn scan_then_delete(&self, criteria: &ScanCriteria) -> DeletionResult {
        let scan = self.scanner.scan(criteria);
        if !scan.is_actionable() {
            return DeletionResult::skipped(scan.message);
        }
        self.executor.execute(&scan.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleanup::observer::recording::Recorder;
    use std::fs::{self, File};
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    const DAY: u64 = 86_400;

    fn write_aged(path: &Path, contents: &[u8], secs_ago: u64) {
        fs::write(path, contents).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    fn criteria(root: &Path, ext: &str, secs_ago: u64) -> ScanCriteria {
        ScanCriteria::new(
            &root.to_string_lossy(),
            ext,
            SystemTime::now() - Duration::from_secs(secs_ago),
        )
    }

    #[test]
    fn deletes_old_file_and_keeps_recent_one() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");
        write_aged(&a, b"0123456", 10 * DAY);
        write_aged(&b, b"01", 3_600);

        let c = criteria(dir.path(), ".log", 2 * DAY);
        let result = CleanupOrchestrator::default().scan_then_delete(&c);

        assert_eq!(result.deleted_count(), 1);
        assert_eq!(result.deleted_size_bytes, 7);
        assert!(!a.exists());
        assert!(b.exists());
        assert!(result.success());
    }

    #[test]
    fn zero_matches_never_reaches_deletion() {
        let dir = tempfile::tempdir().unwrap();
        write_aged(&dir.path().join("keep.txt"), b"x", 10 * DAY);

        let recorder = Recorder::default();
        let c = criteria(dir.path(), ".log", DAY);
        let result = CleanupOrchestrator::new(&recorder).scan_then_delete(&c);

        assert_eq!(result.deleted_count(), 0);
        assert_eq!(result.failed_count(), 0);
        assert!(!result.success());
        assert_eq!(result.message, "No files found with extension .log in directory");
        assert!(!recorder.events().iter().any(|e| e == "deletion_finished"));
    }

    #[test]
    fn failed_scan_carries_its_message() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let c = criteria(&missing, ".log", DAY);
        let result = CleanupOrchestrator::default().scan_then_delete(&c);

        assert_eq!(result.deleted_count(), 0);
        assert!(result.message.starts_with("Directory does not exist"));
    }

    #[test]
    fn preview_and_commit_agree() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.tmp", "b.tmp", "c.txt"] {
            write_aged(&dir.path().join(name), b"data", 5 * DAY);
        }
        let c = criteria(dir.path(), "tmp", DAY);
        let orchestrator = CleanupOrchestrator::default();

        let preview = orchestrator.scan(&c);
        let commit = orchestrator.scan_then_delete(&c);

        let previewed: Vec<_> = preview.matches.iter().map(|m| m.path.clone()).collect();
        assert_eq!(commit.deleted_paths, previewed);
        assert_eq!(commit.deleted_size_bytes, preview.total_size_bytes);
    }
}

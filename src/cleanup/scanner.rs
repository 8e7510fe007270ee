use crate::cleaner::{ScanCriteria, ScanResult};
use crate::cleanup::observer::{CleanupObserver, NoopObserver};
use crate::cleanup::walk::{Visit, Walk};
use crate::error::CleanupError;

/// Finds files under a root that match an extension and are older than a
/// threshold. Read-only.
#[derive(Clone, Copy)]
pub struct CleanupScanner<'a> {
    observer: &'a dyn CleanupObserver,
}

impl Default for CleanupScanner<'static> {
    fn default() -> Self {
        Self {
            observer: &NoopObserver,
        }
    }
}

impl<'a> CleanupScanner<'a> {
    pub fn new(observer: &'a dyn CleanupObserver) -> Self {
        Self { observer }
    }

    pub fn scan(&self, criteria: &ScanCriteria) -> ScanResult {
        self.observer.scan_started(criteria);
        let result = match self.check_root(criteria) {
            Ok(()) => self.walk(criteria),
            Err(e) => ScanResult::failed(e.outcome(), e.to_string()),
        };
        self.observer.scan_finished(&result);
        result
    }

    fn check_root(&self, criteria: &ScanCriteria) -> Result<(), CleanupError> {
        let root = &criteria.root;
        if !root.exists() {
            return Err(CleanupError::DirectoryNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(CleanupError::NotADirectory(root.clone()));
        }
        Ok(())
    }

    fn walk(&self, criteria: &ScanCriteria) -> ScanResult {
        let mut result = ScanResult::empty();

        for visit in Walk::new(criteria) {
            match visit {
                Ok(Visit::Match(file)) => {
                    result.files_scanned += 1;
                    result.extension_matches += 1;
                    self.observer.file_matched(&file);
                    result.push(file);
                }
                Ok(Visit::TooRecent(_)) => {
                    result.files_scanned += 1;
                    result.extension_matches += 1;
                }
                Ok(Visit::OtherFile(_)) => result.files_scanned += 1,
                Ok(Visit::NotAFile) => {}
                Ok(Visit::Skipped(e)) => self.observer.entry_skipped(&e),
                // Partial matches are not trusted once the root fails.
                Err(e) => return ScanResult::failed(e.outcome(), e.to_string()),
            }
        }

        result.message = summarize(&result, &criteria.extension);
        result
    }
}

fn summarize(result: &ScanResult, extension: &str) -> String {
    if result.extension_matches == 0 {
        format!("No files found with extension {extension} in directory")
    } else if result.matches.is_empty() {
        format!(
            "Found {} files with extension {extension}, but none are older than the specified date",
            result.extension_matches
        )
    } else {
        format!("Found {} file(s) to delete", result.match_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::ScanOutcome;
    use crate::cleanup::observer::recording::Recorder;
    use std::fs::{self, File};
    use std::path::{Path, PathBuf};
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

    fn paths(result: &ScanResult) -> Vec<PathBuf> {
        result.matches.iter().map(|m| m.path.clone()).collect()
    }

    #[test]
    fn selects_only_files_older_than_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        write_aged(&a, b"old contents", 10 * DAY);
        write_aged(&dir.path().join("b.log"), b"fresh", 3_600);

        let result = CleanupScanner::default().scan(&criteria(dir.path(), ".log", 2 * DAY));

        assert_eq!(result.outcome, ScanOutcome::Success);
        assert_eq!(result.match_count(), 1);
        assert_eq!(paths(&result), vec![a]);
        assert_eq!(result.total_size_bytes, 12);
        assert_eq!(result.message, "Found 1 file(s) to delete");
    }

    #[test]
    fn file_modified_exactly_at_threshold_is_not_selected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.log");
        fs::write(&path, b"x").unwrap();
        let stamp = SystemTime::now() - Duration::from_secs(5 * DAY);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(stamp)
            .unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let mut c = criteria(dir.path(), "log", 0);
        c.threshold = modified;
        let at = CleanupScanner::default().scan(&c);
        assert_eq!(at.match_count(), 0);
        assert_eq!(at.extension_matches, 1);

        c.threshold = modified + Duration::from_secs(1);
        assert_eq!(CleanupScanner::default().scan(&c).match_count(), 1);
    }

    #[test]
    fn recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("one").join("two");
        fs::create_dir_all(&nested).unwrap();
        write_aged(&dir.path().join("top.TMP"), b"12", 30 * DAY);
        write_aged(&nested.join("deep.tmp"), b"345", 30 * DAY);

        let result = CleanupScanner::default().scan(&criteria(dir.path(), "TMP", DAY));

        assert_eq!(result.match_count(), 2);
        assert_eq!(result.total_size_bytes, 5);
        assert!(paths(&result).contains(&nested.join("deep.tmp")));
    }

    #[test]
    fn zero_byte_file_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        write_aged(&dir.path().join("empty.log"), b"", 10 * DAY);

        let result = CleanupScanner::default().scan(&criteria(dir.path(), ".log", DAY));

        assert_eq!(result.match_count(), 1);
        assert_eq!(result.total_size_bytes, 0);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        let result = CleanupScanner::default().scan(&criteria(&missing, ".log", 0));

        assert_eq!(result.outcome, ScanOutcome::DirectoryNotFound);
        assert_eq!(result.match_count(), 0);
        assert!(result.message.contains("nowhere"));
        assert!(!result.is_actionable());
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.log");
        fs::write(&file, b"x").unwrap();

        let result = CleanupScanner::default().scan(&criteria(&file, ".log", 0));

        assert_eq!(result.outcome, ScanOutcome::NotADirectory);
        assert!(result.message.starts_with("Path is not a directory"));
    }

    #[test]
    fn no_files_of_extension_differs_from_too_recent() {
        let dir = tempfile::tempdir().unwrap();
        write_aged(&dir.path().join("a.txt"), b"x", 10 * DAY);
        let none = CleanupScanner::default().scan(&criteria(dir.path(), ".log", DAY));
        assert_eq!(none.outcome, ScanOutcome::Success);
        assert_eq!(none.match_count(), 0);
        assert_eq!(none.message, "No files found with extension .log in directory");

        write_aged(&dir.path().join("b.log"), b"x", 60);
        let recent = CleanupScanner::default().scan(&criteria(dir.path(), ".log", DAY));
        assert_eq!(recent.match_count(), 0);
        assert_eq!(
            recent.message,
            "Found 1 files with extension .log, but none are older than the specified date"
        );
    }

    #[test]
    fn empty_extension_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_aged(&dir.path().join("noext"), b"x", 10 * DAY);
        write_aged(&dir.path().join("a.txt"), b"x", 10 * DAY);

        let result = CleanupScanner::default().scan(&criteria(dir.path(), "", DAY));

        assert_eq!(result.outcome, ScanOutcome::Success);
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.files_scanned, 2);
    }

    #[test]
    fn epoch_threshold_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_aged(&dir.path().join("a.log"), b"x", 365 * DAY);

        let c = ScanCriteria::from_timestamp(&dir.path().to_string_lossy(), "log", 0);
        assert_eq!(CleanupScanner::default().scan(&c).match_count(), 0);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.log", "a.log", "b.log"] {
            write_aged(&dir.path().join(name), name.as_bytes(), 10 * DAY);
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        write_aged(&dir.path().join("sub").join("d.log"), b"d", 10 * DAY);

        let c = criteria(dir.path(), ".log", DAY);
        let first = CleanupScanner::default().scan(&c);
        let second = CleanupScanner::default().scan(&c);

        assert_eq!(first.matches, second.matches);
        assert_eq!(first.total_size_bytes, second.total_size_bytes);
        assert_eq!(first.match_count(), 4);
    }

    #[test]
    fn aggregates_and_filters_hold_for_every_match() {
        let dir = tempfile::tempdir().unwrap();
        for (i, name) in ["x.LOG", "y.log", "z.log.bak", "w.log"].iter().enumerate() {
            write_aged(&dir.path().join(name), &vec![0u8; i * 7], (i as u64 + 1) * DAY);
        }

        let c = criteria(dir.path(), ".log", DAY + DAY / 2);
        let result = CleanupScanner::default().scan(&c);

        assert_eq!(result.match_count(), result.matches.len());
        assert_eq!(
            result.total_size_bytes,
            result.matches.iter().map(|m| m.size_bytes).sum::<u64>()
        );
        for m in &result.matches {
            let ext = m.path.extension().unwrap().to_string_lossy().to_lowercase();
            assert_eq!(ext, "log");
            let modified = fs::metadata(&m.path).unwrap().modified().unwrap();
            assert!(modified < c.threshold);
        }
        // y.log (2 days) and w.log (4 days); x.LOG is 1 day old.
        assert_eq!(result.match_count(), 2);
    }

    #[test]
    fn reports_progress_to_observer() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        write_aged(&a, b"x", 10 * DAY);

        let recorder = Recorder::default();
        CleanupScanner::new(&recorder).scan(&criteria(dir.path(), ".log", DAY));

        assert_eq!(
            recorder.events(),
            vec![
                "scan_started".to_string(),
                format!("matched {}", a.display()),
                "scan_finished".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        write_aged(&locked.join("hidden.log"), b"x", 10 * DAY);
        write_aged(&dir.path().join("visible.log"), b"x", 10 * DAY);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if !permissions_enforced(&locked) {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipped: permission bits are not enforced for this user");
            return;
        }

        let recorder = Recorder::default();
        let result = CleanupScanner::new(&recorder).scan(&criteria(dir.path(), ".log", DAY));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.outcome, ScanOutcome::Success);
        assert_eq!(paths(&result), vec![dir.path().join("visible.log")]);
        assert!(recorder.events().contains(&"entry_skipped".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_is_a_traversal_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        write_aged(&root.join("a.log"), b"x", 10 * DAY);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        if !permissions_enforced(&root) {
            fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipped: permission bits are not enforced for this user");
            return;
        }

        let result = CleanupScanner::default().scan(&criteria(&root, ".log", DAY));
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.outcome, ScanOutcome::TraversalError);
        assert!(result.message.starts_with("Filesystem error: "), "{}", result.message);
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.total_size_bytes, 0);
        assert!(!result.is_actionable());
    }

    /// Permission bits do not stop a privileged user from listing a directory.
    #[cfg(unix)]
    fn permissions_enforced(locked: &Path) -> bool {
        fs::read_dir(locked).is_err()
    }
}

use std::io;
use std::path::PathBuf;

use crate::cleaner::ScanOutcome;

/// Everything that can go wrong while scanning or deleting.
///
/// Only the root-level variants abort a scan. Entry and per-file variants are
/// collected into results and never propagated.
#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Filesystem error: {0}")]
    Traversal(#[source] walkdir::Error),

    #[error("Cannot access {}: {source}", display_opt(.path))]
    EntryAccess {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot read metadata of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File no longer exists: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Failed to delete {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CleanupError {
    /// How a scan aborted by this error is classified.
    pub fn outcome(&self) -> ScanOutcome {
        match self {
            CleanupError::DirectoryNotFound(_) => ScanOutcome::DirectoryNotFound,
            CleanupError::NotADirectory(_) => ScanOutcome::NotADirectory,
            _ => ScanOutcome::TraversalError,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        let kind = match self {
            CleanupError::Traversal(e) | CleanupError::EntryAccess { source: e, .. } => {
                e.io_error().map(io::Error::kind)
            }
            CleanupError::Metadata { source, .. } | CleanupError::Delete { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        };
        kind == Some(io::ErrorKind::PermissionDenied)
    }
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

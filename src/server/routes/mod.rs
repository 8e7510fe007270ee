pub mod browse;
pub mod cleanup;
pub mod drives;
pub mod health;

use std::path::{Path, PathBuf};

use crate::cleanup::normalize::normalize_path;
use crate::server::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".into())
}

/// A request-supplied directory, or the configured default when absent.
pub(crate) fn directory_or(raw: Option<&str>, default: &Path) -> PathBuf {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => normalize_path(dir),
        None => default.to_path_buf(),
    }
}

//! Flat directory and file listing plus single-file create/delete.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid file name: '{0}'")]
    InvalidName(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BrowseError {
    fn io(path: &Path, source: io::Error) -> Self {
        BrowseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    /// Extension with its dot, as on disk (".PDF"); empty when there is none.
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, BrowseError> {
    if !dir.is_dir() {
        return Err(BrowseError::DirectoryNotFound(dir.to_path_buf()));
    }
    fs::read_dir(dir).map_err(|e| BrowseError::io(dir, e))
}

/// Immediate subdirectories of `dir`, sorted by name. Entries that cannot be
/// inspected are left out.
pub fn list_directories(dir: &Path) -> Result<Vec<DirectoryEntry>, BrowseError> {
    let mut dirs: Vec<DirectoryEntry> = read_dir(dir)?
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().display().to_string(),
        })
        .collect();

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dirs)
}

/// Immediate regular files of `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>, BrowseError> {
    let mut files: Vec<FileEntry> = read_dir(dir)?
        .flatten()
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let path = entry.path();
            let file_type = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            Some(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.display().to_string(),
                file_type,
                size: meta.len(),
            })
        })
        .collect();

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Remove a single regular file. Directories are refused.
pub fn delete_file(path: &Path) -> Result<(), BrowseError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(BrowseError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(BrowseError::io(path, e)),
    };
    if meta.is_dir() {
        return Err(BrowseError::NotAFile(path.to_path_buf()));
    }
    fs::remove_file(path).map_err(|e| BrowseError::io(path, e))
}

/// Create an empty file called `name` inside `dir`. Never overwrites.
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf, BrowseError> {
    if !is_plain_name(name) {
        return Err(BrowseError::InvalidName(name.to_string()));
    }
    if !dir.is_dir() {
        return Err(BrowseError::DirectoryNotFound(dir.to_path_buf()));
    }

    let path = dir.join(name);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => Ok(path),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(BrowseError::AlreadyExists(path)),
        Err(e) => Err(BrowseError::io(&path, e)),
    }
}

/// A single path component: no separators, not "." or "..".
fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
